use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::bitbucket::json::page::{push_non_empty, ListOptions, Page, PageQuery, Paginated};
use crate::bitbucket::json::permission::Permission;
use crate::bitbucket::json::project::Project;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Repository {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,
    pub scm_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub public: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub archived: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub forkable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<RepositoryState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, Vec<Link>>,
}

impl Repository {
    /// Clone URL for the given protocol (`http` / `ssh`), if the server advertised one.
    pub fn clone_url(&self, protocol: &str) -> Option<&str> {
        self.links
            .get("clone")?
            .iter()
            .find(|link| link.name.as_deref() == Some(protocol))
            .map(|link| link.href.as_str())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Link {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryState {
    Available,
    InitialisationFailed,
    Initialising,
    Offline,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryArchived {
    Active,
    Archived,
    All,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RepositoryVisibility {
    Private,
    Public,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct RepositorySearchOptions {
    pub list: ListOptions,

    pub archived: Option<RepositoryArchived>,
    pub project_name: Option<String>,
    pub project_key: Option<String>,
    pub visibility: Option<RepositoryVisibility>,
    pub name: Option<String>,
    pub permission: Option<Permission>,
    pub state: Option<RepositoryState>,
}

impl PageQuery for RepositorySearchOptions {
    fn list_options(&self) -> ListOptions {
        self.list
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "archived", &self.archived);
        push_non_empty(&mut pairs, "projectname", &self.project_name);
        push_non_empty(&mut pairs, "projectkey", &self.project_key);
        push_non_empty(&mut pairs, "visibility", &self.visibility);
        push_non_empty(&mut pairs, "name", &self.name);
        push_non_empty(&mut pairs, "permission", &self.permission);
        push_non_empty(&mut pairs, "state", &self.state);
        pairs
    }
}

/// Options shared by the file listing and file browsing endpoints; `at` is a commit id or ref.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct FileOptions {
    pub list: ListOptions,

    pub at: Option<String>,
}

impl PageQuery for FileOptions {
    fn list_options(&self) -> ListOptions {
        self.list
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "at", &self.at);
        pairs
    }
}

/// Body of the `browse` endpoint. For a text file it carries a page of `lines`; for a binary file
/// `binary` is set; for a directory it carries `path` (plus its `children`, which we don't model).
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileContent {
    #[serde(flatten)]
    pub page: Page,

    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub lines: Vec<FileLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<FilePath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl Paginated for FileContent {
    fn page(&self) -> Option<Page> {
        Some(self.page.clone())
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FileLine {
    pub text: String,
}

/// A path inside a repository; `title` is the full slash-separated form.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilePath {
    pub components: Vec<String>,
    pub parent: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(rename = "toString")]
    pub title: String,
}
