use serde::Deserialize;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::bitbucket::json::datetime::DateTime;
use crate::bitbucket::json::page::{push_non_empty, ListOptions, PageQuery};
use crate::bitbucket::json::repository::FilePath;

/// Author/committer identity as recorded by git, not necessarily a Bitbucket [`User`](super::user::User).
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GitUser {
    pub name: String,
    #[serde(rename = "emailAddress")]
    pub email: String,
}

/// The commit itself, minus its ancestry. Parent entries are usually abbreviated to
/// `id`/`displayId`, so everything else is optional.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CommitData {
    pub id: String,
    pub display_id: String,
    pub message: String,
    pub author: GitUser,
    #[serde(rename = "authorTimestamp", skip_serializing_if = "Option::is_none")]
    pub authored: Option<DateTime>,
    pub committer: GitUser,
    #[serde(rename = "committerTimestamp", skip_serializing_if = "Option::is_none")]
    pub committed: Option<DateTime>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    #[serde(flatten)]
    pub data: CommitData,
    #[serde(default)]
    pub parents: Vec<CommitData>,
}

impl std::ops::Deref for Commit {
    type Target = CommitData;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommitSearchMerges {
    Exclude,
    Include,
    Only,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct CommitSearchOptions {
    pub list: ListOptions,

    /// Only commits touching this path.
    pub path: Option<String>,
    /// Follow the history of `path` past renames; only valid for a single file.
    pub follow_renames: bool,
    /// Commit id or ref to list back from (inclusive).
    pub until: Option<String>,
    /// Commit id or ref to stop at (exclusive).
    pub since: Option<String>,
    pub merges: Option<CommitSearchMerges>,
    pub ignore_missing: bool,
}

impl PageQuery for CommitSearchOptions {
    fn list_options(&self) -> ListOptions {
        self.list
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "path", &self.path);
        push_non_empty(&mut pairs, "followRenames", &self.follow_renames.then(|| true));
        push_non_empty(&mut pairs, "until", &self.until);
        push_non_empty(&mut pairs, "since", &self.since);
        push_non_empty(&mut pairs, "merges", &self.merges);
        push_non_empty(&mut pairs, "ignoreMissing", &self.ignore_missing.then(|| true));
        pairs
    }
}

pub type ChangePath = FilePath;

/// A single file touched by a commit, a pull request or a comparison between two refs.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Change {
    pub content_id: String,
    pub from_content_id: String,
    pub path: ChangePath,
    pub executable: bool,
    pub percent_unchanged: i32,
    #[serde(rename = "type")]
    pub change_type: ChangeType,
    pub node_type: ChangeNodeType,
    pub src_executable: bool,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeType {
    Add,
    Copy,
    Delete,
    Modify,
    Move,
    #[serde(other)]
    Unknown,
}

impl Default for ChangeType {
    fn default() -> Self {
        ChangeType::Unknown
    }
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeNodeType {
    File,
    Directory,
    Submodule,
    #[serde(other)]
    Unknown,
}

impl Default for ChangeNodeType {
    fn default() -> Self {
        ChangeNodeType::Unknown
    }
}

/// `fromRepo` names the repository holding `from` when comparing across forks.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct CompareChangesOptions {
    pub list: ListOptions,

    pub from_repo: Option<String>,
}

impl PageQuery for CompareChangesOptions {
    fn list_options(&self) -> ListOptions {
        self.list
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "fromRepo", &self.from_repo);
        pairs
    }
}
