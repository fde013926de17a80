use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::bitbucket::json::page::{push_non_empty, ListOptions, PageQuery};
use crate::bitbucket::json::permission::Permission;
use crate::bitbucket::json::repository::Link;
use crate::bitbucket::json::user::{Group, User};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub public: bool,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub links: HashMap<String, Vec<Link>>,
}

/// A user or group grant on a project; exactly one of `user`/`group` is set.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectPermission {
    pub permission: Option<Permission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<Group>,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ProjectPermissionType {
    User,
    Group,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct ProjectPermissionSearchOptions {
    pub list: ListOptions,

    pub permission: Option<Permission>,
    pub permission_type: Option<ProjectPermissionType>,
    pub filter: Option<String>,
}

impl PageQuery for ProjectPermissionSearchOptions {
    fn list_options(&self) -> ListOptions {
        self.list
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "permission", &self.permission);
        push_non_empty(&mut pairs, "type", &self.permission_type);
        push_non_empty(&mut pairs, "filterText", &self.filter);
        pairs
    }
}
