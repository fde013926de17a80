use serde::Deserialize;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::bitbucket::json::page::{push_non_empty, ListOptions, PageQuery};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Branch {
    pub id: String,
    pub display_id: String,
    #[serde(rename = "type")]
    pub branch_type: String,
    pub latest_commit: String,
    pub latest_changeset: String,
    #[serde(rename = "isDefault")]
    pub default: bool,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BranchSearchOrder {
    Alphabetical,
    Modification,
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct BranchSearchOptions {
    pub list: ListOptions,

    pub filter: Option<String>,
    pub order: Option<BranchSearchOrder>,
}

impl PageQuery for BranchSearchOptions {
    fn list_options(&self) -> ListOptions {
        self.list
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "filterText", &self.filter);
        push_non_empty(&mut pairs, "orderBy", &self.order);
        pairs
    }
}
