use serde::Deserialize;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::bitbucket::json::datetime::DateTime;
use crate::bitbucket::json::page::{push_non_empty, ListOptions, PageQuery};
use crate::bitbucket::json::repository::Repository;
use crate::bitbucket::json::user::User;

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequest {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub version: u64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub state: PullRequestState,
    #[serde(default)]
    pub open: bool,
    #[serde(default)]
    pub closed: bool,
    #[serde(default, rename = "createdDate", skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime>,
    #[serde(default, rename = "updatedDate", skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime>,
    #[serde(rename = "fromRef")]
    pub source: PullRequestRef,
    #[serde(rename = "toRef")]
    pub target: PullRequestRef,
    #[serde(default)]
    pub locked: bool,
    pub author: PullRequestParticipant,
    #[serde(default)]
    pub reviewers: Vec<PullRequestParticipant>,
    #[serde(default)]
    pub participants: Vec<PullRequestParticipant>,
}

/// One side of a pull request: the ref, the commit it pointed at and the repository holding it.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PullRequestRef {
    pub id: String,
    pub display_id: String,
    pub latest_commit: String,
    pub repository: Repository,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestParticipant {
    pub user: User,
    pub role: PullRequestAuthorRole,
    #[serde(default)]
    pub approved: bool,
    pub status: PullRequestAuthorStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reviewed_commit: Option<String>,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestState {
    Declined,
    Merged,
    Open,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestAuthorRole {
    Author,
    Reviewer,
    Participant,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestAuthorStatus {
    Approved,
    Unapproved,
    NeedsWork,
}

impl Default for PullRequestState {
    fn default() -> Self {
        PullRequestState::Open
    }
}

impl Default for PullRequestAuthorRole {
    fn default() -> Self {
        PullRequestAuthorRole::Participant
    }
}

impl Default for PullRequestAuthorStatus {
    fn default() -> Self {
        PullRequestAuthorStatus::Unapproved
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct PullRequestSearchOptions {
    pub list: ListOptions,

    /// Fully qualified ref the pull requests must target or come from.
    pub at: Option<String>,
    pub filter: Option<String>,
    pub state: Option<PullRequestState>,
}

impl PageQuery for PullRequestSearchOptions {
    fn list_options(&self) -> ListOptions {
        self.list
    }

    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_non_empty(&mut pairs, "at", &self.at);
        push_non_empty(&mut pairs, "filterText", &self.filter);
        push_non_empty(&mut pairs, "state", &self.state);
        pairs
    }
}
