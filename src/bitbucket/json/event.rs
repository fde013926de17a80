use serde::Deserialize;
use serde::Serialize;
use strum_macros::{Display, EnumIter, EnumString};

use crate::bitbucket::json::commit::Commit;
use crate::bitbucket::json::datetime::IsoTime;
use crate::bitbucket::json::pull_request::PullRequest;
use crate::bitbucket::json::repository::Repository;
use crate::bitbucket::json::user::User;

/// Every event key the server can deliver (`X-Event-Key`) or a webhook can subscribe to.
#[derive(Display, EnumString, EnumIter, Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKey {
    /// Push.
    #[serde(rename = "repo:refs_changed")]
    #[strum(serialize = "repo:refs_changed")]
    RepoRefsChanged,
    /// Repository renamed.
    #[serde(rename = "repo:modified")]
    #[strum(serialize = "repo:modified")]
    RepoModified,
    #[serde(rename = "repo:fork")]
    #[strum(serialize = "repo:fork")]
    RepoFork,
    #[serde(rename = "repo:comment:added")]
    #[strum(serialize = "repo:comment:added")]
    CommentAdded,
    #[serde(rename = "repo:comment:edited")]
    #[strum(serialize = "repo:comment:edited")]
    CommentEdited,
    #[serde(rename = "repo:comment:deleted")]
    #[strum(serialize = "repo:comment:deleted")]
    CommentDeleted,
    #[serde(rename = "pr:opened")]
    #[strum(serialize = "pr:opened")]
    PullRequestOpened,
    /// Source branch of the pull request received new commits.
    #[serde(rename = "pr:from_ref_updated")]
    #[strum(serialize = "pr:from_ref_updated")]
    PullRequestFromRefUpdated,
    #[serde(rename = "pr:to_ref_updated")]
    #[strum(serialize = "pr:to_ref_updated")]
    PullRequestToRefUpdated,
    /// Title, description or target changed.
    #[serde(rename = "pr:modified")]
    #[strum(serialize = "pr:modified")]
    PullRequestModified,
    #[serde(rename = "pr:reviewer:updated")]
    #[strum(serialize = "pr:reviewer:updated")]
    PullRequestReviewerUpdated,
    #[serde(rename = "pr:reviewer:approved")]
    #[strum(serialize = "pr:reviewer:approved")]
    PullRequestApproved,
    #[serde(rename = "pr:reviewer:unapproved")]
    #[strum(serialize = "pr:reviewer:unapproved")]
    PullRequestUnapproved,
    #[serde(rename = "pr:reviewer:needs_work")]
    #[strum(serialize = "pr:reviewer:needs_work")]
    PullRequestNeedsWork,
    #[serde(rename = "pr:merged")]
    #[strum(serialize = "pr:merged")]
    PullRequestMerged,
    #[serde(rename = "pr:declined")]
    #[strum(serialize = "pr:declined")]
    PullRequestDeclined,
    #[serde(rename = "pr:deleted")]
    #[strum(serialize = "pr:deleted")]
    PullRequestDeleted,
    #[serde(rename = "pr:comment:added")]
    #[strum(serialize = "pr:comment:added")]
    PullRequestCommentAdded,
    #[serde(rename = "pr:comment:edited")]
    #[strum(serialize = "pr:comment:edited")]
    PullRequestCommentEdited,
    #[serde(rename = "pr:comment:deleted")]
    #[strum(serialize = "pr:comment:deleted")]
    PullRequestCommentDeleted,
}

/// Fields shared by every webhook delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventHeader {
    pub event_key: EventKey,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<IsoTime>,
    #[serde(default)]
    pub actor: User,
}

/// `repo:refs_changed`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPushEvent {
    #[serde(flatten)]
    pub header: EventHeader,

    pub repository: Repository,
    #[serde(default)]
    pub changes: Vec<RepositoryPushEventChange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commits: Vec<Commit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_commit: Option<Commit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPushEventChange {
    #[serde(rename = "ref")]
    pub git_ref: RepositoryPushEventRef,
    pub ref_id: String,
    pub from_hash: String,
    pub to_hash: String,
    #[serde(rename = "type")]
    pub change_type: RepositoryPushEventChangeType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryPushEventRef {
    pub id: String,
    pub display_id: String,
    #[serde(rename = "type")]
    pub ref_type: RepositoryPushEventRefType,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryPushEventChangeType {
    Add,
    Update,
    Delete,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum RepositoryPushEventRefType {
    Branch,
    Tag,
}

/// `pr:opened`, `pr:from_ref_updated`, `pr:modified`, `pr:merged`, `pr:declined`, `pr:deleted`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PullRequestEvent {
    #[serde(flatten)]
    pub header: EventHeader,

    pub pull_request: PullRequest,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn header_and_json_spellings_agree() {
        assert_eq!(EventKey::iter().count(), 20);
        for key in EventKey::iter() {
            let json = serde_json::to_string(&key).unwrap();
            assert_eq!(json, format!("\"{}\"", key));
            assert_eq!(EventKey::from_str(&key.to_string()).unwrap(), key);
        }
    }

    #[test]
    fn unknown_key_does_not_parse() {
        assert!(EventKey::from_str("repo:secret_detected").is_err());
        assert_eq!(EventKey::from_str("pr:reviewer:needs_work").unwrap(), EventKey::PullRequestNeedsWork);
    }

    #[test]
    fn push_change_decodes() {
        let change: RepositoryPushEventChange = serde_json::from_str(
            r#"{
                "ref": { "id": "refs/heads/master", "displayId": "master", "type": "BRANCH" },
                "refId": "refs/heads/master",
                "fromHash": "197a3e0d2f9a2b3ed1c4fe5923d5dd701bee9fdd",
                "toHash": "a00945762949b7b787ecabc388c0e20b1b85f0b4",
                "type": "UPDATE"
            }"#,
        )
        .unwrap();

        assert_eq!(change.change_type, RepositoryPushEventChangeType::Update);
        assert_eq!(change.git_ref.ref_type, RepositoryPushEventRefType::Branch);
        assert_eq!(change.git_ref.display_id, "master");
    }
}
