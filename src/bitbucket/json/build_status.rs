use serde::Deserialize;
use serde::Serialize;
use strum_macros::{Display, EnumString};

use crate::bitbucket::json::datetime::DateTime;

/// Status of a CI build for a commit. Optional fields are left out of the request body when unset.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildStatus {
    pub key: String,
    pub state: BuildStatusState,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_added: Option<DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Build duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Key of the parent build, for builds split into stages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, rename = "ref", skip_serializing_if = "Option::is_none")]
    pub git_ref: Option<String>,
    #[serde(default, rename = "testResults", skip_serializing_if = "Option::is_none")]
    pub test_results: Option<BuildStatusTestResult>,
}

#[derive(Display, EnumString, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildStatusState {
    Cancelled,
    Failed,
    #[serde(rename = "INPROGRESS")]
    #[strum(serialize = "INPROGRESS")]
    InProgress,
    Successful,
    Unknown,
}

impl Default for BuildStatusState {
    fn default() -> Self {
        BuildStatusState::Unknown
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildStatusTestResult {
    pub failed: u32,
    pub skipped: u32,
    pub successful: u32,
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn build_status_body_matches_server_shape() {
        let status = BuildStatus {
            key: "BUILD-ID".to_string(),
            state: BuildStatusState::InProgress,
            url: "https://ci.domain.com/builds/BUILD-ID".to_string(),
            build_number: Some("number".to_string()),
            date_added: Some(Utc.with_ymd_and_hms(2023, 4, 1, 12, 0, 0).unwrap().into()),
            description: None,
            duration: Some(10000),
            name: Some("my-build".to_string()),
            parent: Some("parentKey".to_string()),
            git_ref: Some("refs/head".to_string()),
            test_results: None,
        };

        assert_eq!(
            serde_json::to_string(&status).unwrap(),
            r#"{"key":"BUILD-ID","state":"INPROGRESS","url":"https://ci.domain.com/builds/BUILD-ID","buildNumber":"number","dateAdded":1680350400000,"duration":10000,"name":"my-build","parent":"parentKey","ref":"refs/head"}"#
        );
    }
}
