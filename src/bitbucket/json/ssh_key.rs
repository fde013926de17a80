use serde::Deserialize;
use serde::Serialize;

use crate::bitbucket::json::permission::Permission;

/// An access key (SSH public key) granted on a repository.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct SshKey {
    pub id: Option<u64>,
    pub text: String,
    pub label: String,
    pub algorithm: String,
    pub length: u32,
    pub permission: Option<Permission>,
}

/// Shape the keys API actually speaks: `{ "key": { .. }, "permission": .. }`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshKeyEnvelope {
    pub key: SshKeyDetails,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permission: Option<Permission>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SshKeyDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub text: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub label: String,
    #[serde(rename = "algorithmType")]
    pub algorithm: String,
    #[serde(rename = "bitLength")]
    pub length: u32,
}

impl From<SshKeyEnvelope> for SshKey {
    fn from(envelope: SshKeyEnvelope) -> Self {
        SshKey {
            id: envelope.key.id,
            text: envelope.key.text,
            label: envelope.key.label,
            algorithm: envelope.key.algorithm,
            length: envelope.key.length,
            permission: envelope.permission,
        }
    }
}

impl From<&SshKey> for SshKeyEnvelope {
    /// The id is assigned by the server, so it is never sent.
    fn from(key: &SshKey) -> Self {
        SshKeyEnvelope {
            key: SshKeyDetails {
                id: None,
                text: key.text.clone(),
                label: key.label.clone(),
                algorithm: key.algorithm.clone(),
                length: key.length,
            },
            permission: key.permission,
        }
    }
}
