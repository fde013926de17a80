use serde::Deserialize;
use serde::Serialize;

use crate::bitbucket::json::datetime::DateTime;
use crate::bitbucket::json::event::EventKey;

/// A repository webhook registration.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Webhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub name: String,
    #[serde(rename = "createdDate", skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime>,
    #[serde(rename = "updatedDate", skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime>,
    pub events: Vec<EventKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub configuration: Option<WebhookConfiguration>,
    pub url: String,
    pub active: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookConfiguration {
    /// Shared secret the server signs deliveries with (`X-Hub-Signature`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}
