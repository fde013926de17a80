use serde::Deserialize;
use serde::Serialize;

use crate::bitbucket::json::datetime::DateTime;
use crate::bitbucket::json::permission::Permission;
use crate::bitbucket::json::user::User;

/// A personal or repository HTTP access token.
///
/// `token` (the secret itself) is only ever returned once, in the response to its creation.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessToken {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    pub permissions: Vec<Permission>,
    #[serde(rename = "createdDate", skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime>,
    #[serde(rename = "expiryDate", skip_serializing_if = "Option::is_none")]
    pub expire: Option<DateTime>,
    #[serde(rename = "expiryDays", skip_serializing_if = "Option::is_none")]
    pub expire_days: Option<u32>,
    #[serde(rename = "lastAuthenticated", skip_serializing_if = "Option::is_none")]
    pub last_authenticated: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}
