//! Construction-time settings of a [`Client`].
//!
//! Everything here is fixed once [`ClientBuilder::build`] returns; a client never mutates its own
//! configuration afterwards. Clone the builder (or the client) to talk to a second server.
//! <br/><br/>
//!
//! ### Usage example:
//!
//! ```rust,no_run
//! use std::time::Duration;
//!
//! use stashcrab::{Client, ClientConfig};
//!
//! # fn build() -> Result<Client, stashcrab::StashError> {
//! let client = Client::builder("https://git.example.com/rest")
//!     .bearer_auth("MY_HTTP_ACCESS_TOKEN")
//!     .config(ClientConfig {
//!         timeout: Duration::from_secs(10),
//!         ..ClientConfig::default()
//!     })
//!     .build()?;
//! # Ok(client)
//! # }
//! ```

use std::fmt::{Debug, Formatter};
use std::time::Duration;

use log::{debug, trace};
use reqwest::Url;

use crate::bitbucket::client::transport::Client;
use crate::error::StashError;
use crate::nested;
use crate::stash_metadata;

/// API version segment used unless configured otherwise.
pub const DEFAULT_API_VERSION: &str = "latest";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Version segment of every URL: `{base}/{api}/{api_version}/{path}`.
    pub api_version: String,
    /// `User-Agent` header; defaults to `stashcrab/<version>`.
    pub user_agent: String,
    /// Per-request timeout, connection through last body byte. Expiry surfaces as a
    /// [`StashError::TransportError`].
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: stash_metadata::default_user_agent(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Credentials written into the `Authorization` header of every request.
#[derive(Clone, PartialEq)]
pub enum Credentials {
    Basic { username: String, password: String },
    /// HTTP access token (personal, project or repository).
    Bearer(String),
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // secrets stay out of logs -
        match self {
            Credentials::Basic { username, .. } => {
                f.debug_struct("Basic").field("username", username).field("password", &"***").finish()
            }
            Credentials::Bearer(_) => f.debug_tuple("Bearer").field(&"***").finish(),
        }
    }
}

/// Builder for [`Client`]s; see [`Client::builder`].
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    http_client: Option<reqwest::Client>,
    config: ClientConfig,
}

impl ClientBuilder {
    pub(crate) fn new(base_url: &str) -> Self {
        ClientBuilder {
            base_url: base_url.to_string(),
            credentials: None,
            http_client: None,
            config: ClientConfig::default(),
        }
    }

    pub fn basic_auth(mut self, username: &str, password: &str) -> Self {
        self.credentials = Some(Credentials::Basic {
            username: username.to_string(),
            password: password.to_string(),
        });
        self
    }

    pub fn bearer_auth(mut self, token: &str) -> Self {
        self.credentials = Some(Credentials::Bearer(token.to_string()));
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Hands in a pre-configured [`reqwest::Client`] (proxies, custom root certificates, ...). Its
    /// connection pool is shared with every clone of the resulting [`Client`].
    pub fn http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = Some(http_client);
        self
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Validates the base URL and assembles the [`Client`].
    pub fn build(self) -> Result<Client, StashError> {
        let base_url = Url::parse(&self.base_url).map_err(|e| {
            trace!("Error = {:?}", e);
            StashError::RequestBuildError {
                msg: format!("Invalid Bitbucket base URL [{}].", self.base_url),
                nested: nested!(e),
            }
        })?;

        if base_url.cannot_be_a_base() {
            return Err(StashError::RequestBuildError {
                msg: format!("Bitbucket base URL [{}] cannot hold a path.", self.base_url),
                nested: anyhow::anyhow!("not a base URL"),
            });
        }

        let http_client = match self.http_client {
            Some(http_client) => http_client,
            None => reqwest::Client::builder().build().map_err(|e| {
                trace!("Error = {:?}", e);
                StashError::RequestBuildError {
                    msg: "Could not build HTTP client.".to_string(),
                    nested: nested!(e),
                }
            })?,
        };

        debug!(
            "Bitbucket client ready for [{}] (api version = {}, user agent = {}).",
            base_url, self.config.api_version, self.config.user_agent
        );

        Ok(Client::new(http_client, base_url, self.credentials, self.config))
    }
}
