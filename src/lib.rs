//! # stashcrab
//!
//! A typed client for the Bitbucket Server REST API (projects, repositories, branches, commits,
//! pull requests, webhooks, access tokens, SSH keys and users), plus a verifier/dispatcher for
//! the webhook deliveries Bitbucket sends back.
//!
//! ### Usage example:
//!
//! ```rust,no_run
//! use stashcrab::{Client, ListOptions};
//!
//! # async fn run() -> Result<(), stashcrab::StashError> {
//! let client = Client::builder("https://git.example.com")
//!     .basic_auth("api-user", "api-password")
//!     .build()?;
//!
//! let (repos, response) = client
//!     .repositories()
//!     .list_repositories("PRJ", Some(&ListOptions { limit: 50, start: 0 }))
//!     .await?;
//!
//! println!("{} repositories, last page = {:?}", repos.len(), response.page.map(|p| p.is_last_page));
//! # Ok(())
//! # }
//! ```

pub mod error;

#[path = "metadata.rs"]
mod stash_metadata;

pub mod bitbucket;

pub use crate::bitbucket::client::config::{ClientBuilder, ClientConfig, Credentials};
pub use crate::bitbucket::client::transport::{Client, Response};
pub use crate::bitbucket::json::page::{ListOptions, Page, PageQuery, PagedList, Paginated};
pub use crate::bitbucket::webhook::{parse_payload, parse_payload_without_signature, Event};
pub use crate::error::{ContentKind, ErrorMessage, ErrorResponse, StashError};
pub use tokio_util::sync::CancellationToken;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, StashError>;
