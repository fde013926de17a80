//! Typed wrappers over Bitbucket Server's REST resources.
//!
//! Handlers are borrowed from a [`Client`] (`client.repositories()`, `client.pull_requests()`, ...)
//! and do nothing but compose a resource path, pick the verb and API, and hand the call over to
//! the transport. Every operation returns the decoded resource together with the [`Response`]
//! (status, headers and page cursor) it came in.
//!
//! [`Response`]: crate::bitbucket::client::transport::Response

use crate::bitbucket::client::transport::Client;

pub mod access_tokens;
pub mod branches;
pub mod commits;
pub mod keys;
pub mod projects;
pub mod pull_requests;
pub mod repositories;
pub mod users;
pub mod webhooks;

use self::access_tokens::AccessTokensHandler;
use self::branches::BranchesHandler;
use self::commits::CommitsHandler;
use self::keys::KeysHandler;
use self::projects::ProjectsHandler;
use self::pull_requests::PullRequestsHandler;
use self::repositories::RepositoriesHandler;
use self::users::UsersHandler;
use self::webhooks::WebhooksHandler;

impl Client {
    /// HTTP access tokens of repositories and users.
    pub fn access_tokens(&self) -> AccessTokensHandler<'_> {
        AccessTokensHandler::new(self)
    }

    /// SSH access keys of repositories.
    pub fn keys(&self) -> KeysHandler<'_> {
        KeysHandler::new(self)
    }

    pub fn projects(&self) -> ProjectsHandler<'_> {
        ProjectsHandler::new(self)
    }

    pub fn repositories(&self) -> RepositoriesHandler<'_> {
        RepositoriesHandler::new(self)
    }

    pub fn branches(&self) -> BranchesHandler<'_> {
        BranchesHandler::new(self)
    }

    /// Commits, their changes and their build statuses.
    pub fn commits(&self) -> CommitsHandler<'_> {
        CommitsHandler::new(self)
    }

    pub fn pull_requests(&self) -> PullRequestsHandler<'_> {
        PullRequestsHandler::new(self)
    }

    /// Webhook registrations of repositories.
    pub fn webhooks(&self) -> WebhooksHandler<'_> {
        WebhooksHandler::new(self)
    }

    pub fn users(&self) -> UsersHandler<'_> {
        UsersHandler::new(self)
    }
}

/// `projects/{project}/repos/{repository}`, the prefix of every repository-scoped resource.
pub(crate) fn repository_path(project_key: &str, repository_slug: &str) -> String {
    format!("projects/{}/repos/{}", project_key, repository_slug)
}
