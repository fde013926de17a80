//! JSON wrappers for Bitbucket Server's model objects, plus the paging envelope and timestamp codecs
//! they are built upon.

pub mod access_token;
pub mod branch;
pub mod build_status;
pub mod commit;
pub mod datetime;
pub mod event;
pub mod page;
pub mod permission;
pub mod project;
pub mod pull_request;
pub mod repository;
pub mod ssh_key;
pub mod user;
pub mod webhook;

// single resources; lists come wrapped in a `PagedList`, which reports its own page -
crate::impl_unpaged!(
    access_token::AccessToken,
    branch::Branch,
    build_status::BuildStatus,
    commit::Commit,
    pull_request::PullRequest,
    repository::Repository,
    ssh_key::SshKeyEnvelope,
    user::User,
    webhook::Webhook,
);
