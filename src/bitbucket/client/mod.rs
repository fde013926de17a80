//! HTTP plumbing shared by all endpoints: client configuration and the paged transport.

pub mod config;
pub mod transport;

/// Name of the API serving HTTP access tokens.
pub const ACCESS_TOKENS_API: &str = "access-tokens";
/// Name of the API serving SSH access keys.
pub const KEYS_API: &str = "keys";
/// Name of the core REST API (projects, repositories, users...).
pub const CORE_API: &str = "api";
