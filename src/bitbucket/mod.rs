//! Bitbucket Server's wrappers: a paged REST [`Client`](client::transport::Client), the typed
//! [`endpoints`] layered on top of it, the [`json`] models they speak and the inbound [`webhook`]
//! verifier/dispatcher.

pub mod json;

pub mod client;

pub mod endpoints;

pub mod webhook;
