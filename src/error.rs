//!A universal, crate-wide error wrapper that is also able to retain the nested cause of an [`Error`].

use std::fmt::{Display, Formatter};

use itertools::Itertools;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StashError {
    // :# prints causes as well using anyhow's default formatting of causes
    #[error("Request build error: {msg}; nested = {nested:#}")]
    RequestBuildError {
        msg: String,
        #[source]
        nested: anyhow::Error,
    },
    #[error("Transport error: {msg}; nested = {nested:#}")]
    TransportError {
        msg: String,
        #[source]
        nested: anyhow::Error,
    },
    #[error(transparent)]
    ErrorResponse(#[from] ErrorResponse),
    #[error("JSON parse error: {msg}; nested = {nested:#}")]
    JsonParseError {
        msg: String,
        #[source]
        nested: anyhow::Error,
    },
    #[error("Webhook signature format invalid: {0}")]
    SignatureFormatError(String),
    #[error("Unsupported webhook signature algorithm: {0}")]
    UnsupportedAlgorithmError(String),
    #[error("Webhook signature does not match payload")]
    SignatureMismatchError,
    #[error("Webhook request carries no event key")]
    MissingEventKeyError,
    #[error("Webhook event type not supported: {0}")]
    UnsupportedEventTypeError(String),
    #[error("Unable to read webhook payload; nested = {nested:#}")]
    PayloadReadError {
        #[source]
        nested: anyhow::Error,
    },
    #[error("Unable to decode [{event_key}] webhook payload; nested = {nested:#}")]
    PayloadDecodeError {
        event_key: String,
        #[source]
        nested: anyhow::Error,
    },
    #[error("Only files with text content are supported, but [{path}] is a {kind}")]
    UnsupportedContentError { path: String, kind: ContentKind },
}

impl StashError {
    /// HTTP status of the underlying [`ErrorResponse`], if this error is one.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            StashError::ErrorResponse(response) => Some(response.status),
            _ => None,
        }
    }
}

/// What a text-content fetch found instead of line-oriented text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Binary,
    Directory,
}

impl Display for ContentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Binary => write!(f, "binary file"),
            ContentKind::Directory => write!(f, "directory"),
        }
    }
}

/// A single entry of a Bitbucket error body: `{ "errors": [ { "message": ... } ] }`.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_name: Option<String>,
}

#[derive(Default, Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub errors: Vec<ErrorMessage>,
}

/// Error returned for every non-2xx response from the server.
#[derive(Error, Debug, Clone)]
pub struct ErrorResponse {
    pub method: Method,
    pub url: Url,
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub errors: Vec<ErrorMessage>,
}

impl Display for ErrorResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}: {} [{}]",
            self.method,
            self.url,
            self.status,
            self.errors.iter().map(|e| e.message.as_str()).join(", ")
        )
    }
}

#[macro_export]
/// Wraps a dynamic error type into an [`anyhow::Error`]. Useful in a plethora of cases for constructing
/// [`StashError`]s.
macro_rules! nested {
    ($source:expr) => {
        anyhow::Error::new($source)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_renders_method_url_status_and_messages() {
        let response = ErrorResponse {
            method: Method::GET,
            url: Url::parse("http://git/api/latest/projects/PRJ/repos/repo").unwrap(),
            status: StatusCode::NOT_FOUND,
            headers: HeaderMap::new(),
            errors: vec![
                ErrorMessage { message: "Repository repo does not exist.".to_string(), ..Default::default() },
                ErrorMessage { message: "Try again".to_string(), ..Default::default() },
            ],
        };

        assert_eq!(
            response.to_string(),
            "GET http://git/api/latest/projects/PRJ/repos/repo: 404 Not Found [Repository repo does not exist., Try again]"
        );
    }

    #[test]
    fn status_is_only_reported_for_error_responses() {
        let err = StashError::SignatureMismatchError;
        assert_eq!(err.status(), None);

        let err: StashError = ErrorResponse {
            method: Method::DELETE,
            url: Url::parse("http://git/keys/latest").unwrap(),
            status: StatusCode::FORBIDDEN,
            headers: HeaderMap::new(),
            errors: Vec::new(),
        }
        .into();
        assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    }

    #[test]
    fn error_body_tolerates_unknown_fields() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"errors":[{"context":null,"message":"Authentication failed","exceptionName":"com.atlassian.AuthException","extra":1}]}"#,
        )
        .unwrap();

        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].message, "Authentication failed");
        assert_eq!(body.errors[0].exception_name.as_deref(), Some("com.atlassian.AuthException"));
    }
}
