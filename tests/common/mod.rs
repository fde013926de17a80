#![allow(dead_code)]

//! A scripted Bitbucket Server stand-in. Endpoints answer with the bodies they were handed, one per
//! call and in order; anything unmatched (or exhausted) gets Bitbucket's own `404` error body.

use serde_json::json;
use simplelog::{Config, LevelFilter, TestLogger};
use stashcrab::Client;
use wiremock::matchers::{any, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const USERNAME: &str = "admin";
pub const PASSWORD: &str = "secret";
/// `admin:secret`, base64'd.
pub const BASIC_AUTHORIZATION: &str = "Basic YWRtaW46c2VjcmV0";

/// Method plus an `httprouter`-style path, where `:name` segments match anything but a `/`.
#[derive(Debug, Clone, Copy)]
pub struct EndpointPattern {
    pub method: &'static str,
    pub pattern: &'static str,
}

impl EndpointPattern {
    pub fn path_regex(&self) -> String {
        let segments: Vec<&str> = self
            .pattern
            .split('/')
            .map(|segment| if segment.starts_with(':') { "[^/]+" } else { segment })
            .collect();
        format!("^{}$", segments.join("/"))
    }
}

pub const LIST_ACCESS_TOKENS_REPOSITORY: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/access-tokens/latest/projects/:projectKey/repos/:repositorySlug",
};
pub const CREATE_ACCESS_TOKEN_REPOSITORY: EndpointPattern = EndpointPattern {
    method: "PUT",
    pattern: "/access-tokens/latest/projects/:projectKey/repos/:repositorySlug",
};
pub const CREATE_ACCESS_TOKEN_USER: EndpointPattern = EndpointPattern {
    method: "PUT",
    pattern: "/access-tokens/latest/users/:userSlug",
};
pub const DELETE_ACCESS_TOKEN_USER: EndpointPattern = EndpointPattern {
    method: "DELETE",
    pattern: "/access-tokens/latest/users/:userSlug/:tokenId",
};

pub const LIST_KEYS_REPOSITORY: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/keys/latest/projects/:projectKey/repos/:repositorySlug/ssh",
};
pub const CREATE_KEY_REPOSITORY: EndpointPattern = EndpointPattern {
    method: "POST",
    pattern: "/keys/latest/projects/:projectKey/repos/:repositorySlug/ssh",
};

pub const LIST_PROJECTS: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects",
};
pub const SEARCH_PROJECT_PERMISSIONS: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/permissions/search",
};
pub const SEARCH_REPOSITORIES: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/repos",
};
pub const LIST_REPOSITORIES: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos",
};
pub const GET_REPOSITORY: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug",
};
pub const CREATE_REPOSITORY: EndpointPattern = EndpointPattern {
    method: "POST",
    pattern: "/api/latest/projects/:projectKey/repos",
};
pub const DELETE_REPOSITORY: EndpointPattern = EndpointPattern {
    method: "DELETE",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug",
};
pub const LIST_FILES: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/files/:path",
};
pub const BROWSE: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/browse/:path",
};
pub const SEARCH_BRANCHES: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/branches",
};
pub const GET_DEFAULT_BRANCH: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/branches/default",
};
pub const SEARCH_COMMITS: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/commits",
};
pub const GET_COMMIT: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/commits/:commitId",
};
pub const LIST_COMMIT_CHANGES: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/commits/:commitId/changes",
};
pub const CREATE_BUILD_STATUS: EndpointPattern = EndpointPattern {
    method: "POST",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/commits/:commitId/builds",
};
pub const COMPARE_CHANGES: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/compare/changes",
};
pub const SEARCH_PULL_REQUESTS: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/pull-requests",
};
pub const GET_PULL_REQUEST: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/pull-requests/:pullRequestId",
};
pub const LIST_PULL_REQUEST_CHANGES: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/pull-requests/:pullRequestId/changes",
};
pub const LIST_WEBHOOKS: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/webhooks",
};
pub const CREATE_WEBHOOK: EndpointPattern = EndpointPattern {
    method: "POST",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/webhooks",
};
pub const DELETE_WEBHOOK: EndpointPattern = EndpointPattern {
    method: "DELETE",
    pattern: "/api/latest/projects/:projectKey/repos/:repositorySlug/webhooks/:id",
};
pub const GET_USER: EndpointPattern = EndpointPattern {
    method: "GET",
    pattern: "/api/latest/users/:userSlug",
};

pub struct MockBackend {
    pub server: MockServer,
}

impl MockBackend {
    /// A backend knowing no endpoint at all: every call ends up in the `404` fallback.
    pub async fn start() -> Self {
        let server = MockServer::start().await;

        Mock::given(any())
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "errors": [{ "message": "Not Found" }] })),
            )
            .with_priority(u8::MAX)
            .mount(&server)
            .await;

        MockBackend { server }
    }

    /// Answers `endpoint` with `200` and each of `bodies` in turn; once they run out, the endpoint
    /// falls back to `404`.
    pub async fn with_request_match(&self, endpoint: EndpointPattern, bodies: &[&str]) -> &Self {
        for body in bodies {
            self.with_request_template(endpoint, ResponseTemplate::new(200).set_body_raw(*body, "application/json"))
                .await;
        }
        self
    }

    /// Answers `endpoint` once with `template`.
    pub async fn with_request_template(&self, endpoint: EndpointPattern, template: ResponseTemplate) -> &Self {
        Mock::given(method(endpoint.method))
            .and(path_regex(endpoint.path_regex()))
            .respond_with(template)
            .up_to_n_times(1)
            .mount(&self.server)
            .await;
        self
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// `admin:secret` client pointed at this backend.
    pub fn client(&self) -> Client {
        Client::builder(&self.uri())
            .basic_auth(USERNAME, PASSWORD)
            .build()
            .expect("mock backend URL is valid")
    }

    /// Query strings of every request received so far, in arrival order.
    pub async fn received_queries(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.query().unwrap_or_default().to_string())
            .collect()
    }

    /// Bodies of every request received so far, decoded as JSON.
    pub async fn received_json_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter(|request| !request.body.is_empty())
            .map(|request| serde_json::from_slice(&request.body).expect("request body is JSON"))
            .collect()
    }

    pub async fn received_paths(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|request| request.url.path().to_string())
            .collect()
    }
}

/// Routes the crate's logs to the test output. Safe to call from every test.
pub fn init_logger() {
    let _ = TestLogger::init(LevelFilter::Trace, Config::default());
}
