//! The paged request/response core every endpoint goes through.
//!
//! A request is built against `{base}/{api_name}/{api_version}/{path}`, carries the configured
//! credentials, `Accept`/`User-Agent` headers and (optionally) a JSON body, and is executed exactly
//! once: nothing here retries. Non-2xx responses become [`ErrorResponse`]s; 2xx bodies are decoded
//! into the caller's target and, if the target is [`Paginated`], its page cursor is surfaced
//! through [`Response::page`].

use std::future::Future;

use log::{debug, trace, warn};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Request, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use stashcrab_macros::stash_trace_time;
use tokio_util::sync::CancellationToken;

use crate::bitbucket::client::config::{ClientBuilder, ClientConfig, Credentials};
use crate::bitbucket::json::page::{Page, PageQuery, Paginated};
use crate::error::{ErrorBody, ErrorResponse, StashError};
use crate::nested;

const APPLICATION_JSON: &str = "application/json";

/// What the server answered with, besides the decoded body.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Set when the decoded body reports a page cursor.
    pub page: Option<Page>,
}

/// A Bitbucket Server REST client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    credentials: Option<Credentials>,
    config: ClientConfig,
    cancellation: Option<CancellationToken>,
}

impl Client {
    pub(crate) fn new(
        http: reqwest::Client, base_url: Url, credentials: Option<Credentials>, config: ClientConfig,
    ) -> Self {
        Client {
            http,
            base_url,
            credentials,
            config,
            cancellation: None,
        }
    }

    /// Starts configuring a client for the server living at `base_url` (ie: `https://git.example.com`).
    pub fn builder(base_url: &str) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    /// Returns a handle whose in-flight and future requests abort with a
    /// [`StashError::TransportError`] as soon as `token` is cancelled.
    pub fn with_cancellation(&self, token: CancellationToken) -> Client {
        Client {
            cancellation: Some(token),
            ..self.clone()
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds a request for `{base}/{api_name}/{api_version}/{path}`, with `body` (if any) serialized
    /// as JSON.
    pub fn build_request<B>(
        &self, method: Method, api_name: &str, path: &str, body: Option<&B>,
    ) -> Result<Request, StashError>
    where
        B: Serialize + ?Sized,
    {
        let raw_url = format!(
            "{base}/{api}/{version}/{path}",
            base = self.base_url.as_str().trim_end_matches('/'),
            api = api_name,
            version = self.config.api_version,
            path = path.trim_start_matches('/')
        );
        let url = Url::parse(&raw_url).map_err(|e| {
            trace!("Error = {:?}", e);
            StashError::RequestBuildError {
                msg: format!("Invalid request URL [{}].", raw_url),
                nested: nested!(e),
            }
        })?;

        let mut builder = self
            .http
            .request(method, url)
            .timeout(self.config.timeout)
            .header(ACCEPT, HeaderValue::from_static(APPLICATION_JSON))
            .header(USER_AGENT, self.config.user_agent.as_str());

        builder = match &self.credentials {
            Some(Credentials::Basic { username, password }) => builder.basic_auth(username, Some(password)),
            Some(Credentials::Bearer(token)) => builder.bearer_auth(token),
            None => builder,
        };

        if let Some(body) = body {
            let json = serde_json::to_vec(body).map_err(|e| {
                trace!("Error = {:?}", e);
                StashError::RequestBuildError {
                    msg: format!("Could not serialize request body for [{}].", raw_url),
                    nested: nested!(e),
                }
            })?;
            builder = builder.header(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON)).body(json);
        }

        builder.build().map_err(|e| {
            trace!("Error = {:?}", e);
            StashError::RequestBuildError {
                msg: format!("Could not build request for [{}].", raw_url),
                nested: nested!(e),
            }
        })
    }

    /// Sends `request` and decodes a successful body into `T`. An empty body yields `T::default()`.
    #[stash_trace_time]
    pub async fn execute<T>(&self, request: Request) -> Result<(T, Response), StashError>
    where
        T: DeserializeOwned + Default + Paginated,
    {
        let method = request.method().clone();
        let url = request.url().clone();
        let (status, headers, body) = self.cancellable(&url, self.round_trip(request, true)).await?;
        let raw_response_text = body.unwrap_or_default();

        let target: T = if raw_response_text.trim().is_empty() {
            trace!("Empty body received for [{} {}].", method, url);
            T::default()
        } else {
            serde_json::from_str(&raw_response_text).map_err(|e| {
                trace!("Error = {:?}", e);
                trace!("Raw response = {}", raw_response_text);
                StashError::JsonParseError {
                    msg: format!("Error mapping JSON response of [{} {}].", method, url),
                    nested: nested!(e),
                }
            })?
        };

        let page = target.page();
        Ok((target, Response { status, headers, page }))
    }

    /// Sends `request` without ever reading the response body; for calls whose answer carries
    /// nothing of interest (deletes, status updates).
    #[stash_trace_time]
    pub async fn execute_empty(&self, request: Request) -> Result<Response, StashError> {
        let url = request.url().clone();
        let (status, headers, _) = self.cancellable(&url, self.round_trip(request, false)).await?;

        Ok(Response {
            status,
            headers,
            page: None,
        })
    }

    /// Body-less request with the paging (and filtering) query parameters of `opts` applied.
    /// `limit`/`start` are only sent when non-zero, leaving the server defaults in place otherwise.
    pub async fn execute_paged<T, O>(
        &self, method: Method, api_name: &str, path: &str, opts: Option<&O>,
    ) -> Result<(T, Response), StashError>
    where
        T: DeserializeOwned + Default + Paginated,
        O: PageQuery + ?Sized,
    {
        let mut request = self.build_request(method, api_name, path, None::<&()>)?;

        if let Some(opts) = opts {
            let pairs = paging_query(opts);
            if !pairs.is_empty() {
                request.url_mut().query_pairs_mut().extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())));
            }
        }

        self.execute(request).await
    }

    pub async fn get<T>(&self, api_name: &str, path: &str) -> Result<(T, Response), StashError>
    where
        T: DeserializeOwned + Default + Paginated,
    {
        let request = self.build_request(Method::GET, api_name, path, None::<&()>)?;
        self.execute(request).await
    }

    pub async fn get_paged<T, O>(
        &self, api_name: &str, path: &str, opts: Option<&O>,
    ) -> Result<(T, Response), StashError>
    where
        T: DeserializeOwned + Default + Paginated,
        O: PageQuery + ?Sized,
    {
        self.execute_paged(Method::GET, api_name, path, opts).await
    }

    pub async fn send_json<B, T>(
        &self, method: Method, api_name: &str, path: &str, body: &B,
    ) -> Result<(T, Response), StashError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned + Default + Paginated,
    {
        let request = self.build_request(method, api_name, path, Some(body))?;
        self.execute(request).await
    }

    /// `DELETE`; the server answers `204 No Content`.
    pub async fn delete(&self, api_name: &str, path: &str) -> Result<Response, StashError> {
        let request = self.build_request(Method::DELETE, api_name, path, None::<&()>)?;
        self.execute_empty(request).await
    }

    /// Races `call` against this handle's cancellation token, if any.
    async fn cancellable<F, R>(&self, url: &Url, call: F) -> Result<R, StashError>
    where
        F: Future<Output = Result<R, StashError>>,
    {
        match &self.cancellation {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("Request to [{}] cancelled.", url);
                        Err(StashError::TransportError {
                            msg: format!("Request to [{}] was cancelled.", url),
                            nested: anyhow::anyhow!("operation cancelled"),
                        })
                    }
                    result = call => result,
                }
            }
            None => call.await,
        }
    }

    /// One HTTP exchange: send, check the status, optionally read the body as text.
    async fn round_trip(
        &self, request: Request, read_body: bool,
    ) -> Result<(StatusCode, HeaderMap, Option<String>), StashError> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!("{} {}", method, url);

        let response = self.http.execute(request).await.map_err(|e| {
            trace!("Error = {:?}", e);
            StashError::TransportError {
                msg: format!("Error calling [{} {}].", method, url),
                nested: nested!(e),
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        trace!("{} {} answered {}", method, url, status);

        if !status.is_success() {
            // the error body is best-effort; the status alone is enough to fail on -
            let errors = match response.text().await {
                Ok(raw) if !raw.trim().is_empty() => match serde_json::from_str::<ErrorBody>(&raw) {
                    Ok(body) => body.errors,
                    Err(e) => {
                        trace!("Error = {:?}", e);
                        trace!("Raw response = {}", raw);
                        Vec::new()
                    }
                },
                Ok(_) => Vec::new(),
                Err(e) => {
                    warn!("Could not read error body of [{} {}]: {}", method, url, e);
                    Vec::new()
                }
            };

            return Err(ErrorResponse {
                method,
                url,
                status,
                headers,
                errors,
            }
            .into());
        }

        if !read_body {
            return Ok((status, headers, None));
        }

        let raw_response_text = response.text().await.map_err(|e| {
            trace!("Error = {:?}", e);
            StashError::TransportError {
                msg: format!("Error reading response body of [{} {}].", method, url),
                nested: nested!(e),
            }
        })?;

        Ok((status, headers, Some(raw_response_text)))
    }
}

/// `limit`/`start` (when non-zero) followed by the resource-specific filters.
fn paging_query<O>(opts: &O) -> Vec<(&'static str, String)>
where
    O: PageQuery + ?Sized,
{
    let list = opts.list_options();
    let mut pairs = Vec::new();
    if list.limit != 0 {
        pairs.push(("limit", list.limit.to_string()));
    }
    if list.start != 0 {
        pairs.push(("start", list.start.to_string()));
    }
    pairs.extend(opts.query_pairs());
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitbucket::json::page::ListOptions;

    fn client() -> Client {
        Client::builder("http://git.example.com/rest/").basic_auth("admin", "secret").build().unwrap()
    }

    #[test]
    fn url_is_base_api_version_path() {
        let request = client().build_request(Method::GET, "api", "projects/PRJ/repos", None::<&()>).unwrap();

        assert_eq!(request.url().as_str(), "http://git.example.com/rest/api/latest/projects/PRJ/repos");
        assert_eq!(request.headers()[ACCEPT], APPLICATION_JSON);
        assert!(request.headers()[USER_AGENT].to_str().unwrap().starts_with("stashcrab/"));
        assert_eq!(request.headers()[reqwest::header::AUTHORIZATION], "Basic YWRtaW46c2VjcmV0");
        assert!(request.headers().get(CONTENT_TYPE).is_none());
        assert!(request.body().is_none());
    }

    #[test]
    fn json_body_is_not_html_escaped() {
        let body = serde_json::json!({ "url": "https://ci.example.com/build?a=1&b=<2>" });
        let request = client().build_request(Method::POST, "api", "x", Some(&body)).unwrap();

        assert_eq!(request.headers()[CONTENT_TYPE], APPLICATION_JSON);
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        assert_eq!(std::str::from_utf8(bytes).unwrap(), r#"{"url":"https://ci.example.com/build?a=1&b=<2>"}"#);
    }

    #[test]
    fn zero_paging_values_are_left_out() {
        assert!(paging_query(&ListOptions::default()).is_empty());
        assert_eq!(
            paging_query(&ListOptions { limit: 0, start: 25 }),
            vec![("start", "25".to_string())]
        );
        assert_eq!(
            paging_query(&ListOptions { limit: 100, start: 0 }),
            vec![("limit", "100".to_string())]
        );
    }
}
