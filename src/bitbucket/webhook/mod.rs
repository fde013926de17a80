//! Verifier and dispatcher for the webhook deliveries Bitbucket Server POSTs back.
//!
//! A delivery is processed in a straight line, failing at the first problem:
//!
//! 1. the body is read, up to [`MAX_PAYLOAD_SIZE`];
//! 2. its `X-Hub-Signature` is checked against the shared secret (skipped by
//!    [`parse_payload_without_signature`]);
//! 3. `X-Event-Key` picks the [`Event`] variant;
//! 4. the body is decoded into it.
//! <br/><br/>
//!
//! ### Usage example:
//!
//! ```rust,no_run
//! use stashcrab::{parse_payload, Event};
//!
//! fn on_delivery(request: http::Request<&[u8]>) -> Result<(), stashcrab::StashError> {
//!     let (event, _raw) = parse_payload(request, b"webhook-secret")?;
//!     match event {
//!         Event::RepositoryPush(push) => println!("push to {}", push.repository.slug),
//!         Event::PullRequest(pr) => println!("{}: PR #{}", pr.header.event_key, pr.pull_request.id),
//!     }
//!     Ok(())
//! }
//! ```

use std::io::Read;
use std::str::FromStr;

use http::{HeaderMap, Request};
use log::{debug, trace, warn};

use crate::bitbucket::json::event::{EventHeader, EventKey, PullRequestEvent, RepositoryPushEvent};
use crate::error::StashError;
use crate::nested;

pub mod signature;

pub use self::signature::{sign_payload, verify_signature};

/// Unique id of a delivery; informational only.
pub const EVENT_ID_HEADER: &str = "X-Request-Id";
pub const EVENT_KEY_HEADER: &str = "X-Event-Key";
pub const SIGNATURE_HEADER: &str = "X-Hub-Signature";

/// Payload bytes read from a delivery (10 MiB). Anything past it is dropped.
pub const MAX_PAYLOAD_SIZE: u64 = 10 * 1024 * 1024;

/// A decoded webhook delivery.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// `repo:refs_changed`
    RepositoryPush(Box<RepositoryPushEvent>),
    /// `pr:opened`, `pr:from_ref_updated`, `pr:modified`, `pr:merged`, `pr:declined`, `pr:deleted`
    PullRequest(Box<PullRequestEvent>),
}

impl Event {
    pub fn header(&self) -> &EventHeader {
        match self {
            Event::RepositoryPush(event) => &event.header,
            Event::PullRequest(event) => &event.header,
        }
    }

    pub fn event_key(&self) -> EventKey {
        self.header().event_key
    }
}

/// Reads, authenticates and decodes a delivery. Returns the event along with the raw payload it was
/// decoded from. The request body is consumed.
pub fn parse_payload<B: Read>(request: Request<B>, key: &[u8]) -> Result<(Event, Vec<u8>), StashError> {
    let (parts, body) = request.into_parts();
    let payload = read_payload(body)?;

    validate_signature(&parts.headers, &payload, key)?;

    let event = decode_event(&parts.headers, &payload)?;
    Ok((event, payload))
}

/// Same as [`parse_payload`], minus the signature check; for hooks configured without a secret.
pub fn parse_payload_without_signature<B: Read>(request: Request<B>) -> Result<(Event, Vec<u8>), StashError> {
    let (parts, body) = request.into_parts();
    let payload = read_payload(body)?;

    let event = decode_event(&parts.headers, &payload)?;
    Ok((event, payload))
}

/// Checks the `X-Hub-Signature` of a delivery against its raw `payload`.
pub fn validate_signature(headers: &HeaderMap, payload: &[u8], key: &[u8]) -> Result<(), StashError> {
    let signature = match headers.get(SIGNATURE_HEADER) {
        Some(value) => value
            .to_str()
            .map_err(|_| StashError::SignatureFormatError("signature is not visible ASCII".to_string()))?,
        None => return Err(StashError::SignatureFormatError("no signature found".to_string())),
    };

    verify_signature(signature, payload, key).map_err(|e| {
        debug!("Webhook delivery [{}] failed signature validation: {}", delivery_id(headers).unwrap_or("-"), e);
        e
    })
}

/// `X-Request-Id` of a delivery, if present.
pub fn delivery_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(EVENT_ID_HEADER).and_then(|value| value.to_str().ok())
}

fn read_payload<B: Read>(body: B) -> Result<Vec<u8>, StashError> {
    let mut payload = Vec::new();
    body.take(MAX_PAYLOAD_SIZE + 1)
        .read_to_end(&mut payload)
        .map_err(|e| StashError::PayloadReadError { nested: nested!(e) })?;

    if payload.len() as u64 > MAX_PAYLOAD_SIZE {
        warn!(
            "Webhook payload exceeds {} bytes and was truncated; signature validation and decoding will most likely fail.",
            MAX_PAYLOAD_SIZE
        );
        payload.truncate(MAX_PAYLOAD_SIZE as usize);
    }

    Ok(payload)
}

fn decode_event(headers: &HeaderMap, payload: &[u8]) -> Result<Event, StashError> {
    let raw_key = match headers.get(EVENT_KEY_HEADER) {
        Some(value) => String::from_utf8_lossy(value.as_bytes()).into_owned(),
        None => return Err(StashError::MissingEventKeyError),
    };
    if raw_key.is_empty() {
        return Err(StashError::MissingEventKeyError);
    }

    let event_key = EventKey::from_str(&raw_key).map_err(|_| StashError::UnsupportedEventTypeError(raw_key.clone()))?;
    trace!("Decoding [{}] delivery [{}]...", event_key, delivery_id(headers).unwrap_or("-"));

    match event_key {
        EventKey::RepoRefsChanged => decode(event_key, payload).map(|event| Event::RepositoryPush(Box::new(event))),
        EventKey::PullRequestOpened
        | EventKey::PullRequestFromRefUpdated
        | EventKey::PullRequestModified
        | EventKey::PullRequestDeclined
        | EventKey::PullRequestDeleted
        | EventKey::PullRequestMerged => decode(event_key, payload).map(|event| Event::PullRequest(Box::new(event))),
        _ => Err(StashError::UnsupportedEventTypeError(raw_key)),
    }
}

fn decode<T: serde::de::DeserializeOwned>(event_key: EventKey, payload: &[u8]) -> Result<T, StashError> {
    serde_json::from_slice(payload).map_err(|e| {
        trace!("Error = {:?}", e);
        trace!("Raw payload = {}", String::from_utf8_lossy(payload));
        StashError::PayloadDecodeError {
            event_key: event_key.to_string(),
            nested: nested!(e),
        }
    })
}
