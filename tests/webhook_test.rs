mod common;

use http::Request;
use stashcrab::bitbucket::json::event::{EventKey, RepositoryPushEventChangeType, RepositoryPushEventRefType};
use stashcrab::bitbucket::webhook::{
    delivery_id, sign_payload, validate_signature, EVENT_ID_HEADER, EVENT_KEY_HEADER, SIGNATURE_HEADER,
};
use stashcrab::{parse_payload, parse_payload_without_signature, Event, StashError};

use crate::common::init_logger;

const SECRET: &[u8] = b"webhook-secret";
const PUSH_EVENT: &str = include_str!("fixtures/repo_push_event.json");
const PR_OPENED_EVENT: &str = include_str!("fixtures/pr_opened_event.json");

/// A delivery as Bitbucket would send it, signed with `key`.
fn delivery<'a>(event_key: &str, body: &'a str, key: &[u8]) -> Request<&'a [u8]> {
    Request::post("/hooks/bitbucket")
        .header(EVENT_ID_HEADER, "e2d0a9a0-7f2f-4d4b-b5b6-2f1a0c8a9b11")
        .header(EVENT_KEY_HEADER, event_key)
        .header(SIGNATURE_HEADER, sign_payload(body.as_bytes(), key))
        .body(body.as_bytes())
        .unwrap()
}

#[test]
fn push_event_is_verified_and_decoded() {
    init_logger();

    let (event, raw) = parse_payload(delivery("repo:refs_changed", PUSH_EVENT, SECRET), SECRET).unwrap();

    assert_eq!(raw, PUSH_EVENT.as_bytes());
    assert_eq!(event.event_key(), EventKey::RepoRefsChanged);
    assert_eq!(event.header().actor.name, "admin");
    assert_eq!(
        event.header().date.map(|date| date.to_string()).as_deref(),
        Some("2023-01-13T22:26:25+1100")
    );

    match event {
        Event::RepositoryPush(push) => {
            assert_eq!(push.repository.slug, "rep_1");
            assert_eq!(push.changes.len(), 1);

            let change = &push.changes[0];
            assert_eq!(change.change_type, RepositoryPushEventChangeType::Update);
            assert_eq!(change.git_ref.ref_type, RepositoryPushEventRefType::Branch);
            assert_eq!(change.ref_id, "refs/heads/master");
            assert_eq!(change.from_hash, "197a3e0d2f9a2b3ed1c4fe5923d5dd701bee9fdd");
            assert_eq!(change.to_hash, "a00945762949b7b787ecabc388c0e20b1b85f0b4");

            let to_commit = push.to_commit.as_ref().unwrap();
            assert_eq!(to_commit.id, "a00945762949b7b787ecabc388c0e20b1b85f0b4");
            assert_eq!(to_commit.parents[0].id, "197a3e0d2f9a2b3ed1c4fe5923d5dd701bee9fdd");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[test]
fn pull_request_event_is_verified_and_decoded() {
    let (event, _) = parse_payload(delivery("pr:opened", PR_OPENED_EVENT, SECRET), SECRET).unwrap();

    match event {
        Event::PullRequest(pr) => {
            assert_eq!(pr.header.event_key, EventKey::PullRequestOpened);
            assert_eq!(pr.pull_request.id, 1);
            assert_eq!(pr.pull_request.title, "a new file added");
            assert_eq!(pr.pull_request.source.latest_commit, "ef8755f06ee4b28c96a847a95cb8ec8ed6ddd1ca");
            assert_eq!(pr.pull_request.target.latest_commit, "178864a7d521b6f5e720b386b2c2b0ef8563e0dc");
            assert_eq!(pr.pull_request.author.user.name, "admin");
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[test]
fn every_pull_request_key_dispatches_to_pull_request_event() {
    for key in &[
        "pr:opened",
        "pr:from_ref_updated",
        "pr:modified",
        "pr:merged",
        "pr:declined",
        "pr:deleted",
    ] {
        let (event, _) = parse_payload(delivery(key, PR_OPENED_EVENT, SECRET), SECRET).unwrap();
        assert!(matches!(event, Event::PullRequest(_)), "[{}] dispatched to {:?}", key, event);
    }
}

#[test]
fn wrong_secret_is_a_mismatch() {
    let err = parse_payload(delivery("repo:refs_changed", PUSH_EVENT, b"some-other-secret"), SECRET).unwrap_err();

    assert!(matches!(err, StashError::SignatureMismatchError), "{:?}", err);
}

#[test]
fn tampered_body_is_a_mismatch() {
    let signed = delivery("repo:refs_changed", PUSH_EVENT, SECRET);
    let (parts, _) = signed.into_parts();
    let tampered = PUSH_EVENT.replace("rep_1", "rep_2");
    let request = Request::from_parts(parts, tampered.as_bytes());

    let err = parse_payload(request, SECRET).unwrap_err();
    assert!(matches!(err, StashError::SignatureMismatchError), "{:?}", err);
}

#[test]
fn unknown_event_key_is_unsupported() {
    let body = "this is not even JSON";
    let err = parse_payload(delivery("repo:exploded", body, SECRET), SECRET).unwrap_err();

    match err {
        StashError::UnsupportedEventTypeError(key) => assert_eq!(key, "repo:exploded"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn signature_is_checked_before_event_key() {
    let request = delivery("repo:exploded", "{}", b"some-other-secret");

    let err = parse_payload(request, SECRET).unwrap_err();
    assert!(matches!(err, StashError::SignatureMismatchError), "{:?}", err);
}

#[test]
fn missing_signature_is_a_format_error() {
    let request = Request::post("/hooks/bitbucket")
        .header(EVENT_KEY_HEADER, "repo:refs_changed")
        .body(PUSH_EVENT.as_bytes())
        .unwrap();

    let err = parse_payload(request, SECRET).unwrap_err();
    assert!(matches!(err, StashError::SignatureFormatError(_)), "{:?}", err);
}

#[test]
fn unsigned_deliveries_can_skip_verification() {
    let request = Request::post("/hooks/bitbucket")
        .header(EVENT_KEY_HEADER, "pr:merged")
        .body(PR_OPENED_EVENT.as_bytes())
        .unwrap();

    let (event, raw) = parse_payload_without_signature(request).unwrap();

    assert!(matches!(event, Event::PullRequest(_)));
    assert_eq!(raw.len(), PR_OPENED_EVENT.len());
}

#[test]
fn signature_can_be_validated_on_its_own() {
    let request = delivery("repo:refs_changed", PUSH_EVENT, SECRET);

    assert_eq!(delivery_id(request.headers()), Some("e2d0a9a0-7f2f-4d4b-b5b6-2f1a0c8a9b11"));
    assert!(validate_signature(request.headers(), PUSH_EVENT.as_bytes(), SECRET).is_ok());
    assert!(matches!(
        validate_signature(request.headers(), b"{}", SECRET),
        Err(StashError::SignatureMismatchError)
    ));
}

#[test]
fn payload_shape_mismatch_is_a_decode_error() {
    let body = r#"{"eventKey":"repo:refs_changed","date":"not a date"}"#;
    let err = parse_payload(delivery("repo:refs_changed", body, SECRET), SECRET).unwrap_err();

    match err {
        StashError::PayloadDecodeError { event_key, .. } => assert_eq!(event_key, "repo:refs_changed"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn delivery_without_date_still_decodes() {
    let mut body: serde_json::Value = serde_json::from_str(PR_OPENED_EVENT).unwrap();
    body.as_object_mut().unwrap().remove("date");
    let body = body.to_string();

    let (event, _) = parse_payload(delivery("pr:opened", &body, SECRET), SECRET).unwrap();

    assert_eq!(event.event_key(), EventKey::PullRequestOpened);
    assert!(event.header().date.is_none());
    assert_eq!(event.header().actor.name, "admin");
}
