use std::collections::HashMap;

use panelcore_context::Context;
use panelcore_sessions::Sessions;
use panelcore_sessions::SessionsFixture;

use super::Bridge;
use super::BridgeError;
use super::HttpMethod;
use super::LegacyReply;
use super::LegacyRequest;
use super::Modern;
use super::ModernFixture;
use super::ModernResponse;

fn request(params: &[(&str, &str)]) -> LegacyRequest {
    let params: HashMap<String, String> = params
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();
    LegacyRequest::from_params(params)
}

fn fixtures() -> (Bridge, SessionsFixture, ModernFixture) {
    let sessions = SessionsFixture::new();
    let modern = ModernFixture::new();
    let bridge = Bridge::with_default_endpoints(
        Sessions::from(sessions.backend()),
        Modern::from(modern.backend()),
    );
    (bridge, sessions, modern)
}

#[tokio::test]
async fn missing_hash_rejected() {
    let (bridge, _, _) = fixtures();
    let context = Context::fixture();
    let request = request(&[("f", "posts"), ("s", "delete_post"), ("post_id", "88")]);

    let reply = bridge.handle(&context, &request).await.unwrap();
    assert_eq!(reply, LegacyReply::Error(BridgeError::MissingCredential));
}

#[tokio::test]
async fn missing_hash_envelope_shape() {
    let (bridge, _, _) = fixtures();
    let context = Context::fixture();
    let request = request(&[("f", "posts"), ("s", "delete_post"), ("post_id", "88")]);

    let reply = bridge.handle(&context, &request).await.unwrap();
    let error = match reply {
        LegacyReply::Error(error) => error,
        reply => panic!("expected an error reply, got {:?}", reply),
    };
    assert_eq!(
        error.envelope(),
        serde_json::json!({
            "api_status": 400,
            "api_text": "failed",
            "errors": {
                "error_id": 1,
                "error_text": "Hash is required",
            },
        }),
    );
}

#[tokio::test]
async fn missing_post_id_rejected() {
    let (bridge, sessions, _) = fixtures();
    sessions.session("abc123", "7");
    let context = Context::fixture();
    let request = request(&[("f", "posts"), ("s", "delete_post"), ("hash", "abc123")]);

    let reply = bridge.handle(&context, &request).await.unwrap();
    let expected = BridgeError::MissingParameter {
        error_id: 5,
        text: "No post id sent.",
    };
    assert_eq!(reply, LegacyReply::Error(expected));
}

#[tokio::test]
async fn empty_post_id_rejected() {
    let (bridge, sessions, _) = fixtures();
    sessions.session("abc123", "7");
    let context = Context::fixture();
    let request = request(&[
        ("f", "posts"),
        ("s", "delete_post"),
        ("hash", "abc123"),
        ("post_id", ""),
    ]);

    let reply = bridge.handle(&context, &request).await.unwrap();
    let expected = BridgeError::MissingParameter {
        error_id: 5,
        text: "No post id sent.",
    };
    assert_eq!(reply, LegacyReply::Error(expected));
}

#[tokio::test]
async fn unknown_hash_rejected() {
    let (bridge, _, _) = fixtures();
    let context = Context::fixture();
    let request = request(&[
        ("f", "posts"),
        ("s", "delete_post"),
        ("hash", "nope"),
        ("post_id", "88"),
    ]);

    let reply = bridge.handle(&context, &request).await.unwrap();
    assert_eq!(reply, LegacyReply::Error(BridgeError::InvalidCredential));
}

#[tokio::test]
async fn transient_session_fault_rejected_as_invalid_hash() {
    let (bridge, sessions, modern) = fixtures();
    sessions.session("abc123", "7");
    sessions.fail_next();
    let context = Context::fixture();
    let request = request(&[
        ("f", "posts"),
        ("s", "delete_post"),
        ("hash", "abc123"),
        ("post_id", "88"),
    ]);

    let reply = bridge.handle(&context, &request).await.unwrap();
    assert_eq!(reply, LegacyReply::Error(BridgeError::InvalidCredential));
    assert!(modern.requests().is_empty());
}

#[tokio::test]
async fn valid_call_forwarded() {
    let (bridge, sessions, modern) = fixtures();
    sessions.session("abc123", "7");
    modern.respond_with(ModernResponse {
        body: serde_json::json!({"api_status": 200, "deleted": true}),
        status: 200,
    });
    let context = Context::fixture();
    let request = request(&[
        ("f", "posts"),
        ("s", "delete_post"),
        ("hash", "abc123"),
        ("post_id", "88"),
    ]);

    let reply = bridge.handle(&context, &request).await.unwrap();
    let response = match reply {
        LegacyReply::Forwarded(response) => response,
        reply => panic!("expected a forwarded reply, got {:?}", reply),
    };

    // The modern response passes through unchanged.
    assert_eq!(response.status, 200);
    assert_eq!(
        response.body,
        serde_json::json!({"api_status": 200, "deleted": true}),
    );

    // The normalised request targets the modern route with the session hash
    // as bearer credential and the post id in the body.
    let forwarded = modern.requests();
    assert_eq!(forwarded.len(), 1);
    assert_eq!(forwarded[0].method, HttpMethod::Post);
    assert_eq!(forwarded[0].path, "/v1/posts/delete");
    assert_eq!(forwarded[0].bearer, "abc123");
    assert_eq!(forwarded[0].body, serde_json::json!({"post_id": "88"}));
}

#[tokio::test]
async fn unregistered_pair_rejected() {
    let (bridge, sessions, _) = fixtures();
    sessions.session("abc123", "7");
    let context = Context::fixture();
    let request = request(&[("f", "posts"), ("s", "like_post"), ("hash", "abc123")]);

    let reply = bridge.handle(&context, &request).await.unwrap();
    assert_eq!(reply, LegacyReply::Error(BridgeError::UnsupportedOperation));
}

#[tokio::test]
async fn missing_feature_rejected() {
    let (bridge, _, _) = fixtures();
    let context = Context::fixture();

    let reply = bridge.handle(&context, &request(&[])).await.unwrap();
    assert_eq!(reply, LegacyReply::Error(BridgeError::UnsupportedOperation));

    let reply = bridge
        .handle(&context, &request(&[("f", "posts")]))
        .await
        .unwrap();
    assert_eq!(reply, LegacyReply::Error(BridgeError::UnsupportedOperation));
}

#[tokio::test]
async fn unsupported_envelope_shape() {
    let error = BridgeError::UnsupportedOperation;
    assert_eq!(
        error.envelope(),
        serde_json::json!({
            "api_status": 400,
            "api_text": "failed",
            "errors": {
                "error_id": 1,
                "error_text": "Bad request, feature not supported or not specified.",
            },
        }),
    );
}

#[tokio::test]
async fn modern_transport_fault_escapes() {
    let (bridge, sessions, modern) = fixtures();
    sessions.session("abc123", "7");
    modern.fail_next();
    let context = Context::fixture();
    let request = request(&[
        ("f", "posts"),
        ("s", "delete_post"),
        ("hash", "abc123"),
        ("post_id", "88"),
    ]);

    // Transport faults are outside the legacy error contract and are left
    // for the HTTP host to report.
    assert!(bridge.handle(&context, &request).await.is_err());
}
