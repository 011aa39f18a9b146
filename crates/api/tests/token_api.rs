//! HTTP-level tests for login, access-token renewal and the bearer guard.

mod common;

use axum::http::StatusCode;
use bank_auth::{ClientContext, Session};
use chrono::{Duration, Utc};
use common::{
    body_json, build_test_app, expired_token, foreign_key_token, get, get_auth, login, post_json,
};
use serde_json::json;

const RENEW: &str = "/api/v1/tokens/renew_access";

// ---------------------------------------------------------------------------
// Login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_opens_session() {
    let t = build_test_app();
    t.seed_user("alice").await;

    let json = login(t.app(), "alice").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert!(json["access_token_expires_at"].is_string());
    assert!(json["refresh_token_expires_at"].is_string());
    assert_eq!(json["user"]["username"], "alice");
    assert!(json["user"].get("hashed_password").is_none());

    let session_id = json["session_id"].as_str().unwrap().parse().unwrap();
    let session = t.sessions.get_now(session_id).expect("session stored");
    assert_eq!(session.subject, "alice");
    assert_eq!(session.refresh_token, json["refresh_token"].as_str().unwrap());
}

#[tokio::test]
async fn login_wrong_password_is_unauthorized() {
    let t = build_test_app();
    t.seed_user("alice").await;

    let body = json!({ "username": "alice", "password": "not_the_password" });
    let response = post_json(t.app(), "/api/v1/users/login", body).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(t.sessions.calls(), 0);
}

#[tokio::test]
async fn login_unknown_user_is_not_found() {
    let t = build_test_app();

    let body = json!({ "username": "ghost", "password": "whatever1" });
    let response = post_json(t.app(), "/api/v1/users/login", body).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn login_invalid_input_is_bad_request() {
    let t = build_test_app();

    let response = post_json(t.app(), "/api/v1/users/login", json!({ "username": "A!" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// Renewal
// ---------------------------------------------------------------------------

#[tokio::test]
async fn renew_returns_new_access_token() {
    let t = build_test_app();
    t.seed_user("alice").await;
    let login_json = login(t.app(), "alice").await;
    let refresh = login_json["refresh_token"].as_str().unwrap();

    let response = post_json(t.app(), RENEW, json!({ "refresh_token": refresh })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let access = json["access_token"].as_str().unwrap();
    assert_ne!(access, login_json["access_token"].as_str().unwrap());
    assert!(json["access_token_expires_at"].is_string());

    let me = get_auth(t.app(), "/api/v1/users/me", &format!("Bearer {access}")).await;
    assert_eq!(me.status(), StatusCode::OK);
    assert_eq!(body_json(me).await["data"]["username"], "alice");
}

#[tokio::test]
async fn renew_twice_gives_distinct_tokens() {
    let t = build_test_app();
    t.seed_user("alice").await;
    let refresh = login(t.app(), "alice").await["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let first = body_json(post_json(t.app(), RENEW, json!({ "refresh_token": refresh })).await).await;
    let second = body_json(post_json(t.app(), RENEW, json!({ "refresh_token": refresh })).await).await;

    assert!(first["access_token"].is_string());
    assert!(second["access_token"].is_string());
    assert_ne!(first["access_token"], second["access_token"]);
}

#[tokio::test]
async fn renew_without_token_is_bad_request() {
    let t = build_test_app();

    let missing = post_json(t.app(), RENEW, json!({})).await;
    assert_eq!(missing.status(), StatusCode::BAD_REQUEST);

    let empty = post_json(t.app(), RENEW, json!({ "refresh_token": "" })).await;
    assert_eq!(empty.status(), StatusCode::BAD_REQUEST);

    assert_eq!(t.sessions.calls(), 0);
}

#[tokio::test]
async fn renew_with_garbage_is_unauthorized() {
    let t = build_test_app();

    let response = post_json(t.app(), RENEW, json!({ "refresh_token": "v1.local.bogus" })).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
    assert_eq!(t.sessions.calls(), 0);
}

#[tokio::test]
async fn renew_for_unknown_session_is_not_found() {
    let t = build_test_app();
    let (refresh, _) = t.state.sessions.authority().issue_refresh("alice").unwrap();

    let response = post_json(t.app(), RENEW, json!({ "refresh_token": refresh })).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn renew_for_blocked_session_is_unauthorized() {
    use bank_auth::SessionStore;

    let t = build_test_app();
    t.seed_user("alice").await;
    let login_json = login(t.app(), "alice").await;
    let session_id = login_json["session_id"].as_str().unwrap().parse().unwrap();
    t.sessions.block(session_id).await.unwrap();

    let response = post_json(
        t.app(),
        RENEW,
        json!({ "refresh_token": login_json["refresh_token"] }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert!(!json["error"].as_str().unwrap().contains("blocked"));
}

#[tokio::test]
async fn renew_with_token_not_bound_to_session_is_unauthorized() {
    use bank_auth::SessionStore;

    let t = build_test_app();
    let authority = t.state.sessions.authority();
    let (r1, _) = authority.issue_refresh("alice").unwrap();
    let (r2, p2) = authority.issue_refresh("alice").unwrap();
    t.sessions
        .create(&Session {
            id: p2.id,
            subject: "alice".into(),
            refresh_token: r1,
            client: ClientContext::default(),
            is_blocked: false,
            expires_at: Utc::now() + Duration::days(1),
            created_at: Utc::now(),
        })
        .await
        .unwrap();

    let response = post_json(t.app(), RENEW, json!({ "refresh_token": r2 })).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_without_header_is_unauthorized() {
    let t = build_test_app();

    let response = get(t.app(), "/api/v1/users/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "MISSING_CREDENTIAL");
    assert_eq!(t.sessions.calls(), 0);
}

#[tokio::test]
async fn me_with_bad_headers_is_unauthorized() {
    let t = build_test_app();
    let (token, _) = t.state.sessions.authority().issue_access("alice").unwrap();

    let cases = [
        ("Bearer ".to_string(), "MALFORMED_HEADER"),
        (token.clone(), "MALFORMED_HEADER"),
        (format!("Basic {token}"), "UNSUPPORTED_SCHEME"),
        ("Bearer v1.local.AAAA".to_string(), "UNAUTHORIZED"),
    ];

    for (header, code) in cases {
        let response = get_auth(t.app(), "/api/v1/users/me", &header).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{header}");
        assert_eq!(body_json(response).await["code"], code, "{header}");
    }
}

#[tokio::test]
async fn expired_and_foreign_tokens_are_indistinguishable() {
    let t = build_test_app();
    t.seed_user("alice").await;

    let expired = get_auth(
        t.app(),
        "/api/v1/users/me",
        &format!("Bearer {}", expired_token("alice")),
    )
    .await;
    let foreign = get_auth(
        t.app(),
        "/api/v1/users/me",
        &format!("Bearer {}", foreign_key_token("alice")),
    )
    .await;

    assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(foreign.status(), StatusCode::UNAUTHORIZED);
    let expired = body_json(expired).await;
    assert_eq!(expired, body_json(foreign).await);
    assert_eq!(expired["code"], "UNAUTHORIZED");
    assert!(!expired["error"].as_str().unwrap().contains("expire"));
}

#[tokio::test]
async fn renew_with_expired_or_foreign_refresh_token_is_indistinguishable() {
    let t = build_test_app();

    let expired = post_json(t.app(), RENEW, json!({ "refresh_token": expired_token("alice") })).await;
    let foreign =
        post_json(t.app(), RENEW, json!({ "refresh_token": foreign_key_token("alice") })).await;

    assert_eq!(expired.status(), foreign.status());
    assert_eq!(body_json(expired).await, body_json(foreign).await);
    assert_eq!(t.sessions.calls(), 0);
}

#[tokio::test]
async fn me_accepts_lowercase_scheme() {
    let t = build_test_app();
    t.seed_user("alice").await;
    let access = login(t.app(), "alice").await["access_token"]
        .as_str()
        .unwrap()
        .to_string();

    let response = get_auth(t.app(), "/api/v1/users/me", &format!("bearer {access}")).await;

    assert_eq!(response.status(), StatusCode::OK);
}
