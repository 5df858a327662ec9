mod common;

use std::{collections::HashMap, sync::Arc};

use axum::{Form, Json, Router, routing::post};
use chrono::{Duration, Utc};
use serde_json::json;
use tokio::sync::Mutex;

use spotsnap::{error::AuthError, spotify::token::TokenExchanger};

fn exchanger_for(token_url: &str) -> TokenExchanger {
    let config = common::test_config(
        token_url,
        "http://unused.invalid",
        "127.0.0.1:0",
        common::unique_path("token"),
    );
    TokenExchanger::new(&config)
}

#[tokio::test]
async fn test_refresh_normalizes_payload() {
    let app = Router::new().route(
        "/token",
        post(|| async {
            // token_type intentionally omitted
            Json(json!({
                "access_token": "fresh-at",
                "refresh_token": "rotated-rt",
                "expires_in": 3600
            }))
        }),
    );
    let (addr, _server) = common::serve_router(app).await;

    let exchanger = exchanger_for(&format!("http://{}/token", addr));
    let before = Utc::now();
    let session = exchanger.refresh("old-rt").await.unwrap();

    assert_eq!(session.access_token, "fresh-at");
    assert_eq!(session.refresh_token, "rotated-rt");
    // Missing token_type defaults to Bearer
    assert_eq!(session.token_type, "Bearer");
    // Lifetime is stored in milliseconds, expiry as an absolute timestamp
    assert_eq!(session.expires_in, 3_600_000);
    assert!(session.expiry_date >= before + Duration::seconds(3595));
    assert!(session.expiry_date <= Utc::now() + Duration::seconds(3605));
    assert!(session.is_usable());
}

#[tokio::test]
async fn test_provider_error_payload() {
    let app = Router::new().route(
        "/token",
        post(|| async {
            Json(json!({
                "error": "invalid_grant",
                "error_description": "Refresh token revoked"
            }))
        }),
    );
    let (addr, _server) = common::serve_router(app).await;

    let err = exchanger_for(&format!("http://{}/token", addr))
        .refresh("revoked")
        .await
        .unwrap_err();

    match err {
        AuthError::TokenProvider { error, description } => {
            assert_eq!(error, "invalid_grant");
            assert_eq!(description, "Refresh token revoked");
        }
        other => panic!("expected TokenProvider, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_access_token() {
    let app = Router::new().route("/token", post(|| async { Json(json!({})) }));
    let (addr, _server) = common::serve_router(app).await;

    let err = exchanger_for(&format!("http://{}/token", addr))
        .refresh("rt")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::MissingAccessToken));
}

#[tokio::test]
async fn test_non_json_body() {
    let app = Router::new().route("/token", post(|| async { "definitely not json" }));
    let (addr, _server) = common::serve_router(app).await;

    let err = exchanger_for(&format!("http://{}/token", addr))
        .refresh("rt")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::TokenParse(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport() {
    // Bind and immediately drop a listener to get a port nothing serves
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = exchanger_for(&format!("http://{}/token", addr))
        .refresh("rt")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Transport(_)));
}

#[tokio::test]
async fn test_exchange_code_sends_pkce_form() {
    let seen: Arc<Mutex<Option<HashMap<String, String>>>> = Arc::new(Mutex::new(None));
    let handler_seen = Arc::clone(&seen);
    let app = Router::new().route(
        "/token",
        post(move |Form(form): Form<HashMap<String, String>>| {
            let seen = Arc::clone(&handler_seen);
            async move {
                *seen.lock().await = Some(form);
                Json(json!({
                    "access_token": "code-at",
                    "refresh_token": "code-rt",
                    "expires_in": 3600,
                    "token_type": "Bearer"
                }))
            }
        }),
    );
    let (addr, _server) = common::serve_router(app).await;

    let exchanger = exchanger_for(&format!("http://{}/token", addr));
    let session = exchanger
        .exchange_code("the-code", "the-verifier")
        .await
        .unwrap();
    assert_eq!(session.access_token, "code-at");

    let form = seen.lock().await.clone().unwrap();
    assert_eq!(form.get("grant_type").unwrap(), "authorization_code");
    assert_eq!(form.get("code").unwrap(), "the-code");
    assert_eq!(form.get("code_verifier").unwrap(), "the-verifier");
    assert_eq!(form.get("client_id").unwrap(), "test-client");
    assert!(form.get("redirect_uri").unwrap().ends_with("/callback"));
}

#[tokio::test]
async fn test_refresh_sends_refresh_grant() {
    let seen: Arc<Mutex<Option<HashMap<String, String>>>> = Arc::new(Mutex::new(None));
    let handler_seen = Arc::clone(&seen);
    let app = Router::new().route(
        "/token",
        post(move |Form(form): Form<HashMap<String, String>>| {
            let seen = Arc::clone(&handler_seen);
            async move {
                *seen.lock().await = Some(form);
                Json(json!({
                    "access_token": "at",
                    "refresh_token": "rt",
                    "expires_in": 3600,
                    "token_type": "Bearer"
                }))
            }
        }),
    );
    let (addr, _server) = common::serve_router(app).await;

    exchanger_for(&format!("http://{}/token", addr))
        .refresh("stored-rt")
        .await
        .unwrap();

    let form = seen.lock().await.clone().unwrap();
    assert_eq!(form.get("grant_type").unwrap(), "refresh_token");
    assert_eq!(form.get("refresh_token").unwrap(), "stored-rt");
    assert_eq!(form.get("client_id").unwrap(), "test-client");
}
