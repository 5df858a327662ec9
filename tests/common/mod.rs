#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{Json, Router, routing::post};
use serde_json::json;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use spotsnap::{config::Config, management::SessionManager, spotify::gateway::ApiGateway};

static COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A scratch file path unique to this test run.
pub fn unique_path(tag: &str) -> PathBuf {
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "spotsnap-test-{}-{}-{}",
        tag,
        std::process::id(),
        n
    ))
}

/// Serves a router on an ephemeral local port, standing in for a provider
/// endpoint. The server task lives until the test's runtime shuts down.
pub async fn serve_router(router: Router) -> (SocketAddr, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (addr, handle)
}

/// A config pointing the authorization core at test-controlled endpoints.
pub fn test_config(
    token_url: &str,
    api_url: &str,
    server_addr: &str,
    refresh_file: PathBuf,
) -> Config {
    Config {
        server_addr: server_addr.to_string(),
        client_id: "test-client".to_string(),
        redirect_uri: format!("http://{}/callback", server_addr),
        scopes: vec![
            "user-top-read".to_string(),
            "playlist-modify-private".to_string(),
        ],
        auth_url: "https://accounts.example.com/authorize".to_string(),
        token_url: token_url.to_string(),
        api_url: api_url.to_string(),
        refresh_token_file: refresh_file,
        open_browser: false,
        authorize_timeout: None,
    }
}

/// A gateway whose session manager refreshes against a stub token endpoint
/// (a refresh token is already stored) and whose API root is the given
/// router. Returns the gateway and the token-endpoint hit counter.
pub async fn authed_gateway(api_router: Router, tag: &str) -> (ApiGateway, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let handler_hits = Arc::clone(&hits);
    let token_app = Router::new().route(
        "/token",
        post(move || {
            let hits = Arc::clone(&handler_hits);
            async move {
                let n = hits.fetch_add(1, Ordering::SeqCst);
                Json(json!({
                    "access_token": format!("gw-token-{}", n),
                    "refresh_token": "gw-refresh",
                    "expires_in": 3600,
                    "token_type": "Bearer"
                }))
            }
        }),
    );
    let (token_addr, _token_server) = serve_router(token_app).await;
    let (api_addr, _api_server) = serve_router(api_router).await;

    let store_path = unique_path(tag);
    async_fs::write(&store_path, "seed-refresh").await.unwrap();

    let config = test_config(
        &format!("http://{}/token", token_addr),
        &format!("http://{}", api_addr),
        "127.0.0.1:0",
        store_path,
    );
    let sessions = Arc::new(SessionManager::new(Arc::new(config.clone())));
    let gateway = ApiGateway::new(&config, sessions);
    (gateway, hits)
}
