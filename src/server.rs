use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::{api, management::AuthFlow, warning};

/// Serves the authorization listener for one attempt over a pre-bound
/// listener. Shuts down when the flow's `Notify` fires, either from the
/// callback success path or from the session manager's teardown.
pub async fn serve_authorize(listener: TcpListener, flow: AuthFlow) {
    let shutdown = Arc::clone(&flow.shutdown);
    let app = Router::new()
        .route("/", get(api::authorize_redirect))
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .fallback(api::fallback_redirect)
        .layer(Extension(Arc::new(flow)));

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.notified().await })
        .await
    {
        warning!("Authorize listener terminated: {}", e);
    }
}
