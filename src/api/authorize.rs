use std::sync::Arc;

use axum::{
    Extension,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::management::AuthFlow;

pub async fn authorize_redirect(Extension(flow): Extension<Arc<AuthFlow>>) -> impl IntoResponse {
    (
        StatusCode::FOUND,
        [(header::LOCATION, flow.authorize_url.clone())],
    )
}

pub async fn fallback_redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/".to_string())])
}
