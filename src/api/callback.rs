use std::{collections::HashMap, sync::Arc};

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{error::AuthError, management::AuthFlow, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(flow): Extension<Arc<AuthFlow>>,
) -> Response {
    if let Some(error) = params.get("error") {
        warning!("Failed to authorize, {}", error);
        let _ = flow
            .outcome
            .try_send(Err(AuthError::AuthorizationDenied(error.clone())));
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!("Failed to authorize, {}", error)),
        )
            .into_response();
    }

    let Some(code) = params.get("code") else {
        // The attempt stays pending and the listener stays up; the human can
        // retry from the consent page.
        warning!("{}", AuthError::MissingCode);
        return (StatusCode::BAD_REQUEST, "No code found in query!").into_response();
    };

    match flow.exchanger.exchange_code(code, &flow.code_verifier).await {
        Ok(session) => {
            if !session.refresh_token.is_empty() {
                if let Err(e) = flow.store.save(&session.refresh_token).await {
                    warning!("Failed to persist refresh token: {}", e);
                }
            }
            let _ = flow.outcome.try_send(Ok(session));
            // Success is the one path where the listener closes itself.
            flow.shutdown.notify_one();
            Html(
                "<script>window.close()</script>Authorized with Spotify, you can now close this tab",
            )
            .into_response()
        }
        Err(e) => {
            let err = AuthError::TokenExchange(Box::new(e));
            warning!("{}", err);
            let _ = flow.outcome.try_send(Err(err));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html("Failed to authorize, token exchange failed".to_string()),
            )
                .into_response()
        }
    }
}
