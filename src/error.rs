//! Error taxonomy for the authorization core and the request gateway.
//!
//! None of these are fatal to the process. Refresh failures degrade to the
//! interactive flow, interactive failures reject the in-flight authorization
//! attempt, and gateway failures end at the task body that triggered them.

use thiserror::Error;

/// Failures while obtaining or refreshing a session.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The token endpoint's response body was not valid JSON.
    #[error("failed to parse token response as JSON: {0}")]
    TokenParse(#[from] serde_json::Error),

    /// The token endpoint answered with an OAuth error payload.
    #[error("token endpoint returned {error} - {description}")]
    TokenProvider { error: String, description: String },

    /// A successful-looking token response carried no access token.
    #[error("did not get access token")]
    MissingAccessToken,

    /// The human denied consent on the provider's authorize page.
    #[error("authorization denied, {0}")]
    AuthorizationDenied(String),

    /// The provider redirected back without an authorization code.
    #[error("no code found in query")]
    MissingCode,

    /// Exchanging the authorization code for a session failed.
    #[error("token exchange failed: {0}")]
    TokenExchange(#[source] Box<AuthError>),

    /// The token endpoint could not be reached or the body not read.
    #[error("token request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The local authorization listener could not be started.
    #[error("failed to start authorize listener: {0}")]
    Listener(#[from] std::io::Error),

    /// The listener went away before delivering an outcome.
    #[error("authorize listener closed before completing the flow")]
    ListenerClosed,

    /// The configured wait for the interactive callback elapsed.
    #[error("authorization attempt timed out")]
    Timeout,
}

/// Failures while performing an authenticated resource API call.
///
/// Non-2xx statuses are not errors at this layer; they are returned in the
/// response envelope for the caller to inspect.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The response body could not be parsed as JSON.
    #[error("failed to parse response to JSON: {0}")]
    ResponseParse(#[source] serde_json::Error),

    /// The request could not be sent or the body not read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Obtaining a valid session failed before the request was made.
    #[error(transparent)]
    Auth(#[from] AuthError),
}
