use std::sync::Arc;

use reqwest::{
    Client, Method,
    header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;

use crate::{
    config::Config,
    error::ApiError,
    management::SessionManager,
    types::ApiResponse,
    warning,
};

/// Options for one gateway call. The default is a GET with no extra headers
/// and no body.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Option<Method>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// The single path through which every resource API call is made.
///
/// Ensures a valid session before each call and attaches the bearer
/// credential. Non-2xx statuses are returned in the envelope rather than
/// raised; callers inspect `status`.
pub struct ApiGateway {
    api_url: String,
    sessions: Arc<SessionManager>,
    client: Client,
}

impl ApiGateway {
    pub fn new(config: &Config, sessions: Arc<SessionManager>) -> Self {
        ApiGateway {
            api_url: config.api_url.clone(),
            sessions,
            client: Client::new(),
        }
    }

    /// Issues an authenticated request against the provider API root.
    ///
    /// The `Authorization` header is set first; caller-supplied headers are
    /// inserted afterwards with last-write-wins semantics, so a caller can
    /// knowingly override the credential. The body is parsed as JSON
    /// regardless of status code.
    pub async fn call(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        let session = match self.sessions.current_session().await {
            Some(session) => session,
            None => self.sessions.authorize(false).await?,
        };

        let mut headers = HeaderMap::new();
        let bearer = format!("{} {}", session.token_type, session.access_token);
        match HeaderValue::from_str(&bearer) {
            Ok(value) => {
                headers.insert(AUTHORIZATION, value);
            }
            Err(_) => warning!("Access token contains characters unusable in a header"),
        }
        for (name, value) in &options.headers {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => warning!("Ignoring invalid request header {}", name),
            }
        }

        let url = format!("{}{}", self.api_url, path);
        let mut request = self
            .client
            .request(options.method.unwrap_or(Method::GET), &url)
            .headers(headers);
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let res = request.send().await?;
        let status = res.status();
        let body = res.text().await?;
        let data: Value = serde_json::from_str(&body).map_err(ApiError::ResponseParse)?;

        Ok(ApiResponse {
            status: status.as_u16(),
            status_message: status.canonical_reason().unwrap_or("").to_string(),
            data,
        })
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse, ApiError> {
        self.call(path, RequestOptions::default()).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<ApiResponse, ApiError> {
        self.call(
            path,
            RequestOptions {
                method: Some(Method::POST),
                headers: Vec::new(),
                body: Some(body),
            },
        )
        .await
    }
}
