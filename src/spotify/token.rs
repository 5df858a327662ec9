use chrono::{Duration, Utc};
use reqwest::{Client, Response};
use serde_json::Value;

use crate::{config::Config, error::AuthError, types::Session};

/// Performs the two token-acquiring calls against the provider's token
/// endpoint and normalizes both responses into a [`Session`].
///
/// Endpoint, client id and redirect URI are captured at construction so the
/// exchanger can be pointed at a stand-in endpoint under test.
#[derive(Debug, Clone)]
pub struct TokenExchanger {
    client: Client,
    token_url: String,
    client_id: String,
    redirect_uri: String,
}

impl TokenExchanger {
    pub fn new(config: &Config) -> Self {
        TokenExchanger {
            client: Client::new(),
            token_url: config.token_url.clone(),
            client_id: config.client_id.clone(),
            redirect_uri: config.redirect_uri.clone(),
        }
    }

    /// Exchanges an authorization code for a session, completing the PKCE
    /// flow. The code is single-use and short-lived, so this runs right
    /// after the callback delivers it.
    pub async fn exchange_code(
        &self,
        code: &str,
        code_verifier: &str,
    ) -> Result<Session, AuthError> {
        let res = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("client_id", self.client_id.as_str()),
                ("code", code),
                ("code_verifier", code_verifier),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        Self::session_from_response(res).await
    }

    /// Mints a new session from a refresh token, without human interaction.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, AuthError> {
        let res = self
            .client
            .post(&self.token_url)
            .form(&[
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("client_id", self.client_id.as_str()),
            ])
            .send()
            .await?;

        Self::session_from_response(res).await
    }

    /// Normalizes a token-endpoint response.
    ///
    /// Order matters: provider error payloads are reported as such even when
    /// they also lack an access token.
    async fn session_from_response(res: Response) -> Result<Session, AuthError> {
        let body = res.text().await?;
        let json: Value = serde_json::from_str(&body)?;

        if json.get("error").is_some() || json.get("error_description").is_some() {
            return Err(AuthError::TokenProvider {
                error: json["error"].as_str().unwrap_or("no error").to_string(),
                description: json["error_description"]
                    .as_str()
                    .unwrap_or("no error description")
                    .to_string(),
            });
        }

        let Some(access_token) = json["access_token"].as_str().filter(|t| !t.is_empty()) else {
            return Err(AuthError::MissingAccessToken);
        };

        let expires_in_secs = json["expires_in"].as_i64().unwrap_or(3600);

        Ok(Session {
            access_token: access_token.to_string(),
            token_type: json["token_type"].as_str().unwrap_or("Bearer").to_string(),
            refresh_token: json["refresh_token"]
                .as_str()
                .unwrap_or_default()
                .to_string(),
            expires_in: expires_in_secs * 1000,
            expiry_date: Utc::now() + Duration::seconds(expires_in_secs),
        })
    }
}
