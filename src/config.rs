//! Configuration management for the snapshot daemon.
//!
//! Configuration is read from environment variables, optionally seeded from a
//! `.env` file. The individual getter functions read single variables and
//! panic with a clear message when a required one is missing; the daemon
//! collects them once at startup into an immutable [`Config`] that the
//! authorization core and the gateway treat as read-only input.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory (`spotsnap/.env`)
//! 3. `.env` file in the working directory

use std::{env, path::PathBuf, time::Duration};

use reqwest::Url;

/// Loads environment variables from a `.env` file.
///
/// Prefers `spotsnap/.env` in the platform-specific local data directory
/// (creating the directory if needed), and falls back to a `.env` in the
/// working directory. A missing file is not an error; required variables are
/// checked individually when read.
///
/// # Directory Structure
///
/// The preferred location is:
/// - Linux: `~/.local/share/spotsnap/.env`
/// - macOS: `~/Library/Application Support/spotsnap/.env`
/// - Windows: `%LOCALAPPDATA%/spotsnap/.env`
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotsnap/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(path).map_err(|e| e.to_string())?;
    } else {
        // Fall back to a .env next to the process, if any.
        let _ = dotenv::dotenv();
    }
    Ok(())
}

/// Returns the bind address for the local authorization listener.
///
/// # Panics
///
/// Panics if the `SERVER_ADDRESS` environment variable is not set.
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").expect("SERVER_ADDRESS must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the OAuth redirect URI registered with the Spotify application.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the requested scope permissions as a space-separated list.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_SCOPE` environment variable is not set.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE").expect("SPOTIFY_API_AUTH_SCOPE must be set")
}

/// Returns the Spotify OAuth authorization URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_URL` environment variable is not set.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL").expect("SPOTIFY_API_AUTH_URL must be set")
}

/// Returns the Spotify OAuth token exchange URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_TOKEN_URL` environment variable is not set.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL").expect("SPOTIFY_API_TOKEN_URL must be set")
}

/// Returns the Spotify Web API base URL.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_URL` environment variable is not set.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").expect("SPOTIFY_API_URL must be set")
}

/// Returns the path of the refresh token file.
///
/// Defaults to `./.refresh_token` when `REFRESH_TOKEN_FILE` is not set.
pub fn refresh_token_file() -> PathBuf {
    env::var("REFRESH_TOKEN_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("./.refresh_token"))
}

/// Whether the interactive flow should try to open the system browser.
///
/// Defaults to true; set `OPEN_BROWSER=false` on headless machines where the
/// printed URL is followed from another device.
pub fn open_browser() -> bool {
    env::var("OPEN_BROWSER")
        .map(|v| v != "false" && v != "0")
        .unwrap_or(true)
}

/// Optional upper bound on how long an interactive authorization may wait
/// for the callback. Unset means wait indefinitely for the human.
pub fn authorize_timeout() -> Option<Duration> {
    env::var("AUTHORIZE_TIMEOUT_SECONDS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Immutable runtime configuration, collected once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub client_id: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub refresh_token_file: PathBuf,
    pub open_browser: bool,
    pub authorize_timeout: Option<Duration>,
}

impl Config {
    /// Collects the full configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics if any required variable is missing, with the variable name in
    /// the message.
    pub fn from_env() -> Self {
        Config {
            server_addr: server_addr(),
            client_id: spotify_client_id(),
            redirect_uri: spotify_redirect_uri(),
            scopes: spotify_scope()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
            refresh_token_file: refresh_token_file(),
            open_browser: open_browser(),
            authorize_timeout: authorize_timeout(),
        }
    }

    /// Builds the provider consent-page URL for one authorization attempt.
    ///
    /// Query parameters are URL-encoded; scopes are space-joined.
    ///
    /// # Panics
    ///
    /// Panics if `SPOTIFY_API_AUTH_URL` is not a valid URL. Configuration
    /// problems are surfaced at startup rather than mid-flow.
    pub fn authorize_url(&self, code_challenge: &str) -> String {
        Url::parse_with_params(
            &self.auth_url,
            &[
                ("client_id", self.client_id.as_str()),
                ("response_type", "code"),
                ("redirect_uri", self.redirect_uri.as_str()),
                ("scope", self.scopes.join(" ").as_str()),
                ("code_challenge_method", "S256"),
                ("code_challenge", code_challenge),
            ],
        )
        .expect("SPOTIFY_API_AUTH_URL must be a valid URL")
        .to_string()
    }
}
