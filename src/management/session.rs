use std::sync::Arc;

use tokio::sync::{Mutex, Notify, mpsc};

use crate::{
    config::Config,
    error::AuthError,
    info,
    management::credentials::CredentialStore,
    server,
    spotify::token::TokenExchanger,
    types::Session,
    utils, warning,
};

/// Authorization lifecycle of the single user session.
#[derive(Debug)]
pub enum AuthState {
    Unauthenticated,
    Authenticating,
    Authenticated(Session),
}

/// Shared state for one interactive authorization attempt, handed to the
/// callback listener. The verifier is consumed by the code exchange; the
/// outcome channel resolves the attempt exactly once.
pub struct AuthFlow {
    pub authorize_url: String,
    pub code_verifier: String,
    pub exchanger: TokenExchanger,
    pub store: CredentialStore,
    pub outcome: mpsc::Sender<Result<Session, AuthError>>,
    pub shutdown: Arc<Notify>,
}

/// Owns the in-memory session and orchestrates how a valid one is produced:
/// fast path, silent refresh, then the interactive listener as a last resort.
///
/// All session mutation goes through these methods. The credential file is
/// only ever written from here and from the success path of the callback
/// handler.
pub struct SessionManager {
    config: Arc<Config>,
    exchanger: TokenExchanger,
    store: CredentialStore,
    state: Mutex<AuthState>,
    /// Held across a whole authorization attempt so overlapping callers join
    /// the in-flight attempt instead of binding a second listener.
    flight: Mutex<()>,
}

impl SessionManager {
    pub fn new(config: Arc<Config>) -> Self {
        let exchanger = TokenExchanger::new(&config);
        let store = CredentialStore::new(config.refresh_token_file.clone());
        SessionManager {
            config,
            exchanger,
            store,
            state: Mutex::new(AuthState::Unauthenticated),
            flight: Mutex::new(()),
        }
    }

    /// The current session, if one exists and is still inside its expiry
    /// grace window.
    pub async fn current_session(&self) -> Option<Session> {
        match &*self.state.lock().await {
            AuthState::Authenticated(session) if session.is_usable() => Some(session.clone()),
            _ => None,
        }
    }

    pub async fn is_authorized(&self) -> bool {
        self.current_session().await.is_some()
    }

    /// Produces a valid session.
    ///
    /// Unforced calls resolve immediately when a usable session exists, then
    /// try a silent refresh from the stored token; a refresh failure is
    /// logged and degrades to the interactive flow rather than failing the
    /// attempt. Forced calls go straight to the interactive flow.
    ///
    /// The interactive flow waits for the human indefinitely unless
    /// `AUTHORIZE_TIMEOUT_SECONDS` bounds it.
    pub async fn authorize(&self, force: bool) -> Result<Session, AuthError> {
        // Overlapping callers block here, then observe the completed attempt
        // through the fast path below.
        let _attempt = self.flight.lock().await;

        if !force {
            if let Some(session) = self.current_session().await {
                return Ok(session);
            }

            match self.store.load().await {
                Ok(Some(refresh_token)) => {
                    info!("Authorizing with Spotify");
                    *self.state.lock().await = AuthState::Authenticating;
                    match self.exchanger.refresh(&refresh_token).await {
                        Ok(session) => return Ok(self.install(session).await),
                        Err(e) => warning!("Failed to refresh access token: {}", e),
                    }
                }
                Ok(None) => {}
                Err(e) => warning!("Failed to read stored refresh token: {}", e),
            }
        }

        *self.state.lock().await = AuthState::Authenticating;
        match self.interactive_authorize().await {
            Ok(session) => Ok(self.install(session).await),
            Err(e) => {
                *self.state.lock().await = AuthState::Unauthenticated;
                Err(e)
            }
        }
    }

    /// Persists the rotated refresh token and installs the session. An empty
    /// refresh token leaves the stored value untouched; rewriting an
    /// unchanged one is harmless.
    async fn install(&self, session: Session) -> Session {
        if session.refresh_token.is_empty() {
            // Provider did not rotate the token; keep the stored value.
        } else if let Err(e) = self.store.save(&session.refresh_token).await {
            warning!("Failed to persist refresh token: {}", e);
        }
        *self.state.lock().await = AuthState::Authenticated(session.clone());
        session
    }

    async fn interactive_authorize(&self) -> Result<Session, AuthError> {
        let pkce = utils::generate_pkce();
        let authorize_url = self.config.authorize_url(&pkce.code_challenge);

        let (outcome_tx, mut outcome_rx) = mpsc::channel(1);
        let shutdown = Arc::new(Notify::new());
        let flow = AuthFlow {
            authorize_url: authorize_url.clone(),
            code_verifier: pkce.code_verifier,
            exchanger: self.exchanger.clone(),
            store: self.store.clone(),
            outcome: outcome_tx,
            shutdown: Arc::clone(&shutdown),
        };

        let listener = tokio::net::TcpListener::bind(&self.config.server_addr).await?;
        let local_addr = listener.local_addr()?;
        let server = tokio::spawn(server::serve_authorize(listener, flow));

        info!("To authorize with Spotify, go to http://{}/", local_addr);
        info!("You should only need to do this once");

        if self.config.open_browser && webbrowser::open(&authorize_url).is_err() {
            warning!(
                "Failed to open browser. Please navigate to the following URL manually:\n{}",
                authorize_url
            );
        }

        let outcome = match self.config.authorize_timeout {
            Some(limit) => match tokio::time::timeout(limit, outcome_rx.recv()).await {
                Ok(received) => received.unwrap_or(Err(AuthError::ListenerClosed)),
                Err(_) => Err(AuthError::Timeout),
            },
            None => outcome_rx
                .recv()
                .await
                .unwrap_or(Err(AuthError::ListenerClosed)),
        };

        // The listener closes itself only on the success path; every other
        // outcome is torn down here, freeing the port.
        shutdown.notify_one();
        let _ = server.await;

        outcome
    }
}
