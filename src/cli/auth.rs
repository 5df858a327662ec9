use std::sync::Arc;

use crate::{error, management::SessionManager, success};

pub async fn auth(sessions: Arc<SessionManager>, force: bool) {
    match sessions.authorize(force).await {
        Ok(_) => success!("Authentication successful!"),
        Err(e) => error!("Authentication failed: {}", e),
    }
}
