use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Safety margin subtracted from a session's stated expiry before treating it
/// as invalid, absorbing clock skew and in-flight request latency.
pub const SESSION_GRACE_MS: i64 = 5_000;

/// An authorized session with the provider.
///
/// Derived from either the stored refresh token or a completed interactive
/// authorization. Owned exclusively by the session manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    /// Defaults to "Bearer" when the provider omits it.
    pub token_type: String,
    /// May be empty when the provider does not rotate the token.
    pub refresh_token: String,
    /// Provider-stated lifetime in milliseconds.
    pub expires_in: i64,
    /// Absolute expiry, computed at acquisition time.
    pub expiry_date: DateTime<Utc>,
}

impl Session {
    /// Whether the session is still safe to use for a request right now.
    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Utc::now())
    }

    /// Usability check against an arbitrary clock value.
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date - now > Duration::milliseconds(SESSION_GRACE_MS)
    }
}

/// Verifier and challenge for one interactive authorization attempt.
///
/// Created at the start of the flow, consumed exactly once during the code
/// exchange, never persisted.
#[derive(Debug, Clone)]
pub struct PkceAttempt {
    pub code_verifier: String,
    pub code_challenge: String,
}

/// Uniform envelope returned by the request gateway for every reachable
/// completion, including non-2xx statuses.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub status_message: String,
    pub data: serde_json::Value,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackArtist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
    pub artists: Vec<TrackArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopTracksResponse {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTrackItem {
    pub track: Track,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracks {
    pub items: Vec<PlaylistTrackItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistTracksResponse {
    pub tracks: PlaylistTracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTracksToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Tabled)]
pub struct TaskTableRow {
    pub name: String,
    pub kind: String,
    pub schedule: String,
    pub on_start: String,
}
