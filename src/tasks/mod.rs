//! Playlist snapshot task variants.
//!
//! Each variant of [`BackupKind`] is one snapshot recipe: fetch a track
//! list, create a dated playlist, fill it. New snapshot types add a variant
//! here plus a module with its `run` body.

pub mod discover_weekly;
pub mod top_tracks;

use std::fmt;

use chrono::{Duration, Weekday};

use crate::{
    Res,
    spotify::gateway::ApiGateway,
    types::{AddTracksToPlaylistRequest, CreatePlaylistRequest, CreatePlaylistResponse},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackupKind {
    TopTracks,
    DiscoverWeekly,
}

impl BackupKind {
    pub fn describe(&self) -> &'static str {
        match self {
            BackupKind::TopTracks => "Creates a playlist of your top tracks",
            BackupKind::DiscoverWeekly => "Creates a backup of your Discover Weekly",
        }
    }
}

impl fmt::Display for BackupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackupKind::TopTracks => write!(f, "top-tracks"),
            BackupKind::DiscoverWeekly => write!(f, "discover-weekly"),
        }
    }
}

/// Weekly point in time at which a task's interval starts.
#[derive(Debug, Clone, Copy)]
pub struct WeeklyAnchor {
    pub weekday: Weekday,
    pub hour: u32,
    pub minute: u32,
}

#[derive(Debug, Clone)]
pub struct TaskConfig {
    pub name: String,
    pub kind: BackupKind,
    /// Run immediately when the process starts.
    pub run_on_setup: bool,
    /// Run once when the interval starts.
    pub run_on_start: bool,
    pub interval: Option<Duration>,
    pub anchor: Option<WeeklyAnchor>,
    pub playlist_public: bool,
    pub track_limit: u64,
}

impl TaskConfig {
    pub async fn run(&self, gateway: &ApiGateway) -> Res<()> {
        match self.kind {
            BackupKind::TopTracks => top_tracks::run(gateway, self).await,
            BackupKind::DiscoverWeekly => discover_weekly::run(gateway, self).await,
        }
    }

    pub fn schedule_description(&self) -> String {
        match (&self.anchor, &self.interval) {
            (Some(anchor), Some(interval)) => format!(
                "{:?} {:02}:{:02}, every {}d",
                anchor.weekday,
                anchor.hour,
                anchor.minute,
                interval.num_days()
            ),
            (None, Some(interval)) => format!("every {}d", interval.num_days()),
            _ => "manual".to_string(),
        }
    }
}

/// The built-in weekly snapshot tasks.
pub fn default_tasks() -> Vec<TaskConfig> {
    let monday_morning = WeeklyAnchor {
        weekday: Weekday::Mon,
        hour: 3,
        minute: 0,
    };

    vec![
        TaskConfig {
            name: "Weekly Top Tracks backup".to_string(),
            kind: BackupKind::TopTracks,
            run_on_setup: false,
            run_on_start: true,
            interval: Some(Duration::weeks(1)),
            anchor: Some(monday_morning),
            playlist_public: false,
            track_limit: 50,
        },
        TaskConfig {
            name: "Weekly Discover Weekly backup".to_string(),
            kind: BackupKind::DiscoverWeekly,
            run_on_setup: false,
            run_on_start: true,
            interval: Some(Duration::weeks(1)),
            anchor: Some(monday_morning),
            playlist_public: false,
            track_limit: 50,
        },
    ]
}

pub(crate) async fn create_playlist(
    gateway: &ApiGateway,
    name: String,
    description: String,
    public: bool,
) -> Res<CreatePlaylistResponse> {
    let request = CreatePlaylistRequest {
        name,
        description,
        public,
    };
    let res = gateway
        .post("/me/playlists", serde_json::to_value(&request)?)
        .await?;
    if res.status != 201 {
        return Err(format!("Failed to create playlist, status {}", res.status).into());
    }
    Ok(serde_json::from_value(res.data)?)
}

pub(crate) async fn add_tracks(
    gateway: &ApiGateway,
    playlist_id: &str,
    uris: Vec<String>,
) -> Res<()> {
    let request = AddTracksToPlaylistRequest { uris };
    let res = gateway
        .post(
            &format!("/playlists/{}/tracks", playlist_id),
            serde_json::to_value(&request)?,
        )
        .await?;
    if res.status != 201 {
        return Err(format!("Failed to add tracks to playlist, status {}", res.status).into());
    }
    Ok(())
}
