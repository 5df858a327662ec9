use chrono::Local;

use crate::{
    Res,
    spotify::gateway::ApiGateway,
    types::{PlaylistTracksResponse, Track},
};

use super::TaskConfig;

/// The global Discover Weekly playlist id.
const DISCOVER_WEEKLY_ID: &str = "37i9dQZEVXcGR4CaVwTP4B";

pub async fn run(gateway: &ApiGateway, task: &TaskConfig) -> Res<()> {
    let res = gateway
        .get(&format!("/playlists/{}", DISCOVER_WEEKLY_ID))
        .await?;
    if res.status != 200 {
        // Spotify removed algorithmic playlists from the Web API in late
        // 2024; apps without an exemption get a 404 here.
        return Err(format!(
            "Failed to get Discover Weekly playlist, status {}",
            res.status
        )
        .into());
    }
    let playlist_tracks: PlaylistTracksResponse = serde_json::from_value(res.data)?;
    let tracks: Vec<Track> = playlist_tracks
        .tracks
        .items
        .into_iter()
        .map(|i| i.track)
        .collect();

    let date = Local::now().format("%Y-%m-%d").to_string();
    let playlist = super::create_playlist(
        gateway,
        format!("Discover Weekly ({})", date),
        format!("Generated backup for {}", date),
        task.playlist_public,
    )
    .await?;

    let uris = tracks.iter().map(|t| t.uri.clone()).collect();
    super::add_tracks(gateway, &playlist.id, uris).await
}
