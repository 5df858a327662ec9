use chrono::Local;

use crate::{Res, spotify::gateway::ApiGateway, types::TopTracksResponse, utils};

use super::TaskConfig;

pub async fn run(gateway: &ApiGateway, task: &TaskConfig) -> Res<()> {
    let res = gateway
        .get(&format!("/me/top/tracks?limit={}", task.track_limit))
        .await?;
    if res.status != 200 {
        return Err(format!("Failed to get top tracks, status {}", res.status).into());
    }
    let tracks: TopTracksResponse = serde_json::from_value(res.data)?;

    let date = Local::now().format("%Y-%m-%d").to_string();
    let playlist = super::create_playlist(
        gateway,
        format!("Top Tracks ({})", date),
        utils::top_artist_summary(&tracks.items),
        task.playlist_public,
    )
    .await?;

    let uris = tracks.items.iter().map(|t| t.uri.clone()).collect();
    super::add_tracks(gateway, &playlist.id, uris).await
}
