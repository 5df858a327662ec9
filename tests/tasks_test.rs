mod common;

use std::sync::Arc;

use axum::{Json, Router, extract::Json as JsonBody, http::StatusCode, routing::get, routing::post};
use chrono::{Duration, Weekday};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use spotsnap::tasks::{BackupKind, TaskConfig, WeeklyAnchor, default_tasks};

fn task(kind: BackupKind) -> TaskConfig {
    TaskConfig {
        name: format!("{} test run", kind),
        kind,
        run_on_setup: false,
        run_on_start: false,
        interval: Some(Duration::weeks(1)),
        anchor: Some(WeeklyAnchor {
            weekday: Weekday::Mon,
            hour: 3,
            minute: 0,
        }),
        playlist_public: false,
        track_limit: 2,
    }
}

fn track_json(id: &str, artist: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "uri": format!("spotify:track:{}", id),
        "artists": [{ "id": format!("{}_artist", id), "name": artist }]
    })
}

#[tokio::test]
async fn test_top_tracks_snapshot_chain() {
    let created: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let added: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));

    let created_in = Arc::clone(&created);
    let added_in = Arc::clone(&added);
    let app = Router::new()
        .route(
            "/me/top/tracks",
            get(|| async {
                Json(json!({ "items": [track_json("t1", "Alpha"), track_json("t2", "Alpha")] }))
            }),
        )
        .route(
            "/me/playlists",
            post(move |JsonBody(body): JsonBody<Value>| {
                let created = Arc::clone(&created_in);
                async move {
                    *created.lock().await = Some(body);
                    (
                        StatusCode::CREATED,
                        Json(json!({ "id": "pl1", "name": "created" })),
                    )
                }
            }),
        )
        .route(
            "/playlists/pl1/tracks",
            post(move |JsonBody(body): JsonBody<Value>| {
                let added = Arc::clone(&added_in);
                async move {
                    *added.lock().await = Some(body);
                    (
                        StatusCode::CREATED,
                        Json(json!({ "snapshot_id": "snap1" })),
                    )
                }
            }),
        );

    let (gateway, _hits) = common::authed_gateway(app, "toptracks").await;
    task(BackupKind::TopTracks).run(&gateway).await.unwrap();

    let created = created.lock().await.clone().unwrap();
    assert!(
        created["name"]
            .as_str()
            .unwrap()
            .starts_with("Top Tracks (")
    );
    assert_eq!(created["description"], "Alpha and more");
    assert_eq!(created["public"], false);

    let added = added.lock().await.clone().unwrap();
    assert_eq!(
        added["uris"],
        json!(["spotify:track:t1", "spotify:track:t2"])
    );
}

#[tokio::test]
async fn test_top_tracks_fetch_failure_fails_run() {
    let app = Router::new().route(
        "/me/top/tracks",
        get(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": { "status": 500 } })),
            )
        }),
    );
    let (gateway, _hits) = common::authed_gateway(app, "topfail").await;

    let err = task(BackupKind::TopTracks)
        .run(&gateway)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to get top tracks"));
}

#[tokio::test]
async fn test_create_playlist_failure_fails_run() {
    let app = Router::new()
        .route(
            "/me/top/tracks",
            get(|| async { Json(json!({ "items": [track_json("t1", "Alpha")] })) }),
        )
        .route(
            "/me/playlists",
            // 200 instead of the expected 201
            post(|| async { Json(json!({ "id": "pl1", "name": "created" })) }),
        );
    let (gateway, _hits) = common::authed_gateway(app, "createfail").await;

    let err = task(BackupKind::TopTracks)
        .run(&gateway)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Failed to create playlist"));
}

#[tokio::test]
async fn test_discover_weekly_snapshot_chain() {
    let created: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let added: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));

    let created_in = Arc::clone(&created);
    let added_in = Arc::clone(&added);
    let app = Router::new()
        .route(
            "/playlists/37i9dQZEVXcGR4CaVwTP4B",
            get(|| async {
                Json(json!({
                    "tracks": { "items": [
                        { "track": track_json("dw1", "Beta") },
                        { "track": track_json("dw2", "Gamma") }
                    ]}
                }))
            }),
        )
        .route(
            "/me/playlists",
            post(move |JsonBody(body): JsonBody<Value>| {
                let created = Arc::clone(&created_in);
                async move {
                    *created.lock().await = Some(body);
                    (
                        StatusCode::CREATED,
                        Json(json!({ "id": "pl2", "name": "created" })),
                    )
                }
            }),
        )
        .route(
            "/playlists/pl2/tracks",
            post(move |JsonBody(body): JsonBody<Value>| {
                let added = Arc::clone(&added_in);
                async move {
                    *added.lock().await = Some(body);
                    (
                        StatusCode::CREATED,
                        Json(json!({ "snapshot_id": "snap2" })),
                    )
                }
            }),
        );

    let (gateway, _hits) = common::authed_gateway(app, "discover").await;
    task(BackupKind::DiscoverWeekly).run(&gateway).await.unwrap();

    let created = created.lock().await.clone().unwrap();
    assert!(
        created["name"]
            .as_str()
            .unwrap()
            .starts_with("Discover Weekly (")
    );
    assert!(
        created["description"]
            .as_str()
            .unwrap()
            .starts_with("Generated backup for ")
    );

    let added = added.lock().await.clone().unwrap();
    assert_eq!(
        added["uris"],
        json!(["spotify:track:dw1", "spotify:track:dw2"])
    );
}

#[test]
fn test_default_tasks_cover_both_kinds() {
    let tasks = default_tasks();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().any(|t| t.kind == BackupKind::TopTracks));
    assert!(tasks.iter().any(|t| t.kind == BackupKind::DiscoverWeekly));

    for task in &tasks {
        assert!(task.run_on_start);
        assert_eq!(task.interval, Some(Duration::weeks(1)));
        assert!(!task.playlist_public);
        let anchor = task.anchor.unwrap();
        assert_eq!(anchor.weekday, Weekday::Mon);
        assert_eq!(anchor.hour, 3);
    }
}
