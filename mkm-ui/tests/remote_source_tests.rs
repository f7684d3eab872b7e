//! Remote-API client against live routers
//!
//! An mkm-ui router backed by the sample catalog stands in for the remote API;
//! a second small router plays the OAuth redirect endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use mkm_common::models::{CallbackParams, PlaylistRequest, SearchParams};
use mkm_common::source::{RemoteApiSource, StaticSource};
use mkm_common::{select_data_source, AppConfig, DataSource, SourceKind};
use mkm_ui::{build_router, AppState};
use serde::Deserialize;

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// An mkm-ui instance serving the sample catalog; returns its `/api` base URL
async fn spawn_demo_instance() -> String {
    let app = build_router(AppState::new(Arc::new(StaticSource::new(Duration::ZERO))));
    let addr = spawn(app).await;
    format!("http://{}/api", addr)
}

#[derive(Deserialize)]
struct CallbackQuery {
    code: String,
}

async fn spawn_oauth_server() -> String {
    let app = Router::new()
        .route(
            "/api/login",
            get(|| async { Redirect::temporary("https://accounts.example.com/authorize?client_id=abc") }),
        )
        .route(
            "/api/callback",
            get(|Query(q): Query<CallbackQuery>| async move {
                if q.code == "good" {
                    Redirect::temporary("/?spotify_auth=success")
                } else {
                    Redirect::temporary("/?spotify_auth=error&error=State%20mismatch")
                }
            }),
        );
    let addr = spawn(app).await;
    format!("http://{}/api", addr)
}

#[tokio::test]
async fn test_search_through_remote() {
    let remote = RemoteApiSource::new(&spawn_demo_instance().await).unwrap();

    let reply = remote.search_tracks(SearchParams::new("queen")).await;
    assert_eq!(reply.status, 200);
    let page = reply.into_result().unwrap();
    assert_eq!(page.total, 2);
    assert_eq!(page.tracks.len(), 2);
}

#[tokio::test]
async fn test_remote_validation_error_passes_through() {
    let remote = RemoteApiSource::new(&spawn_demo_instance().await).unwrap();

    let reply = remote
        .search_tracks(SearchParams::new("queen").with_page(1, 500))
        .await;
    assert_eq!(reply.status, 422);
    let detail = reply.into_result().unwrap_err();
    assert!(detail.detail.contains("page_size"));
}

#[tokio::test]
async fn test_remote_health_and_unavailable_features() {
    let remote = RemoteApiSource::new(&spawn_demo_instance().await).unwrap();

    let health = remote.check_health().await;
    assert_eq!(health.into_result().unwrap().status, "OK - Static Demo Mode");

    let login = remote.login().await;
    assert_eq!(login.status, 501);
    assert!(login.into_result().unwrap_err().detail.contains("static version"));

    let playlist = remote
        .create_playlist(PlaylistRequest {
            track_uris: vec!["spotify:track:1".to_string()],
            playlist_name: None,
        })
        .await;
    assert_eq!(playlist.status, 501);

    let callback = remote
        .callback(CallbackParams {
            code: "c".to_string(),
            state: "s".to_string(),
        })
        .await;
    assert_eq!(callback.status, 501);

    assert!(remote.get_all_tracks().await.is_none());
}

#[tokio::test]
async fn test_unreachable_remote_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let remote = RemoteApiSource::new(&format!("http://{}/api", addr)).unwrap();
    let reply = remote.search_tracks(SearchParams::new("queen")).await;
    assert_eq!(reply.status, 502);
    assert!(!reply.ok());
}

#[tokio::test]
async fn test_login_reports_redirect_target() {
    let remote = RemoteApiSource::new(&spawn_oauth_server().await).unwrap();

    let reply = remote.login().await;
    assert_eq!(
        reply.into_result().unwrap().authorization_url,
        "https://accounts.example.com/authorize?client_id=abc"
    );
}

#[tokio::test]
async fn test_callback_reads_redirect_outcome() {
    let remote = RemoteApiSource::new(&spawn_oauth_server().await).unwrap();

    let ok = remote
        .callback(CallbackParams {
            code: "good".to_string(),
            state: "s".to_string(),
        })
        .await
        .into_result()
        .unwrap();
    assert!(ok.success);
    assert_eq!(ok.error, None);

    let failed = remote
        .callback(CallbackParams {
            code: "bad".to_string(),
            state: "s".to_string(),
        })
        .await
        .into_result()
        .unwrap();
    assert!(!failed.success);
    assert_eq!(failed.error.as_deref(), Some("State mismatch"));
}

#[tokio::test]
async fn test_selector_prefers_healthy_remote() {
    let config = AppConfig {
        api_base_url: Some(spawn_demo_instance().await),
        ..AppConfig::default()
    };

    let source = select_data_source(&config).await.unwrap();
    assert_eq!(source.kind(), SourceKind::Remote);

    let reply = source.search_tracks(SearchParams::new("sheeran")).await;
    assert_eq!(reply.into_result().unwrap().total, 2);
}
