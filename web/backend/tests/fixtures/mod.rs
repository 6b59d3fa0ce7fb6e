use axum::{
    Router,
    routing::{get, post},
};
use chartscout_web::handlers;
use chartscout_web::models::TrackRecord;
use chartscout_web::spotify::SpotifyClient;
use chartscout_web::state::AppState;
use chartscout_web::warehouse::{ProfilingService, WarehouseBackend};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// App state with placeholder Spotify credentials, no Apple Music key and
/// the sample-data warehouse. Good for every handler path that does not
/// reach the network.
pub fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
        spotify: SpotifyClient::new("test_client_id".to_string(), "test_secret".to_string()),
        apple_music: None,
        profiling: ProfilingService::new(WarehouseBackend::Mock),
    })
}

pub fn test_app() -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/api/test", get(handlers::test_connections))
        .route("/api/analyze", post(handlers::analyze))
        .route("/api/playlist-tracks", post(handlers::playlist_tracks))
        .route("/api/writer-credits", post(handlers::writer_credits))
        .route("/api/profile", post(handlers::profile_market))
        .layer(CorsLayer::permissive())
        .with_state(test_state())
}

pub fn sample_track() -> TrackRecord {
    TrackRecord {
        playlist_name: "Rap Francais 2024".to_string(),
        playlist_id: "37i9dQZF1DWU4xkXueiKGW".to_string(),
        playlist_followers: Some(1_200_000),
        track_name: "Test Track".to_string(),
        track_artist: "Test Artist".to_string(),
        track_added_at: Some("2024-05-17T09:30:00Z".to_string()),
        track_release_date: Some("2024-04-26".to_string()),
        track_popularity: Some(71),
        isrc: Some("FRUM72400123".to_string()),
        spotify_link: Some("https://open.spotify.com/track/abc123".to_string()),
    }
}
