use crate::apple_music::AppleMusicClient;
use crate::discovery::{collect_playlist_tracks, discover_playlists};
use crate::enrichment::enrich_tracks;
use crate::error::ApiError;
use crate::models::{
    AnalyzeRequest, AnalyzeResponse, CreditsRequest, CreditsResponse, HealthResponse,
    ProfileRequest, TestResponse, TracksRequest, TracksResponse,
};
use crate::state::AppState;
use crate::warehouse::ProfileReport;
use axum::{Json, extract::State};
use std::sync::Arc;

const TOP_PLAYLISTS: usize = 10;
const TEST_ISRC: &str = "USRC17607839";

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "chartscout".to_string(),
    })
}

/// Verifies the Apple Music credentials end to end with a known ISRC.
pub async fn test_connections(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TestResponse>, ApiError> {
    let apple = require_apple(&state)?;
    let token = apple.developer_token()?;
    let test_search = apple.credits_by_isrc(TEST_ISRC).await;

    Ok(Json(TestResponse {
        success: true,
        message: "Apple Music API connection working".to_string(),
        token_generated: true,
        token_length: token.len(),
        test_search,
    }))
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let market = non_empty(request.market, "market")?;
    let genre = non_empty(request.genre, "genre")?;

    tracing::info!(%market, %genre, "starting playlist discovery");
    let ranked = discover_playlists(&state.spotify, &market, &genre).await?;

    let playlists_found = ranked.len();
    let mut playlists = ranked;
    playlists.truncate(TOP_PLAYLISTS);

    Ok(Json(AnalyzeResponse {
        success: true,
        market,
        genre,
        playlists_found,
        playlists,
    }))
}

pub async fn playlist_tracks(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TracksRequest>,
) -> Result<Json<TracksResponse>, ApiError> {
    if request.playlist_ids.is_empty() {
        return Err(ApiError::BadRequest("playlist_ids required".to_string()));
    }

    let tracks = collect_playlist_tracks(&state.spotify, &request.playlist_ids).await?;

    Ok(Json(TracksResponse {
        success: true,
        total_tracks: tracks.len(),
        tracks,
    }))
}

pub async fn writer_credits(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreditsRequest>,
) -> Result<Json<CreditsResponse>, ApiError> {
    if request.tracks.is_empty() {
        return Err(ApiError::BadRequest("tracks required".to_string()));
    }
    let apple = require_apple(&state)?;

    let (stats, tracks) = enrich_tracks(apple, request.tracks).await;

    Ok(Json(CreditsResponse {
        success: true,
        stats,
        tracks,
    }))
}

pub async fn profile_market(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProfileRequest>,
) -> Result<Json<ProfileReport>, ApiError> {
    let market = non_empty(request.market, "market")?;
    let genre = non_empty(request.genre, "genre")?;

    Ok(Json(state.profiling.profile_market_genre(&market, &genre).await))
}

fn non_empty(value: Option<String>, field: &str) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ApiError::BadRequest(format!("{field} required"))),
    }
}

fn require_apple(state: &AppState) -> Result<&AppleMusicClient, ApiError> {
    state
        .apple_music
        .as_ref()
        .ok_or(ApiError::AppleMusicUnconfigured)
}
