use crate::apple_music::{CreditDetails, CreditStatus, TrackCredits};
use chartscout_core::RankedPlaylist;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
}

#[derive(Serialize)]
pub struct TestResponse {
    pub success: bool,
    pub message: String,
    pub token_generated: bool,
    pub token_length: usize,
    pub test_search: TrackCredits,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub market: Option<String>,
    pub genre: Option<String>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub market: String,
    pub genre: String,
    pub playlists_found: usize,
    pub playlists: Vec<RankedPlaylist>,
}

#[derive(Deserialize)]
pub struct TracksRequest {
    #[serde(default)]
    pub playlist_ids: Vec<String>,
}

#[derive(Serialize)]
pub struct TracksResponse {
    pub success: bool,
    pub total_tracks: usize,
    pub tracks: Vec<TrackRecord>,
}

/// One playlist entry joined with one of its tracks, the unit the
/// enrichment endpoint accepts back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackRecord {
    pub playlist_name: String,
    pub playlist_id: String,
    pub playlist_followers: Option<u64>,
    pub track_name: String,
    pub track_artist: String,
    pub track_added_at: Option<String>,
    pub track_release_date: Option<String>,
    pub track_popularity: Option<u32>,
    pub isrc: Option<String>,
    pub spotify_link: Option<String>,
}

#[derive(Deserialize)]
pub struct CreditsRequest {
    #[serde(default)]
    pub tracks: Vec<TrackRecord>,
}

#[derive(Serialize)]
pub struct CreditsResponse {
    pub success: bool,
    pub stats: EnrichmentStats,
    pub tracks: Vec<EnrichedTrack>,
}

#[derive(Serialize)]
pub struct EnrichedTrack {
    #[serde(flatten)]
    pub base: TrackRecord,
    pub api_status: CreditStatus,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub credits: Option<CreditDetails>,
}

#[derive(Serialize)]
pub struct EnrichmentStats {
    pub total_processed: usize,
    pub has_isrc: usize,
    pub found_in_apple_music: usize,
    pub has_writer_credits: usize,
    pub apple_music_success_rate: String,
    pub writer_credits_rate: String,
}

#[derive(Deserialize)]
pub struct ProfileRequest {
    pub market: Option<String>,
    pub genre: Option<String>,
}
