use crate::error::ApiError;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;

const ACCOUNTS_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE: &str = "https://api.spotify.com/v1";
const PAGE_PACING: Duration = Duration::from_millis(100);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub owner: Option<PlaylistOwner>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistOwner {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlaylistSearchResponse {
    #[serde(default)]
    playlists: Option<PlaylistPage>,
}

// Search pages can contain null entries, hence Vec<Option<_>>
#[derive(Debug, Default, Deserialize)]
struct PlaylistPage {
    #[serde(default)]
    items: Vec<Option<PlaylistItem>>,
}

#[derive(Debug, Deserialize)]
pub struct PlaylistDetails {
    pub name: String,
    #[serde(default)]
    pub followers: Option<FollowerCount>,
}

impl PlaylistDetails {
    pub fn follower_total(&self) -> u64 {
        self.followers.as_ref().map_or(0, |f| f.total)
    }
}

#[derive(Debug, Deserialize)]
pub struct FollowerCount {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct TracksPage {
    #[serde(default)]
    pub items: Vec<TrackEntry>,
    #[serde(default)]
    pub next: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TrackEntry {
    #[serde(default)]
    pub added_at: Option<String>,
    #[serde(default)]
    pub track: Option<TrackObject>,
}

#[derive(Debug, Deserialize)]
pub struct TrackObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub popularity: Option<u32>,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    #[serde(default)]
    pub album: Option<TrackAlbum>,
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
    #[serde(default)]
    pub external_urls: Option<ExternalUrls>,
}

impl TrackObject {
    pub fn artist_names(&self) -> String {
        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn isrc(&self) -> Option<String> {
        self.external_ids.as_ref().and_then(|ids| ids.isrc.clone())
    }

    pub fn spotify_link(&self) -> Option<String> {
        self.external_urls
            .as_ref()
            .and_then(|urls| urls.spotify.clone())
    }

    pub fn release_date(&self) -> Option<String> {
        self.album.as_ref().and_then(|a| a.release_date.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct TrackAlbum {
    #[serde(default)]
    pub release_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExternalIds {
    #[serde(default)]
    pub isrc: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Spotify Web API client using the client-credentials flow. Tokens are
/// fetched per handling call and not cached.
pub struct SpotifyClient {
    client: Client,
    client_id: String,
    client_secret: String,
}

impl SpotifyClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client: Client::new(),
            client_id,
            client_secret,
        }
    }

    pub async fn access_token(&self) -> Result<String, ApiError> {
        let credentials = BASE64.encode(format!("{}:{}", self.client_id, self.client_secret));

        let response = self
            .client
            .post(ACCOUNTS_URL)
            .header("Authorization", format!("Basic {credentials}"))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::SpotifyAuth(format!(
                "token endpoint returned {}",
                response.status()
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    pub async fn search_playlists(
        &self,
        token: &str,
        query: &str,
        market_code: &str,
        limit: u32,
    ) -> Result<Vec<PlaylistItem>, ApiError> {
        let url = format!(
            "{API_BASE}/search?q={}&type=playlist&market={}&limit={limit}",
            urlencoding::encode(query),
            urlencoding::encode(market_code),
        );

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Spotify(format!(
                "search returned {}",
                response.status()
            )));
        }

        let parsed: PlaylistSearchResponse = response.json().await?;
        Ok(parsed
            .playlists
            .unwrap_or_default()
            .items
            .into_iter()
            .flatten()
            .collect())
    }

    pub async fn playlist_details(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<PlaylistDetails, ApiError> {
        let url = format!("{API_BASE}/playlists/{playlist_id}");

        let response = self.client.get(&url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Spotify(format!(
                "playlist {playlist_id} returned {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    /// Fetches every page of a playlist via the `next` links. A failing page
    /// truncates the result instead of failing the whole playlist.
    pub async fn playlist_tracks(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Vec<TrackEntry>, ApiError> {
        let mut next_url = Some(format!("{API_BASE}/playlists/{playlist_id}/tracks?limit=100"));
        let mut entries = Vec::new();

        while let Some(url) = next_url {
            let response = self.client.get(&url).bearer_auth(token).send().await?;
            if !response.status().is_success() {
                tracing::warn!(
                    %playlist_id,
                    status = %response.status(),
                    "track page fetch failed, returning partial result"
                );
                break;
            }

            let page: TracksPage = response.json().await?;
            entries.extend(page.items);
            next_url = page.next;

            sleep(PAGE_PACING).await;
        }

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_skips_null_items() {
        let body = r#"{
            "playlists": {
                "items": [
                    {"id": "p1", "name": "Rap FR", "owner": {"display_name": "Spotify"}},
                    null,
                    {"id": "p2", "name": "Hits", "description": "the hits"}
                ]
            }
        }"#;

        let parsed: PlaylistSearchResponse = serde_json::from_str(body).unwrap();
        let items: Vec<PlaylistItem> = parsed
            .playlists
            .unwrap_or_default()
            .items
            .into_iter()
            .flatten()
            .collect();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "p1");
        assert_eq!(
            items[0].owner.as_ref().unwrap().display_name.as_deref(),
            Some("Spotify")
        );
        assert_eq!(items[1].description.as_deref(), Some("the hits"));
    }

    #[test]
    fn track_object_accessors_flatten_nested_fields() {
        let body = r#"{
            "name": "Song",
            "popularity": 63,
            "artists": [{"name": "A"}, {"name": "B"}],
            "album": {"release_date": "2024-03-01"},
            "external_ids": {"isrc": "USRC17607839"},
            "external_urls": {"spotify": "https://open.spotify.com/track/x"}
        }"#;

        let track: TrackObject = serde_json::from_str(body).unwrap();
        assert_eq!(track.artist_names(), "A, B");
        assert_eq!(track.isrc().as_deref(), Some("USRC17607839"));
        assert_eq!(track.release_date().as_deref(), Some("2024-03-01"));
        assert_eq!(
            track.spotify_link().as_deref(),
            Some("https://open.spotify.com/track/x")
        );
    }

    #[test]
    fn tracks_page_tolerates_missing_fields() {
        let body = r#"{"items": [{"added_at": null, "track": null}], "next": null}"#;
        let page: TracksPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.items[0].track.is_none());
        assert!(page.next.is_none());
    }
}
