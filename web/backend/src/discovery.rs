use crate::error::ApiError;
use crate::models::TrackRecord;
use crate::spotify::SpotifyClient;
use chartscout_core::{
    RankedPlaylist, RawPlaylist, build_search_phrases, canonical_genre, is_denied, market_profile,
    rank_playlists, skip_terms,
};
use chrono::{Datelike, Utc};
use rustc_hash::FxHashSet;
use std::time::Duration;
use tokio::time::sleep;

const SEARCH_PAGE_SIZE: u32 = 20;
const MAX_CANDIDATES: usize = 30;
const DETAIL_PACING: Duration = Duration::from_millis(100);

/// Runs the full playlist discovery pipeline for one market/genre pair:
/// localized phrase search, dedupe, deny filter, follower refresh, ranking.
pub async fn discover_playlists(
    spotify: &SpotifyClient,
    market: &str,
    genre: &str,
) -> Result<Vec<RankedPlaylist>, ApiError> {
    let token = spotify.access_token().await?;

    let profile = market_profile(market);
    let genre = canonical_genre(genre);
    let phrases = build_search_phrases(&profile, &genre);
    let denied = skip_terms(&profile.name, &genre);

    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut candidates: Vec<RawPlaylist> = Vec::new();

    for phrase in &phrases {
        let items = match spotify
            .search_playlists(&token, phrase, &profile.code, SEARCH_PAGE_SIZE)
            .await
        {
            Ok(items) => items,
            Err(error) => {
                tracing::warn!(%phrase, %error, "playlist search failed, skipping phrase");
                continue;
            }
        };

        for item in items {
            if !seen.insert(item.id.clone()) {
                continue;
            }
            let raw = RawPlaylist {
                id: item.id,
                name: item.name,
                owner: item.owner.and_then(|o| o.display_name).unwrap_or_default(),
                followers: 0,
                description: item.description.unwrap_or_default(),
                source_query: phrase.clone(),
            };
            // drop denied names before spending detail requests on them
            if is_denied(&raw.name, &denied) {
                continue;
            }
            candidates.push(raw);
        }
    }

    candidates.truncate(MAX_CANDIDATES);

    // search results carry no follower counts, each survivor needs a
    // detail request
    for candidate in &mut candidates {
        match spotify.playlist_details(&token, &candidate.id).await {
            Ok(details) => candidate.followers = details.follower_total(),
            Err(error) => {
                tracing::warn!(playlist_id = %candidate.id, %error, "follower fetch failed");
            }
        }
        sleep(DETAIL_PACING).await;
    }

    let year = Utc::now().year();
    Ok(rank_playlists(&profile, &genre, year, candidates))
}

/// Pulls the track listings for a set of playlists. A playlist that fails
/// entirely is skipped with a warning rather than failing the batch.
pub async fn collect_playlist_tracks(
    spotify: &SpotifyClient,
    playlist_ids: &[String],
) -> Result<Vec<TrackRecord>, ApiError> {
    let token = spotify.access_token().await?;
    let mut records = Vec::new();

    for playlist_id in playlist_ids {
        let details = match spotify.playlist_details(&token, playlist_id).await {
            Ok(details) => details,
            Err(error) => {
                tracing::warn!(%playlist_id, %error, "playlist fetch failed, skipping");
                continue;
            }
        };
        let playlist_followers = Some(details.follower_total());

        let entries = match spotify.playlist_tracks(&token, playlist_id).await {
            Ok(entries) => entries,
            Err(error) => {
                tracing::warn!(%playlist_id, %error, "track listing failed, skipping");
                continue;
            }
        };

        for entry in entries {
            let Some(track) = entry.track else { continue };
            records.push(TrackRecord {
                playlist_name: details.name.clone(),
                playlist_id: playlist_id.clone(),
                playlist_followers,
                track_name: track.name.clone().unwrap_or_default(),
                track_artist: track.artist_names(),
                track_added_at: entry.added_at,
                track_release_date: track.release_date(),
                track_popularity: track.popularity,
                isrc: track.isrc(),
                spotify_link: track.spotify_link(),
            });
        }
    }

    Ok(records)
}
