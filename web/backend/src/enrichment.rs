use crate::apple_music::{AppleMusicClient, CreditStatus};
use crate::models::{EnrichedTrack, EnrichmentStats, TrackRecord};
use std::time::Duration;
use tokio::time::sleep;

const MAX_TRACKS_PER_REQUEST: usize = 10;
const LOOKUP_PACING: Duration = Duration::from_millis(500);

fn rate(count: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", count as f64 / total as f64 * 100.0)
}

/// Enriches tracks with songwriter credits, capped per request to keep the
/// endpoint within upstream rate limits. Tracks without an ISRC are passed
/// through unmodified with a `no_isrc` status.
pub async fn enrich_tracks(
    apple: &AppleMusicClient,
    tracks: Vec<TrackRecord>,
) -> (EnrichmentStats, Vec<EnrichedTrack>) {
    let batch: Vec<TrackRecord> = tracks.into_iter().take(MAX_TRACKS_PER_REQUEST).collect();

    let total_processed = batch.len();
    let mut has_isrc = 0;
    let mut found_in_apple_music = 0;
    let mut has_writer_credits = 0;
    let mut enriched = Vec::with_capacity(batch.len());

    for record in batch {
        let Some(isrc) = record.isrc.clone() else {
            enriched.push(EnrichedTrack {
                base: record,
                api_status: CreditStatus::NoIsrc,
                credits: None,
            });
            continue;
        };
        has_isrc += 1;

        let credits = apple.credits_by_isrc(&isrc).await;
        if let Some(details) = &credits.details {
            found_in_apple_music += 1;
            if !details.composer_names.is_empty() {
                has_writer_credits += 1;
            }
        }

        enriched.push(EnrichedTrack {
            base: record,
            api_status: credits.api_status,
            credits: credits.details,
        });

        sleep(LOOKUP_PACING).await;
    }

    // success rates are over tracks that had an ISRC to look up at all
    let stats = EnrichmentStats {
        total_processed,
        has_isrc,
        found_in_apple_music,
        has_writer_credits,
        apple_music_success_rate: rate(found_in_apple_music, has_isrc),
        writer_credits_rate: rate(has_writer_credits, has_isrc),
    };

    (stats, enriched)
}
