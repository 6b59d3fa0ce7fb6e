use crate::error::ApiError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::sleep;

const CATALOG_BASE: &str = "https://api.music.apple.com/v1/catalog/us";
const TOKEN_TTL_SECONDS: u64 = 3600;
const WRITER_SEARCH_PACING: Duration = Duration::from_millis(100);
const MAX_WRITER_LOOKUPS: usize = 3;

#[derive(Debug, Serialize)]
struct DeveloperTokenClaims {
    iss: String,
    iat: u64,
    exp: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditStatus {
    Found,
    FoundWithCredits,
    NotFound,
    NoIsrc,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WriterIpi {
    pub name: String,
    pub ipi: String,
    pub found_as: String,
}

/// Songwriter credit lookup result for one ISRC. `details` is present for
/// the `found` statuses only.
#[derive(Debug, Clone, Serialize)]
pub struct TrackCredits {
    pub isrc: String,
    pub api_status: CreditStatus,
    #[serde(flatten, skip_serializing_if = "Option::is_none")]
    pub details: Option<CreditDetails>,
}

impl TrackCredits {
    pub fn status_only(isrc: &str, api_status: CreditStatus) -> Self {
        Self {
            isrc: isrc.to_string(),
            api_status,
            details: None,
        }
    }
}

/// Enrichment fields merged into track records. The Apple-side naming fields
/// are prefixed so they never collide with the Spotify fields they sit next
/// to after serde flattening.
#[derive(Debug, Clone, Serialize)]
pub struct CreditDetails {
    pub apple_track_name: String,
    pub apple_artist_name: String,
    pub composer_names: String,
    pub apple_music_url: String,
    pub genre_names: String,
    pub main_artist_ipi: Option<String>,
    pub writer_ipis: Vec<WriterIpi>,
    pub all_ipi_numbers: Vec<String>,
    pub composer_count: usize,
    pub total_ipis_found: usize,
    pub all_ipi_string: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SongsResponse {
    #[serde(default)]
    data: Vec<Song>,
}

#[derive(Debug, Deserialize)]
struct Song {
    #[serde(default)]
    attributes: Option<SongAttributes>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SongAttributes {
    #[serde(default)]
    name: String,
    #[serde(default)]
    artist_name: String,
    #[serde(default)]
    composer_name: Option<String>,
    #[serde(default)]
    url: String,
    #[serde(default)]
    genre_names: Vec<String>,
    #[serde(default)]
    artist_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ArtistSearchResponse {
    #[serde(default)]
    results: Option<ArtistResults>,
}

#[derive(Debug, Deserialize)]
struct ArtistResults {
    #[serde(default)]
    artists: Option<ArtistData>,
}

#[derive(Debug, Deserialize)]
struct ArtistData {
    #[serde(default)]
    data: Vec<ArtistEntry>,
}

#[derive(Debug, Deserialize)]
struct ArtistEntry {
    #[serde(default)]
    attributes: Option<ArtistAttributes>,
}

#[derive(Debug, Default, Deserialize)]
struct ArtistAttributes {
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: String,
}

/// Apple Music catalog client. Signs a fresh ES256 developer token per
/// lookup from the `.p8` key loaded at process start.
pub struct AppleMusicClient {
    client: Client,
    team_id: String,
    key_id: String,
    encoding_key: EncodingKey,
}

impl AppleMusicClient {
    pub fn new(
        team_id: String,
        key_id: String,
        private_key_pem: &[u8],
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        let encoding_key = EncodingKey::from_ec_pem(private_key_pem)?;
        Ok(Self {
            client: Client::new(),
            team_id,
            key_id,
            encoding_key,
        })
    }

    pub fn developer_token(&self) -> Result<String, jsonwebtoken::errors::Error> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let claims = DeveloperTokenClaims {
            iss: self.team_id.clone(),
            iat: now,
            exp: now + TOKEN_TTL_SECONDS,
        };

        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.key_id.clone());

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
    }

    /// Looks up songwriter credits for one ISRC. Failures are absorbed into
    /// an `error` status so multi-track enrichment can skip and continue.
    pub async fn credits_by_isrc(&self, isrc: &str) -> TrackCredits {
        match self.lookup(isrc).await {
            Ok(credits) => credits,
            Err(error) => {
                tracing::warn!(%isrc, %error, "apple music lookup failed");
                TrackCredits::status_only(isrc, CreditStatus::Error)
            }
        }
    }

    async fn lookup(&self, isrc: &str) -> Result<TrackCredits, ApiError> {
        let token = self.developer_token()?;
        let url = format!(
            "{CATALOG_BASE}/songs?filter[isrc]={}&include=artists,albums,composers&extend=editorialNotes,offers,artistUrl,popularity",
            urlencoding::encode(isrc),
        );

        let response = self.client.get(&url).bearer_auth(&token).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::AppleMusic(format!(
                "isrc lookup returned {}",
                response.status()
            )));
        }

        let parsed: SongsResponse = response.json().await?;
        let Some(attributes) = parsed.data.into_iter().next().and_then(|s| s.attributes) else {
            return Ok(TrackCredits::status_only(isrc, CreditStatus::NotFound));
        };

        let mut all_ipi_numbers = Vec::new();

        let main_artist_ipi = attributes.artist_url.as_deref().and_then(extract_ipi);
        if let Some(ipi) = &main_artist_ipi {
            all_ipi_numbers.push(ipi.clone());
        }

        let composer_names = attributes.composer_name.unwrap_or_default();
        let mut writer_ipis = Vec::new();
        for writer in split_writers(&composer_names)
            .into_iter()
            .take(MAX_WRITER_LOOKUPS)
        {
            if let Some(found) = self.find_writer_ipi(&token, &writer).await {
                all_ipi_numbers.push(found.ipi.clone());
                writer_ipis.push(found);
            }
            sleep(WRITER_SEARCH_PACING).await;
        }

        let api_status =
            if !composer_names.is_empty() || main_artist_ipi.is_some() || !writer_ipis.is_empty() {
                CreditStatus::FoundWithCredits
            } else {
                CreditStatus::Found
            };

        let composer_count = split_writers(&composer_names).len();
        let total_ipis_found = all_ipi_numbers.len();
        let all_ipi_string = if all_ipi_numbers.is_empty() {
            None
        } else {
            Some(all_ipi_numbers.join(","))
        };

        Ok(TrackCredits {
            isrc: isrc.to_string(),
            api_status,
            details: Some(CreditDetails {
                apple_track_name: attributes.name,
                apple_artist_name: attributes.artist_name,
                composer_names,
                apple_music_url: attributes.url,
                genre_names: attributes.genre_names.join(", "),
                main_artist_ipi,
                writer_ipis,
                all_ipi_numbers,
                composer_count,
                total_ipis_found,
                all_ipi_string,
            }),
        })
    }

    /// Searches one writer name as an artist and extracts an IPI-like id
    /// from the matched profile URL. Any failure means no credit for this
    /// writer, never a request failure.
    async fn find_writer_ipi(&self, token: &str, writer: &str) -> Option<WriterIpi> {
        let url = format!(
            "{CATALOG_BASE}/search?term={}&types=artists&limit=5",
            urlencoding::encode(writer),
        );

        let response = self.client.get(&url).bearer_auth(token).send().await.ok()?;
        if !response.status().is_success() {
            return None;
        }
        let parsed: ArtistSearchResponse = response.json().await.ok()?;

        let entries = parsed.results?.artists?.data;
        let writer_lower = writer.to_lowercase();

        for entry in entries {
            let Some(attributes) = entry.attributes else {
                continue;
            };
            let artist_lower = attributes.name.to_lowercase();
            if writer_lower == artist_lower || writer_lower.contains(&artist_lower) {
                if let Some(ipi) = extract_ipi(&attributes.url) {
                    return Some(WriterIpi {
                        name: writer.to_string(),
                        ipi,
                        found_as: attributes.name,
                    });
                }
            }
        }

        None
    }
}

/// Extracts the trailing 9-11 digit segment of an artist profile URL,
/// an unverified proxy for the artist's IPI number.
pub fn extract_ipi(url: &str) -> Option<String> {
    let (rest, last) = url.trim_end_matches('/').rsplit_once('/')?;
    if !(9..=11).contains(&last.len()) || !last.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.contains("/artist/").then(|| last.to_string())
}

/// Splits an Apple Music composer string ("A, B & C") into writer names.
pub fn split_writers(composer_names: &str) -> Vec<String> {
    composer_names
        .split(['&', ','])
        .map(str::trim)
        .filter(|writer| !writer.is_empty())
        .map(str::to_string)
        .collect()
}
