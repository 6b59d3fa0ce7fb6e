use crate::apple_music::AppleMusicClient;
use crate::spotify::SpotifyClient;
use crate::warehouse::{ProfilingService, SnowflakeClient, WarehouseBackend, WarehouseSchema};
use std::env;
use std::error::Error;

pub struct AppState {
    pub spotify: SpotifyClient,
    pub apple_music: Option<AppleMusicClient>,
    pub profiling: ProfilingService,
}

fn require_env(name: &str) -> Result<String, Box<dyn Error>> {
    env::var(name).map_err(|_| format!("{name} must be set").into())
}

impl AppState {
    /// Builds the shared state from environment variables. Spotify
    /// credentials are required; Apple Music and the warehouse are optional
    /// and their endpoints degrade accordingly.
    pub fn from_env() -> Result<Self, Box<dyn Error>> {
        let spotify = SpotifyClient::new(
            require_env("SPOTIFY_CLIENT_ID")?,
            require_env("SPOTIFY_CLIENT_SECRET")?,
        );

        let apple_music = match (
            env::var("APPLE_MUSIC_TEAM_ID"),
            env::var("APPLE_MUSIC_KEY_ID"),
        ) {
            (Ok(team_id), Ok(key_id)) => {
                let pem = match env::var("APPLE_MUSIC_PRIVATE_KEY") {
                    Ok(inline) => inline.into_bytes(),
                    Err(_) => std::fs::read(require_env("APPLE_MUSIC_PRIVATE_KEY_PATH")?)?,
                };
                Some(AppleMusicClient::new(team_id, key_id, &pem)?)
            }
            _ => {
                tracing::warn!("apple music credentials not set, credit lookups disabled");
                None
            }
        };

        let backend = match (env::var("SNOWFLAKE_ACCOUNT"), env::var("SNOWFLAKE_TOKEN")) {
            (Ok(account), Ok(token)) => {
                let schema = WarehouseSchema {
                    database: env::var("SNOWFLAKE_DATABASE")
                        .unwrap_or_else(|_| "MUSIC_INSIGHTS".to_string()),
                    schema: env::var("SNOWFLAKE_SCHEMA").unwrap_or_else(|_| "PUBLIC".to_string()),
                };
                let warehouse =
                    env::var("SNOWFLAKE_WAREHOUSE").unwrap_or_else(|_| "COMPUTE_WH".to_string());
                WarehouseBackend::Snowflake(SnowflakeClient::new(account, token, warehouse, schema))
            }
            _ => {
                tracing::warn!("warehouse credentials not set, profiling uses sample data");
                WarehouseBackend::Mock
            }
        };

        Ok(Self {
            spotify,
            apple_music,
            profiling: ProfilingService::new(backend),
        })
    }
}
