use super::queries::WarehouseSchema;
use crate::error::ApiError;
use chartscout_core::market_profile;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Runs one statement at a time over the Snowflake SQL REST API and hands
/// rows back as JSON objects keyed by column name.
pub struct SnowflakeClient {
    client: Client,
    statements_url: String,
    token: String,
    warehouse: String,
    schema: WarehouseSchema,
}

#[derive(Deserialize)]
struct StatementResponse {
    #[serde(rename = "resultSetMetaData")]
    metadata: Option<ResultSetMetadata>,
    #[serde(default)]
    data: Vec<Vec<Value>>,
}

#[derive(Deserialize)]
struct ResultSetMetadata {
    #[serde(rename = "rowType", default)]
    row_type: Vec<ColumnType>,
}

#[derive(Deserialize)]
struct ColumnType {
    name: String,
}

impl SnowflakeClient {
    pub fn new(account: String, token: String, warehouse: String, schema: WarehouseSchema) -> Self {
        Self {
            client: Client::new(),
            statements_url: format!("https://{account}.snowflakecomputing.com/api/v2/statements"),
            token,
            warehouse,
            schema,
        }
    }

    pub fn schema(&self) -> &WarehouseSchema {
        &self.schema
    }

    pub async fn execute(&self, statement: &str) -> Result<Vec<Value>, ApiError> {
        let response = self
            .client
            .post(&self.statements_url)
            .bearer_auth(&self.token)
            .header("X-Snowflake-Authorization-Token-Type", "OAUTH")
            .json(&json!({
                "statement": statement,
                "warehouse": self.warehouse,
                "database": self.schema.database,
                "schema": self.schema.schema,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ApiError::Warehouse(format!(
                "statement returned {}",
                response.status()
            )));
        }

        let parsed: StatementResponse = response.json().await?;
        let columns: Vec<String> = parsed
            .metadata
            .map(|m| m.row_type.into_iter().map(|c| c.name).collect())
            .unwrap_or_default();

        let rows = parsed
            .data
            .into_iter()
            .map(|row| {
                let object = columns
                    .iter()
                    .cloned()
                    .zip(row.into_iter().chain(std::iter::repeat(Value::Null)))
                    .collect::<serde_json::Map<String, Value>>();
                Value::Object(object)
            })
            .collect();

        Ok(rows)
    }
}

pub enum WarehouseBackend {
    Snowflake(SnowflakeClient),
    Mock,
}

#[derive(Serialize)]
pub struct ProfileReport {
    pub status: String,
    pub market: String,
    pub market_display: String,
    pub genre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub summary_stats: Value,
    pub playlist_performance: Vec<Value>,
    pub most_common_playlists: Vec<Value>,
    pub timing_analysis: Vec<Value>,
    pub seasonality: Vec<Value>,
    pub errors: Vec<String>,
}

/// Orchestrates the profiling queries for one market/genre pair. A failing
/// query turns into an empty section plus an entry in `errors`, never a
/// failed report.
pub struct ProfilingService {
    backend: WarehouseBackend,
}

impl ProfilingService {
    pub fn new(backend: WarehouseBackend) -> Self {
        Self { backend }
    }

    pub async fn profile_market_genre(&self, market: &str, genre: &str) -> ProfileReport {
        let territory = market_profile(market).code;

        let snowflake = match &self.backend {
            WarehouseBackend::Snowflake(client) => client,
            WarehouseBackend::Mock => return mock_report(market, &territory, genre),
        };

        let schema = snowflake.schema().clone();
        let mut errors = Vec::new();

        let mut section = |name: &str, result: Result<Vec<Value>, ApiError>| match result {
            Ok(rows) => {
                tracing::info!(query = name, rows = rows.len(), "profiling query done");
                rows
            }
            Err(error) => {
                tracing::error!(query = name, %error, "profiling query failed");
                errors.push(format!("{name} failed: {error}"));
                Vec::new()
            }
        };

        let summary = section(
            "summary_stats",
            snowflake.execute(&schema.summary_stats(&territory)).await,
        );
        let playlist_performance = section(
            "playlist_performance",
            snowflake
                .execute(&schema.playlist_performance(&territory))
                .await,
        );
        let most_common_playlists = section(
            "most_common_playlists",
            snowflake
                .execute(&schema.most_common_playlists(&territory))
                .await,
        );
        let timing_analysis = section(
            "timing_analysis",
            snowflake.execute(&schema.timing_analysis(&territory)).await,
        );
        let seasonality = section(
            "seasonality",
            snowflake.execute(&schema.seasonality(&territory)).await,
        );

        let total_rows = playlist_performance.len()
            + most_common_playlists.len()
            + timing_analysis.len()
            + seasonality.len();

        let (status, message) = if total_rows == 0 {
            (
                "no_data".to_string(),
                Some(format!("No profiling data found for {market} {genre}")),
            )
        } else {
            ("success".to_string(), None)
        };

        ProfileReport {
            status,
            market: territory,
            market_display: market.to_string(),
            genre: genre.to_string(),
            message,
            summary_stats: summary.into_iter().next().unwrap_or_else(|| json!({})),
            playlist_performance,
            most_common_playlists,
            timing_analysis,
            seasonality,
            errors,
        }
    }
}

/// Sample report with the same shape the warehouse queries produce, for
/// running the frontend without warehouse credentials.
fn mock_report(market: &str, territory: &str, genre: &str) -> ProfileReport {
    ProfileReport {
        status: "success".to_string(),
        market: territory.to_string(),
        market_display: market.to_string(),
        genre: genre.to_string(),
        message: None,
        summary_stats: json!({
            "total_5_50m_songs": 347,
            "total_playlists": 1243,
            "avg_playlists_per_song": 7.2,
            "avg_streams_millions": 16.8,
            "median_streams_millions": 12.4,
        }),
        playlist_performance: vec![
            json!({
                "playlist_name": format!("Radar {market}"),
                "total_songs": 241,
                "songs_hit_5_50m": 167,
                "hit_rate_5_50m_percent": 0.69,
                "followers": "3.2M",
                "avg_song_streams_millions": 22.5,
                "days_since_last_update": 2,
                "avg_songs_per_month": 48.0,
                "activity_status": "Very Active",
                "model_priority": "High Priority",
            }),
            json!({
                "playlist_name": format!("New Music Friday {market}"),
                "total_songs": 198,
                "songs_hit_5_50m": 89,
                "hit_rate_5_50m_percent": 0.45,
                "followers": "4.8M",
                "avg_song_streams_millions": 18.7,
                "days_since_last_update": 5,
                "avg_songs_per_month": 32.0,
                "activity_status": "Very Active",
                "model_priority": "High Priority",
            }),
            json!({
                "playlist_name": format!("{genre} Central"),
                "total_songs": 156,
                "songs_hit_5_50m": 67,
                "hit_rate_5_50m_percent": 0.43,
                "followers": "1.9M",
                "avg_song_streams_millions": 12.3,
                "days_since_last_update": 11,
                "avg_songs_per_month": 24.0,
                "activity_status": "Active",
                "model_priority": "Medium Priority",
            }),
        ],
        most_common_playlists: vec![
            json!({
                "playlist_name": format!("Radar {market}"),
                "hit_songs_count": 167,
                "percentage_of_5_50m_hits": 0.481,
                "followers": "3.2M",
                "days_since_last_update": 2,
                "activity_status": "Very Active",
            }),
            json!({
                "playlist_name": "Fresh Finds",
                "hit_songs_count": 56,
                "percentage_of_5_50m_hits": 0.161,
                "followers": "0.7M",
                "days_since_last_update": 1,
                "activity_status": "Very Active",
            }),
        ],
        timing_analysis: vec![
            json!({
                "time_to_5m": "1-3 months to 5M",
                "song_count": 127,
                "percentage": 0.473,
                "avg_final_streams_millions": 19.2,
            }),
            json!({
                "time_to_5m": "4-6 months to 5M",
                "song_count": 89,
                "percentage": 0.332,
                "avg_final_streams_millions": 14.7,
            }),
            json!({
                "time_to_5m": "7-12 months to 5M",
                "song_count": 34,
                "percentage": 0.127,
                "avg_final_streams_millions": 9.8,
            }),
            json!({
                "time_to_5m": "Over 1 year to 5M",
                "song_count": 18,
                "percentage": 0.067,
                "avg_final_streams_millions": 7.1,
            }),
        ],
        seasonality: vec![
            json!({"playlist_month": 1, "month_name": "January", "songs_added": 134, "hit_rate_5_50m_percent": 0.18}),
            json!({"playlist_month": 3, "month_name": "March", "songs_added": 156, "hit_rate_5_50m_percent": 0.31}),
            json!({"playlist_month": 9, "month_name": "September", "songs_added": 142, "hit_rate_5_50m_percent": 0.31}),
            json!({"playlist_month": 10, "month_name": "October", "songs_added": 138, "hit_rate_5_50m_percent": 0.26}),
            json!({"playlist_month": 12, "month_name": "December", "songs_added": 98, "hit_rate_5_50m_percent": 0.12}),
        ],
        errors: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_backend_reports_success_with_all_sections() {
        let service = ProfilingService::new(WarehouseBackend::Mock);
        let report = service.profile_market_genre("France", "hip-hop").await;

        assert_eq!(report.status, "success");
        assert_eq!(report.market, "FR");
        assert_eq!(report.market_display, "France");
        assert!(!report.playlist_performance.is_empty());
        assert!(!report.seasonality.is_empty());
        assert!(report.errors.is_empty());
        assert!(report.summary_stats.get("total_5_50m_songs").is_some());
    }

    #[tokio::test]
    async fn mock_report_localizes_playlist_names() {
        let service = ProfilingService::new(WarehouseBackend::Mock);
        let report = service.profile_market_genre("Germany", "pop").await;

        let first = &report.playlist_performance[0];
        assert_eq!(first["playlist_name"], "Radar Germany");
        assert_eq!(report.market, "DE");
    }

    #[test]
    fn statement_rows_zip_columns_with_values() {
        let body = r#"{
            "resultSetMetaData": {
                "rowType": [{"name": "PLAYLIST_NAME"}, {"name": "HIT_SONGS_COUNT"}]
            },
            "data": [["RapCaviar", "167"], ["Fresh Finds"]]
        }"#;

        let parsed: StatementResponse = serde_json::from_str(body).unwrap();
        let columns: Vec<String> = parsed
            .metadata
            .map(|m| m.row_type.into_iter().map(|c| c.name).collect())
            .unwrap();
        assert_eq!(columns, vec!["PLAYLIST_NAME", "HIT_SONGS_COUNT"]);
        assert_eq!(parsed.data[0][0], "RapCaviar");
        // short rows pad with nulls in execute(), so two columns never panic
        assert_eq!(parsed.data[1].len(), 1);
    }
}
