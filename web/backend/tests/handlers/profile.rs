use crate::fixtures::{test_app, test_state};
use axum::{
    Json,
    body::{Body, to_bytes},
    extract::State,
    http::{Request, StatusCode, header},
    response::IntoResponse,
};
use chartscout_web::handlers::profile_market;
use chartscout_web::models::ProfileRequest;
use serde_json::{Value, json};
use tower::util::ServiceExt;

#[tokio::test]
async fn profile_rejects_missing_genre() {
    let request = ProfileRequest {
        market: Some("UK".to_string()),
        genre: None,
    };

    let result = profile_market(State(test_state()), Json(request)).await;
    let error = result.err().unwrap();
    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn profile_with_sample_backend_returns_full_report() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profile")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({"market": "France", "genre": "hip-hop"}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let report: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(report["status"], "success");
    assert_eq!(report["market"], "FR");
    assert_eq!(report["market_display"], "France");
    assert_eq!(report["genre"], "hip-hop");
    assert!(!report["playlist_performance"].as_array().unwrap().is_empty());
    assert!(!report["most_common_playlists"].as_array().unwrap().is_empty());
    assert!(!report["timing_analysis"].as_array().unwrap().is_empty());
    assert!(!report["seasonality"].as_array().unwrap().is_empty());
    assert!(report["errors"].as_array().unwrap().is_empty());
    assert!(report["summary_stats"]["total_5_50m_songs"].is_number());
}
