use crate::fixtures::test_state;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chartscout_web::handlers::analyze;
use chartscout_web::models::AnalyzeRequest;

#[tokio::test]
async fn analyze_rejects_missing_market() {
    let request = AnalyzeRequest {
        market: None,
        genre: Some("hip-hop".to_string()),
    };

    let result = analyze(State(test_state()), Json(request)).await;
    let error = result.err().unwrap();
    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn analyze_rejects_blank_genre() {
    let request = AnalyzeRequest {
        market: Some("France".to_string()),
        genre: Some("   ".to_string()),
    };

    let result = analyze(State(test_state()), Json(request)).await;
    let error = result.err().unwrap();
    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
}
