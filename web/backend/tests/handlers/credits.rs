use crate::fixtures::{sample_track, test_state};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chartscout_web::handlers::writer_credits;
use chartscout_web::models::CreditsRequest;

#[tokio::test]
async fn empty_track_list_is_rejected() {
    let request = CreditsRequest { tracks: vec![] };

    let result = writer_credits(State(test_state()), Json(request)).await;
    let error = result.err().unwrap();
    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_apple_credentials_return_service_unavailable() {
    let request = CreditsRequest {
        tracks: vec![sample_track()],
    };

    let result = writer_credits(State(test_state()), Json(request)).await;
    let error = result.err().unwrap();
    assert_eq!(
        error.into_response().status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}
