use crate::fixtures::test_state;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chartscout_web::handlers::playlist_tracks;
use chartscout_web::models::TracksRequest;

#[tokio::test]
async fn empty_playlist_ids_are_rejected() {
    let request = TracksRequest {
        playlist_ids: vec![],
    };

    let result = playlist_tracks(State(test_state()), Json(request)).await;
    let error = result.err().unwrap();
    assert_eq!(error.into_response().status(), StatusCode::BAD_REQUEST);
}

#[test]
fn playlist_ids_default_to_empty_when_absent() {
    let request: TracksRequest = serde_json::from_str("{}").unwrap();
    assert!(request.playlist_ids.is_empty());
}
