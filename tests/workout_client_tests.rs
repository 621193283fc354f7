use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gymflow::config::{ApiConfig, RateLimitConfig};
use gymflow::workout::client::MAX_LISTING_PAGES;
use gymflow::workout::{load_workout, WorkoutClient, WorkoutError, WorkoutSource};

fn client_for(server: &MockServer) -> WorkoutClient {
    let config = ApiConfig {
        base_url: format!("{}/", server.uri()),
        token: Some("studio-token".to_string()),
        ..ApiConfig::default()
    };
    WorkoutClient::new(&config).unwrap()
}

#[tokio::test]
async fn test_fetch_uses_bearer_token_envelope_and_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workouts/legs"))
        .and(header("authorization", "Bearer studio-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "workout": {
                    "publicId": "legs",
                    "name": "Legs",
                    "exercises": [
                        { "id": 1, "name": "Squats", "type": "strength", "duration": 40 },
                        { "id": 2, "name": "Lunges", "type": "strength" }
                    ]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let workout = load_workout(&client, "legs").await.unwrap();
    assert_eq!(workout.id, "legs");
    assert_eq!(workout.exercises[1].duration_seconds, 60);

    // Served from cache; the mock expects a single request
    let again = load_workout(&client, "legs").await.unwrap();
    assert_eq!(again, workout);
}

#[tokio::test]
async fn test_missing_workout_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workouts/ghost"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "message": "Workout not found"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_workout("ghost").await.unwrap_err();
    assert!(matches!(err, WorkoutError::NotFound(ref id) if id == "ghost"));
}

#[tokio::test]
async fn test_server_error_carries_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workouts/legs"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "Maintenance" })))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_workout("legs").await.unwrap_err();
    match &err {
        WorkoutError::Api { status, message } => {
            assert_eq!(*status, 503);
            assert_eq!(message, "Maintenance");
        }
        other => panic!("expected api error, got {other:?}"),
    }
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_listing_walks_every_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workouts"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "workouts": [{ "publicId": "a", "name": "A" }],
                "totalPages": 2,
                "currentPage": 1,
                "total": 2
            }
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/workouts"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "workouts": [{ "publicId": "b", "name": "B" }],
                "totalPages": 2,
                "currentPage": 2,
                "total": 2
            }
        })))
        .mount(&server)
        .await;

    let listed = client_for(&server).list_workouts().await.unwrap();
    let ids: Vec<String> = listed.iter().filter_map(|w| w.identifier()).collect();
    assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
}

#[tokio::test]
async fn test_unsafe_ids_are_refused_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "x", "exercises": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    for id in ["../users", "a?admin=1", "a#frag", "%2e%2e", ".hidden", ""] {
        let err = client.fetch_workout(id).await.unwrap_err();
        assert!(matches!(err, WorkoutError::NotFound(ref got) if got == id), "id {id:?} gave {err:?}");
    }
}

#[tokio::test]
async fn test_listing_stops_at_page_cap() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workouts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workouts": [{ "publicId": "w", "name": "W" }],
            "totalPages": 1_000_000_000u64,
            "currentPage": 1
        })))
        .expect(u64::from(MAX_LISTING_PAGES))
        .mount(&server)
        .await;

    let config = ApiConfig {
        base_url: server.uri(),
        rate_limit: RateLimitConfig {
            requests_per_second: 1000,
            burst_capacity: 1000,
        },
        ..ApiConfig::default()
    };
    let client = WorkoutClient::new(&config).unwrap();
    let listed = client.list_workouts().await.unwrap();
    assert_eq!(listed.len(), MAX_LISTING_PAGES as usize);
}
