use assert_matches::assert_matches;
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use availability_cell::models::{AvailabilityError, CreateAvailabilityRequest};
use availability_cell::services::AvailabilityService;
use shared_config::AppConfig;

const TOKEN: &str = "test-token";

fn request(date: &str, start: &str, end: &str) -> CreateAvailabilityRequest {
    CreateAvailabilityRequest {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        start_time: NaiveTime::parse_from_str(start, "%H:%M").unwrap(),
        end_time: NaiveTime::parse_from_str(end, "%H:%M").unwrap(),
        notes: None,
    }
}

fn block_json(id: i64, start: &str, minutes: i32) -> serde_json::Value {
    json!({
        "id": id,
        "profesional_id": 7,
        "fecha_hora": start,
        "duracion_minutos": minutes,
    })
}

async fn mock_existing_blocks(server: &MockServer, blocks: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/profesionales/7/disponibilidad"))
        .respond_with(ResponseTemplate::new(200).set_body_json(blocks))
        .mount(server)
        .await;
}

#[tokio::test]
async fn creating_a_block_posts_the_computed_duration() {
    let server = MockServer::start().await;
    mock_existing_blocks(&server, json!([])).await;

    Mock::given(method("POST"))
        .and(path("/profesionales/disponibilidad"))
        .and(body_partial_json(json!({
            "profesional_id": 7,
            "fecha_hora": "2025-11-13T09:00:00",
            "duracion_minutos": 180,
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(block_json(11, "2025-11-13T09:00:00", 180)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = AvailabilityService::new(&AppConfig::with_api_url(server.uri()));
    let block = service
        .create_availability(7, request("2025-11-13", "09:00", "12:00"), TOKEN)
        .await
        .unwrap();

    assert_eq!(block.id, 11);
    assert_eq!(block.duration_minutes, 180);
}

#[tokio::test]
async fn overlapping_block_is_rejected_before_the_post() {
    let server = MockServer::start().await;

    // Existing block 10:00 - 12:00 on the same day
    mock_existing_blocks(
        &server,
        json!([block_json(3, "2025-11-13T10:00:00", 120)]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/profesionales/disponibilidad"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let service = AvailabilityService::new(&AppConfig::with_api_url(server.uri()));
    let result = service
        .create_availability(7, request("2025-11-13", "11:00", "13:00"), TOKEN)
        .await;

    assert_matches!(result, Err(AvailabilityError::Overlap { block_id: 3, .. }));
}

#[tokio::test]
async fn touching_blocks_are_allowed() {
    let server = MockServer::start().await;

    // Existing block ends exactly when the new one starts
    mock_existing_blocks(
        &server,
        json!([block_json(3, "2025-11-13T09:00:00", 120)]),
    )
    .await;

    Mock::given(method("POST"))
        .and(path("/profesionales/disponibilidad"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(block_json(4, "2025-11-13T11:00:00", 60)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = AvailabilityService::new(&AppConfig::with_api_url(server.uri()));
    let block = service
        .create_availability(7, request("2025-11-13", "11:00", "12:00"), TOKEN)
        .await
        .unwrap();

    assert_eq!(block.id, 4);
}

#[tokio::test]
async fn backend_409_surfaces_as_conflict() {
    let server = MockServer::start().await;
    mock_existing_blocks(&server, json!([])).await;

    // Local gate passes, but another writer won the race server-side
    Mock::given(method("POST"))
        .and(path("/profesionales/disponibilidad"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "El bloque se solapa con otro existente"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = AvailabilityService::new(&AppConfig::with_api_url(server.uri()));
    let result = service
        .create_availability(7, request("2025-11-13", "09:00", "12:00"), TOKEN)
        .await;

    assert_matches!(
        result,
        Err(AvailabilityError::BackendConflict(msg)) if msg == "El bloque se solapa con otro existente"
    );
}

#[tokio::test]
async fn inverted_range_fails_without_touching_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let service = AvailabilityService::new(&AppConfig::with_api_url(server.uri()));
    let result = service
        .create_availability(7, request("2025-11-13", "12:00", "09:00"), TOKEN)
        .await;

    assert_matches!(result, Err(AvailabilityError::InvalidRange));
}

#[tokio::test]
async fn updating_a_missing_block_is_not_found() {
    let server = MockServer::start().await;
    mock_existing_blocks(&server, json!([])).await;

    let service = AvailabilityService::new(&AppConfig::with_api_url(server.uri()));
    let result = service
        .update_availability(
            7,
            99,
            availability_cell::models::UpdateAvailabilityRequest {
                start_time: Some(NaiveTime::parse_from_str("10:00", "%H:%M").unwrap()),
                end_time: None,
                notes: None,
            },
            TOKEN,
        )
        .await;

    assert_matches!(result, Err(AvailabilityError::NotFound));
}
