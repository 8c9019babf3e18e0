use assert_matches::assert_matches;
use chrono::{Duration, NaiveDate, Utc};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use appointment_cell::models::{AppointmentError, AppointmentStatus, BookAppointmentRequest};
use appointment_cell::BookingService;
use shared_config::AppConfig;

const TOKEN: &str = "test-token";

fn draft(professional_id: i64, date: NaiveDate, time: &str) -> BookAppointmentRequest {
    BookAppointmentRequest {
        professional_id,
        date: Some(date),
        time: Some(time.to_string()),
        duration_minutes: 60,
        motive: Some("Primera consulta".to_string()),
        notes: None,
        price: 50.0,
    }
}

fn future_date() -> NaiveDate {
    (Utc::now() + Duration::days(30)).date_naive()
}

fn appointment_json(id: i64, professional_id: i64, start: &str, estado: &str) -> serde_json::Value {
    json!({
        "id": id,
        "profesional_id": professional_id,
        "fecha_hora": start,
        "duracion_minutos": 60,
        "estado": estado,
        "motivo": "Primera consulta",
        "precio": 50.0,
    })
}

async fn mock_empty_range(server: &MockServer, professional_id: i64) {
    Mock::given(method("GET"))
        .and(path(format!("/citas/profesional/{}", professional_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn booking_succeeds_when_slot_is_free() {
    let server = MockServer::start().await;
    let date = future_date();

    mock_empty_range(&server, 7).await;

    let start = format!("{}T10:00:00", date);
    Mock::given(method("POST"))
        .and(path("/citas/agendar"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_partial_json(json!({
            "profesional_id": 7,
            "fecha_hora": start,
            "duracion_minutos": 60,
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(appointment_json(101, 7, &start, "PENDIENTE")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = BookingService::new(&AppConfig::with_api_url(server.uri()));
    let created = service
        .book_appointment(draft(7, date, "10:00"), TOKEN)
        .await
        .unwrap();

    assert_eq!(created.id, 101);
    assert_eq!(created.status, AppointmentStatus::Pending);
}

#[tokio::test]
async fn am_pm_time_is_accepted() {
    let server = MockServer::start().await;
    let date = future_date();

    mock_empty_range(&server, 7).await;

    let start = format!("{}T15:30:00", date);
    Mock::given(method("POST"))
        .and(path("/citas/agendar"))
        .and(body_partial_json(json!({ "fecha_hora": start })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(appointment_json(102, 7, &start, "PENDIENTE")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = BookingService::new(&AppConfig::with_api_url(server.uri()));
    let created = service
        .book_appointment(draft(7, date, "03:30 PM"), TOKEN)
        .await
        .unwrap();

    assert_eq!(created.id, 102);
}

#[tokio::test]
async fn local_conflict_gate_rejects_before_submitting() {
    let server = MockServer::start().await;
    let date = future_date();

    // Existing CONFIRMADA entry occupies 10:30 - 11:00
    Mock::given(method("GET"))
        .and(path("/citas/profesional/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": 42,
                "profesional_id": 7,
                "fecha_hora": format!("{}T10:30:00", date),
                "duracion_minutos": 30,
                "estado": "CONFIRMADA",
                "motivo": "Revisión",
            }
        ])))
        .mount(&server)
        .await;

    // The submission endpoint must never be reached
    Mock::given(method("POST"))
        .and(path("/citas/agendar"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let service = BookingService::new(&AppConfig::with_api_url(server.uri()));
    let result = service.book_appointment(draft(7, date, "10:00"), TOKEN).await;

    assert_matches!(result, Err(AppointmentError::Conflict { entry_id: 42, .. }));
}

#[tokio::test]
async fn backend_409_surfaces_as_conflict_without_retry() {
    let server = MockServer::start().await;
    let date = future_date();

    mock_empty_range(&server, 7).await;

    Mock::given(method("POST"))
        .and(path("/citas/agendar"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "detail": "El horario ya no está disponible"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = BookingService::new(&AppConfig::with_api_url(server.uri()));
    let result = service.book_appointment(draft(7, date, "10:00"), TOKEN).await;

    assert_matches!(
        result,
        Err(AppointmentError::BackendConflict(msg)) if msg == "El horario ya no está disponible"
    );
}

#[tokio::test]
async fn incomplete_draft_fails_without_touching_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let service = BookingService::new(&AppConfig::with_api_url(server.uri()));
    let date = future_date();

    let mut missing_time = draft(7, date, "10:00");
    missing_time.time = None;
    assert_matches!(
        service.book_appointment(missing_time, TOKEN).await,
        Err(AppointmentError::Validation(_))
    );

    let mut missing_motive = draft(7, date, "10:00");
    missing_motive.motive = Some("   ".to_string());
    assert_matches!(
        service.book_appointment(missing_motive, TOKEN).await,
        Err(AppointmentError::Validation(_))
    );

    let mut bad_time = draft(7, date, "25:00");
    bad_time.time = Some("25:00".to_string());
    assert_matches!(
        service.book_appointment(bad_time, TOKEN).await,
        Err(AppointmentError::InvalidTime(_))
    );
}

#[tokio::test]
async fn past_dates_are_rejected() {
    let server = MockServer::start().await;
    let service = BookingService::new(&AppConfig::with_api_url(server.uri()));

    let yesterday = (Utc::now() - Duration::days(1)).date_naive();
    let result = service
        .book_appointment(draft(7, yesterday, "10:00"), TOKEN)
        .await;

    assert_matches!(result, Err(AppointmentError::InvalidTime(_)));
}

#[tokio::test]
async fn status_update_follows_lifecycle_table() {
    let server = MockServer::start().await;
    let date = future_date();
    let start = format!("{}T10:00:00", date);

    Mock::given(method("GET"))
        .and(path("/citas/cita/55"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(appointment_json(55, 7, &start, "PENDIENTE")),
        )
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/citas/cita/55/estado"))
        .and(body_partial_json(json!({ "nuevo_estado": "CONFIRMADA" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(appointment_json(55, 7, &start, "CONFIRMADA")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let service = BookingService::new(&AppConfig::with_api_url(server.uri()));
    let updated = service
        .update_status(55, AppointmentStatus::Confirmed, TOKEN)
        .await
        .unwrap();

    assert_eq!(updated.status, AppointmentStatus::Confirmed);
}

#[tokio::test]
async fn illegal_transition_is_rejected_before_the_put() {
    let server = MockServer::start().await;
    let date = future_date();
    let start = format!("{}T10:00:00", date);

    Mock::given(method("GET"))
        .and(path("/citas/cita/56"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(appointment_json(56, 7, &start, "CANCELADA")),
        )
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/citas/cita/56/estado"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let service = BookingService::new(&AppConfig::with_api_url(server.uri()));
    let result = service
        .update_status(56, AppointmentStatus::Confirmed, TOKEN)
        .await;

    assert_matches!(
        result,
        Err(AppointmentError::InvalidStatusTransition {
            from: AppointmentStatus::Cancelled,
            to: AppointmentStatus::Confirmed,
        })
    );
}
