// libs/appointment-cell/src/services/booking.rs
use chrono::{NaiveDateTime, Utc};
use reqwest::Method;
use serde_json::json;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::{ApiClient, ApiError};

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, BookAppointmentRequest,
};
use crate::services::conflict::{check_candidate_slot, ConflictDetectionService};
use crate::services::lifecycle::LifecycleService;
use crate::services::timeparse::combine_date_time;

pub struct BookingService {
    api: ApiClient,
    conflict_service: ConflictDetectionService,
    lifecycle_service: LifecycleService,
}

impl BookingService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
            conflict_service: ConflictDetectionService::new(config),
            lifecycle_service: LifecycleService::new(),
        }
    }

    /// Submit a confirmed booking draft. The conflict gate runs before
    /// anything leaves this process; the backend's own 409 remains the final
    /// authority and is surfaced, never retried.
    pub async fn book_appointment(
        &self,
        request: BookAppointmentRequest,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        info!(
            "Booking appointment with professional {}",
            request.professional_id
        );

        let start = self.validate_draft(&request)?;

        let existing = self
            .conflict_service
            .get_professional_appointments_in_range(
                request.professional_id,
                start,
                start + chrono::Duration::minutes(request.duration_minutes as i64),
                auth_token,
            )
            .await?;
        check_candidate_slot(start, request.duration_minutes, &existing)?;

        let payload = json!({
            "profesional_id": request.professional_id,
            "fecha_hora": start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "duracion_minutos": request.duration_minutes,
            "motivo": request.motive,
            "notas": request.notes,
            "precio": request.price,
        });

        let created: Appointment = self
            .api
            .request(Method::POST, "/citas/agendar", Some(auth_token), Some(payload))
            .await
            .map_err(|e| {
                if e.is_conflict() {
                    // Lost the race: someone booked the slot between our gate
                    // and the backend's own check.
                    warn!("Backend rejected booking as conflicting: {}", e);
                    AppointmentError::BackendConflict(e.to_string())
                } else {
                    AppointmentError::Backend(e.to_string())
                }
            })?;

        info!("Appointment {} created", created.id);
        Ok(created)
    }

    /// Apply a status transition after checking it against the lifecycle
    /// table.
    pub async fn update_status(
        &self,
        appointment_id: i64,
        new_status: AppointmentStatus,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let current = self.get_appointment(appointment_id, auth_token).await?;

        self.lifecycle_service
            .validate_transition(current.status, new_status)?;

        let path = format!("/citas/cita/{}/estado", appointment_id);
        let updated: Appointment = self
            .api
            .request(
                Method::PUT,
                &path,
                Some(auth_token),
                Some(json!({ "nuevo_estado": new_status })),
            )
            .await
            .map_err(map_backend_error)?;

        info!(
            "Appointment {} moved from {} to {}",
            appointment_id, current.status, updated.status
        );
        Ok(updated)
    }

    pub async fn cancel_appointment(
        &self,
        appointment_id: i64,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        self.update_status(appointment_id, AppointmentStatus::Cancelled, auth_token)
            .await
    }

    pub async fn get_appointment(
        &self,
        appointment_id: i64,
        auth_token: &str,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!("/citas/cita/{}", appointment_id);
        self.api
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(map_backend_error)
    }

    pub async fn get_professional_appointments(
        &self,
        professional_id: i64,
        from: NaiveDateTime,
        to: NaiveDateTime,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        self.conflict_service
            .get_professional_appointments_in_range(professional_id, from, to, auth_token)
            .await
    }

    /// Dashboard listing: active appointments starting within the next
    /// `hours_ahead` hours.
    pub async fn get_upcoming_appointments(
        &self,
        professional_id: i64,
        hours_ahead: i64,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let now = Utc::now().naive_utc();
        let until = now + chrono::Duration::hours(hours_ahead);

        let mut appointments = self
            .conflict_service
            .get_professional_appointments_in_range(professional_id, now, until, auth_token)
            .await?;

        appointments.retain(|apt| {
            apt.status.is_active() && apt.start_time >= now && apt.start_time < until
        });
        appointments.sort_by_key(|apt| apt.start_time);

        Ok(appointments)
    }

    /// Local validation of the draft; nothing here touches the network.
    fn validate_draft(
        &self,
        request: &BookAppointmentRequest,
    ) -> Result<NaiveDateTime, AppointmentError> {
        let date = request
            .date
            .ok_or_else(|| AppointmentError::Validation("Missing appointment date".to_string()))?;
        let time = request
            .time
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AppointmentError::Validation("Missing appointment time".to_string()))?;

        if request
            .motive
            .as_deref()
            .map(str::trim)
            .unwrap_or("")
            .is_empty()
        {
            return Err(AppointmentError::Validation(
                "Missing appointment motive".to_string(),
            ));
        }

        if request.duration_minutes <= 0 {
            return Err(AppointmentError::Validation(
                "Duration must be positive".to_string(),
            ));
        }

        let start = combine_date_time(date, time)?;

        if start <= Utc::now().naive_utc() {
            return Err(AppointmentError::InvalidTime(
                "Appointment must be scheduled for a future time".to_string(),
            ));
        }

        debug!("Booking draft validated for {}", start);
        Ok(start)
    }
}

fn map_backend_error(e: ApiError) -> AppointmentError {
    if e.is_not_found() {
        AppointmentError::NotFound
    } else {
        AppointmentError::Backend(e.to_string())
    }
}
