use chrono::{Duration, NaiveDateTime};
use reqwest::Method;
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::ApiClient;

use crate::models::{Appointment, AppointmentError, ConflictCheckResponse};

/// Half-open interval intersection: `[s1,e1)` and `[s2,e2)` overlap iff
/// `s1 < e2 && s2 < e1`. Equality at a boundary is not an overlap, so an
/// entry ending exactly when another starts never collides.
pub fn overlaps(
    start1: NaiveDateTime,
    end1: NaiveDateTime,
    start2: NaiveDateTime,
    end2: NaiveDateTime,
) -> bool {
    start1 < end2 && start2 < end1
}

/// Gate a candidate slot `[start, start+duration)` against a professional's
/// existing appointments. Pure; callers fetch the entries.
///
/// Only PENDIENTE and CONFIRMADA appointments block the slot. The first
/// collision is reported with the colliding entry's id and interval.
pub fn check_candidate_slot(
    start: NaiveDateTime,
    duration_minutes: i32,
    existing: &[Appointment],
) -> Result<(), AppointmentError> {
    let end = start + Duration::minutes(duration_minutes as i64);

    for appointment in existing {
        if !appointment.status.is_active() {
            continue;
        }
        if overlaps(start, end, appointment.start_time, appointment.end_time()) {
            return Err(AppointmentError::Conflict {
                entry_id: appointment.id,
                start: appointment.start_time,
                end: appointment.end_time(),
            });
        }
    }

    Ok(())
}

/// Conflict probe backed by the citas API: fetches the professional's
/// appointments around the candidate window and applies the pure gate.
pub struct ConflictDetectionService {
    api: ApiClient,
}

impl ConflictDetectionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    pub async fn check_conflicts(
        &self,
        professional_id: i64,
        start: NaiveDateTime,
        duration_minutes: i32,
        auth_token: &str,
    ) -> Result<ConflictCheckResponse, AppointmentError> {
        debug!(
            "Checking conflicts for professional {} at {} ({} min)",
            professional_id, start, duration_minutes
        );

        let end = start + Duration::minutes(duration_minutes as i64);
        let existing = self
            .get_professional_appointments_in_range(professional_id, start, end, auth_token)
            .await?;

        let conflicting_appointments: Vec<Appointment> = existing
            .into_iter()
            .filter(|apt| {
                apt.status.is_active() && overlaps(start, end, apt.start_time, apt.end_time())
            })
            .collect();

        let has_conflict = !conflicting_appointments.is_empty();
        if has_conflict {
            warn!(
                "Conflict detected for professional {} - {} colliding appointments",
                professional_id,
                conflicting_appointments.len()
            );
        }

        Ok(ConflictCheckResponse {
            has_conflict,
            conflicting_appointments,
        })
    }

    /// Appointments for a professional whose interval can touch [start, end).
    /// The backend filters loosely by date range; the exact half-open test
    /// happens in memory.
    pub async fn get_professional_appointments_in_range(
        &self,
        professional_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
        auth_token: &str,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let path = format!(
            "/citas/profesional/{}?desde={}&hasta={}",
            professional_id,
            start.date(),
            end.date(),
        );

        let appointments: Vec<Appointment> = self
            .api
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(|e| AppointmentError::Backend(e.to_string()))?;

        Ok(appointments)
    }
}
