// libs/appointment-cell/src/models.rs
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// A booked, priced meeting between a client and a professional.
///
/// Timestamps are local wall-clock (`NaiveDateTime`) because the backend wire
/// format carries no offset; conversion to a display timezone is the UI's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: i64,
    #[serde(rename = "profesional_id", default)]
    pub professional_id: Option<i64>,
    #[serde(rename = "fecha_hora")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "duracion_minutos")]
    pub duration_minutes: i32,
    #[serde(rename = "estado")]
    pub status: AppointmentStatus,
    #[serde(rename = "motivo")]
    pub motive: String,
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
    #[serde(rename = "precio", default)]
    pub price: Option<f64>,
    #[serde(rename = "cliente", default)]
    pub client: Option<ClientInfo>,
}

impl Appointment {
    /// Scheduled end derived from start + duration.
    pub fn end_time(&self) -> NaiveDateTime {
        self.start_time + Duration::minutes(self.duration_minutes as i64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfo {
    #[serde(rename = "nombre_completo")]
    pub full_name: String,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AppointmentStatus {
    #[serde(rename = "PENDIENTE")]
    Pending,
    #[serde(rename = "CONFIRMADA")]
    Confirmed,
    #[serde(rename = "COMPLETADA")]
    Completed,
    #[serde(rename = "CANCELADA")]
    Cancelled,
}

impl AppointmentStatus {
    /// Only active appointments block a slot; cancelled and completed ones
    /// never conflict with new bookings.
    pub fn is_active(&self) -> bool {
        matches!(self, AppointmentStatus::Pending | AppointmentStatus::Confirmed)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "PENDIENTE"),
            AppointmentStatus::Confirmed => write!(f, "CONFIRMADA"),
            AppointmentStatus::Completed => write!(f, "COMPLETADA"),
            AppointmentStatus::Cancelled => write!(f, "CANCELADA"),
        }
    }
}

// ==============================================================================
// REQUEST/RESPONSE MODELS
// ==============================================================================

/// Booking draft as the UI hands it over: date and time are still separate,
/// and the time may be `HH:MM` or `HH:MM AM/PM`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(rename = "profesional_id")]
    pub professional_id: i64,
    #[serde(rename = "fecha")]
    pub date: Option<NaiveDate>,
    #[serde(rename = "hora")]
    pub time: Option<String>,
    #[serde(rename = "duracion_minutos", default = "default_duration")]
    pub duration_minutes: i32,
    #[serde(rename = "motivo")]
    pub motive: Option<String>,
    #[serde(rename = "notas", default)]
    pub notes: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
}

fn default_duration() -> i32 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    #[serde(rename = "nuevo_estado")]
    pub new_status: AppointmentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub has_conflict: bool,
    pub conflicting_appointments: Vec<Appointment>,
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppointmentError {
    #[error("Appointment not found")]
    NotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid appointment time: {0}")]
    InvalidTime(String),

    #[error("Slot conflicts with appointment {entry_id} ({start} - {end})")]
    Conflict {
        entry_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Cannot change status from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("{0}")]
    BackendConflict(String),

    #[error("{0}")]
    Backend(String),
}
