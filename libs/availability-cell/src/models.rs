use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// A professional's self-declared open window. Distinct from a booked
/// appointment: it marks time offered, not time sold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityBlock {
    pub id: i64,
    #[serde(rename = "profesional_id")]
    pub professional_id: i64,
    #[serde(rename = "fecha_hora")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "duracion_minutos")]
    pub duration_minutes: i32,
    #[serde(rename = "notas")]
    pub notes: Option<String>,
}

impl AvailabilityBlock {
    pub fn end_time(&self) -> NaiveDateTime {
        self.start_time + Duration::minutes(self.duration_minutes as i64)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAvailabilityRequest {
    #[serde(rename = "fecha")]
    pub date: NaiveDate,
    #[serde(rename = "hora_inicio")]
    pub start_time: NaiveTime,
    #[serde(rename = "hora_fin")]
    pub end_time: NaiveTime,
    #[serde(rename = "notas")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateAvailabilityRequest {
    #[serde(rename = "hora_inicio")]
    pub start_time: Option<NaiveTime>,
    #[serde(rename = "hora_fin")]
    pub end_time: Option<NaiveTime>,
    #[serde(rename = "notas")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Availability block not found")]
    NotFound,

    #[error("Start time must be before end time")]
    InvalidRange,

    #[error("Availability overlaps existing block {block_id} ({start} - {end})")]
    Overlap {
        block_id: i64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("{0}")]
    BackendConflict(String),

    #[error("{0}")]
    Backend(String),
}
