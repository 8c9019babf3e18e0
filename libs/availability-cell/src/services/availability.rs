use chrono::NaiveDateTime;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, warn};

use shared_config::AppConfig;
use shared_database::{ApiClient, ApiError};

use crate::models::{
    AvailabilityBlock, AvailabilityError, CreateAvailabilityRequest, UpdateAvailabilityRequest,
};

pub struct AvailabilityService {
    api: ApiClient,
}

impl AvailabilityService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api: ApiClient::new(config),
        }
    }

    /// Declare a new open window for a professional. Overlapping blocks for
    /// the same professional are rejected before anything is sent.
    pub async fn create_availability(
        &self,
        professional_id: i64,
        request: CreateAvailabilityRequest,
        auth_token: &str,
    ) -> Result<AvailabilityBlock, AvailabilityError> {
        debug!("Creating availability for professional {}", professional_id);

        if request.start_time >= request.end_time {
            return Err(AvailabilityError::InvalidRange);
        }

        let start = request.date.and_time(request.start_time);
        let end = request.date.and_time(request.end_time);
        let duration_minutes = (end - start).num_minutes() as i32;

        let existing = self
            .get_professional_availability(professional_id, auth_token)
            .await?;
        self.check_block_overlap(start, end, &existing, None)?;

        let block_data = json!({
            "profesional_id": professional_id,
            "fecha_hora": start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "duracion_minutos": duration_minutes,
            "notas": request.notes,
        });

        let block: AvailabilityBlock = self
            .api
            .request(
                Method::POST,
                "/profesionales/disponibilidad",
                Some(auth_token),
                Some(block_data),
            )
            .await
            .map_err(map_backend_error)?;

        debug!("Availability created with ID: {}", block.id);
        Ok(block)
    }

    /// Change the hours of an existing block, re-checking overlap against the
    /// professional's other blocks.
    pub async fn update_availability(
        &self,
        professional_id: i64,
        block_id: i64,
        request: UpdateAvailabilityRequest,
        auth_token: &str,
    ) -> Result<AvailabilityBlock, AvailabilityError> {
        debug!("Updating availability {}", block_id);

        let existing = self
            .get_professional_availability(professional_id, auth_token)
            .await?;
        let current = existing
            .iter()
            .find(|b| b.id == block_id)
            .ok_or(AvailabilityError::NotFound)?;

        let date = current.start_time.date();
        let start = request
            .start_time
            .map(|t| date.and_time(t))
            .unwrap_or(current.start_time);
        let end = request
            .end_time
            .map(|t| date.and_time(t))
            .unwrap_or_else(|| current.end_time());

        if start >= end {
            return Err(AvailabilityError::InvalidRange);
        }

        self.check_block_overlap(start, end, &existing, Some(block_id))?;

        let update_data = json!({
            "fecha_hora": start.format("%Y-%m-%dT%H:%M:%S").to_string(),
            "duracion_minutos": (end - start).num_minutes() as i32,
            "notas": request.notes,
        });

        let path = format!("/profesionales/disponibilidad/{}", block_id);
        let block: AvailabilityBlock = self
            .api
            .request(Method::PUT, &path, Some(auth_token), Some(update_data))
            .await
            .map_err(map_backend_error)?;

        Ok(block)
    }

    /// All declared blocks for a professional, ordered by start time.
    pub async fn get_professional_availability(
        &self,
        professional_id: i64,
        auth_token: &str,
    ) -> Result<Vec<AvailabilityBlock>, AvailabilityError> {
        debug!("Fetching availability for professional {}", professional_id);

        let path = format!("/profesionales/{}/disponibilidad", professional_id);
        let blocks: Vec<AvailabilityBlock> = self
            .api
            .request(Method::GET, &path, Some(auth_token), None)
            .await
            .map_err(map_backend_error)?;

        Ok(blocks)
    }

    pub async fn delete_availability(
        &self,
        block_id: i64,
        auth_token: &str,
    ) -> Result<(), AvailabilityError> {
        debug!("Deleting availability {}", block_id);

        let path = format!("/profesionales/disponibilidad/{}", block_id);
        let _: Value = self
            .api
            .request(Method::DELETE, &path, Some(auth_token), None)
            .await
            .map_err(map_backend_error)?;

        Ok(())
    }

    /// Half-open overlap gate: a candidate window [start, end) may not
    /// intersect any existing block of the same professional. Touching
    /// boundaries are allowed.
    fn check_block_overlap(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
        existing: &[AvailabilityBlock],
        exclude_id: Option<i64>,
    ) -> Result<(), AvailabilityError> {
        for block in existing {
            if Some(block.id) == exclude_id {
                continue;
            }
            let block_end = block.end_time();
            if start < block_end && block.start_time < end {
                warn!(
                    "Availability overlap: candidate {} - {} collides with block {}",
                    start, end, block.id
                );
                return Err(AvailabilityError::Overlap {
                    block_id: block.id,
                    start: block.start_time,
                    end: block_end,
                });
            }
        }

        Ok(())
    }
}

fn map_backend_error(e: ApiError) -> AvailabilityError {
    if e.is_not_found() {
        AvailabilityError::NotFound
    } else if e.is_conflict() {
        // Lost the race: the backend saw an overlapping block our local
        // gate did not.
        AvailabilityError::BackendConflict(e.to_string())
    } else {
        AvailabilityError::Backend(e.to_string())
    }
}
