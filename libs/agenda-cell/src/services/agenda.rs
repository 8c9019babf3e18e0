// libs/agenda-cell/src/services/agenda.rs
use chrono::Duration;
use serde::Serialize;
use tracing::debug;

use appointment_cell::services::conflict::ConflictDetectionService;
use availability_cell::services::AvailabilityService;
use shared_config::AppConfig;

use crate::models::{AgendaError, CalendarCell, CalendarGrid, GridWindow};
use crate::services::grid::build_grid;
use crate::services::occupancy::resolve_occupancy;

#[derive(Debug, Serialize)]
pub struct AgendaGridResponse {
    pub grid: CalendarGrid,
    pub cells: Vec<Vec<CalendarCell>>,
}

/// Assembles the annotated agenda for one professional: fetches the window's
/// appointments and availability blocks, then runs the pure grid and
/// occupancy passes over them.
pub struct AgendaService {
    appointments: ConflictDetectionService,
    availability: AvailabilityService,
}

impl AgendaService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            appointments: ConflictDetectionService::new(config),
            availability: AvailabilityService::new(config),
        }
    }

    pub async fn build_agenda(
        &self,
        professional_id: i64,
        anchor: chrono::NaiveDate,
        window: GridWindow,
        only_free: bool,
        auth_token: &str,
    ) -> Result<AgendaGridResponse, AgendaError> {
        let grid = build_grid(anchor, window);

        let first = grid.days.first().map(|d| d.date).unwrap_or(anchor);
        let last = grid.days.last().map(|d| d.date).unwrap_or(anchor);
        debug!(
            "Building {:?} agenda for professional {} ({} - {})",
            window, professional_id, first, last
        );

        let range_start = first
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid");
        let range_end = last
            .and_hms_opt(0, 0, 0)
            .expect("midnight is always valid")
            + Duration::days(1);

        let appointments = self
            .appointments
            .get_professional_appointments_in_range(
                professional_id,
                range_start,
                range_end,
                auth_token,
            )
            .await
            .map_err(|e| AgendaError::Backend(e.to_string()))?;

        let availabilities = self
            .availability
            .get_professional_availability(professional_id, auth_token)
            .await
            .map_err(|e| AgendaError::Backend(e.to_string()))?;

        let cells = resolve_occupancy(&grid.days, &appointments, &availabilities, only_free);

        Ok(AgendaGridResponse { grid, cells })
    }
}
