// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

/// Closed transition table for appointment statuses. Every status-update
/// request goes through here; the backend applies whatever it is sent, so
/// this is the single place where illegal jumps are stopped.
pub struct LifecycleService;

impl LifecycleService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate_transition(
        &self,
        current: AppointmentStatus,
        next: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition {} -> {}", current, next);

        if !self.valid_transitions(current).contains(&next) {
            warn!("Invalid status transition attempted: {} -> {}", current, next);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current,
                to: next,
            });
        }

        Ok(())
    }

    pub fn valid_transitions(&self, current: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current {
            AppointmentStatus::Pending => vec![
                AppointmentStatus::Confirmed,
                AppointmentStatus::Cancelled,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentStatus::Completed,
                AppointmentStatus::Cancelled,
            ],
            // Terminal states
            AppointmentStatus::Completed => vec![],
            AppointmentStatus::Cancelled => vec![],
        }
    }
}

impl Default for LifecycleService {
    fn default() -> Self {
        Self::new()
    }
}
