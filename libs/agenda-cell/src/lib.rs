pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::*;
pub use services::grid::{build_grid, start_of_week, FIRST_HOUR, LAST_HOUR, SLOTS_PER_DAY};
pub use services::occupancy::resolve_occupancy;
