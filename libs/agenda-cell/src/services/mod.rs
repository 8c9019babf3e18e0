pub mod agenda;
pub mod grid;
pub mod occupancy;

pub use agenda::AgendaService;
