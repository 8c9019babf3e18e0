pub mod booking;
pub mod conflict;
pub mod lifecycle;
pub mod timeparse;

pub use booking::BookingService;
pub use conflict::ConflictDetectionService;
pub use lifecycle::LifecycleService;
