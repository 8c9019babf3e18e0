// libs/agenda-cell/src/models.rs
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::services::grid::start_of_week;

/// Which calendar window the grid covers. The grid is always re-derived from
/// an anchor date and a window type; there is no stateful cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridWindow {
    Week,
    Month,
}

/// One display day. Every bucket carries the same fixed band of hour slots,
/// so only the date needs storing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBucket {
    pub date: NaiveDate,
}

/// Output of the grid builder: ordered day buckets plus, in month mode, the
/// number of leading blank cells needed so day 1 lands in its weekday column
/// (Sunday-first columns, as the booking calendar renders them).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarGrid {
    pub window: GridWindow,
    pub days: Vec<DayBucket>,
    pub leading_blanks: u32,
}

/// Occupancy of a single (date, hour) cell. Exactly one state; an
/// appointment always wins over an availability block in the same cell.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellState {
    Empty,
    Appointment(CellEntry),
    Available(CellEntry),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CellEntry {
    pub id: i64,
    #[serde(rename = "fecha_hora")]
    pub start_time: NaiveDateTime,
    #[serde(rename = "duracion_minutos")]
    pub duration_minutes: i32,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub hour: u32,
    pub state: CellState,
}

impl CalendarCell {
    /// The cell's implicit one-hour window `[start, start+1h)`.
    pub fn window(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = self
            .date
            .and_hms_opt(self.hour, 0, 0)
            .expect("hour band stays within 0..24");
        (start, start + Duration::hours(1))
    }
}

// ==============================================================================
// NAVIGATION WINDOWS
// ==============================================================================

/// A displayed week, identified by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
}

impl WeekWindow {
    pub fn from_anchor(anchor: NaiveDate) -> Self {
        Self {
            start: start_of_week(anchor),
        }
    }

    pub fn today() -> Self {
        Self::from_anchor(Utc::now().date_naive())
    }

    pub fn next(&self) -> Self {
        Self {
            start: self.start + Duration::days(7),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            start: self.start - Duration::days(7),
        }
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }
}

/// A displayed month. Navigation rolls the year over at the 12→1 and 1→12
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthWindow {
    pub year: i32,
    pub month: u32,
}

impl MonthWindow {
    pub fn from_anchor(anchor: NaiveDate) -> Self {
        Self {
            year: anchor.year(),
            month: anchor.month(),
        }
    }

    pub fn today() -> Self {
        Self::from_anchor(Utc::now().date_naive())
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("month window always holds a valid year/month")
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AgendaError {
    #[error("Fecha inválida")]
    InvalidDate,

    #[error("{0}")]
    Backend(String),
}
