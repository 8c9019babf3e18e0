// libs/agenda-cell/src/services/grid.rs
//
// Week/month lattice construction. Pure functions of (anchor, window); the
// grid is recomputed on every navigation instead of mutating cursor state.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::{CalendarGrid, DayBucket, GridWindow, MonthWindow, WeekWindow};

/// Displayed hour band: 08:00 through the 20:00 slot, one-hour granularity.
pub const FIRST_HOUR: u32 = 8;
pub const LAST_HOUR: u32 = 20;
pub const SLOTS_PER_DAY: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;

/// Start hours of every slot in a day bucket.
pub fn hour_band() -> impl Iterator<Item = u32> {
    FIRST_HOUR..=LAST_HOUR
}

/// Monday of the week containing `date` (ISO convention). A Sunday anchor
/// steps six days back, any other day steps `weekday - 1` back.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let back = match date.weekday() {
        Weekday::Sun => 6,
        other => other.num_days_from_monday() as i64,
    };
    date - Duration::days(back)
}

/// Day count of a month, leap-aware: the day before the first of the next
/// month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .expect("valid month boundaries")
}

/// Build the calendar lattice for the window containing `anchor`.
///
/// Week mode: seven buckets from the normalized Monday. Month mode: one
/// bucket per day of the month, plus the Sunday-first weekday offset of day 1
/// as `leading_blanks` so columns align.
pub fn build_grid(anchor: NaiveDate, window: GridWindow) -> CalendarGrid {
    match window {
        GridWindow::Week => {
            let week = WeekWindow::from_anchor(anchor);
            let days = (0..7)
                .map(|i| DayBucket {
                    date: week.start + Duration::days(i),
                })
                .collect();

            CalendarGrid {
                window,
                days,
                leading_blanks: 0,
            }
        }
        GridWindow::Month => {
            let month = MonthWindow::from_anchor(anchor);
            let first = month.first_day();
            let days = (0..days_in_month(month.year, month.month) as i64)
                .map(|i| DayBucket {
                    date: first + Duration::days(i),
                })
                .collect();

            CalendarGrid {
                window,
                days,
                leading_blanks: first.weekday().num_days_from_sunday(),
            }
        }
    }
}
