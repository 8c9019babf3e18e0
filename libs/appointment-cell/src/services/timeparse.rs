// libs/appointment-cell/src/services/timeparse.rs
//
// The booking UI tracks the selected day and the selected time separately,
// and the time arrives either as 24-hour "HH:MM" or 12-hour "HH:MM AM/PM".
// Both forms normalize here before a timestamp is ever constructed.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::models::AppointmentError;

/// Parse a wall-clock time string. Accepts `HH:MM` and `HH:MM AM/PM`
/// (meridiem case-insensitive). 12 AM maps to hour 0, 12 PM stays 12,
/// any other PM hour gains 12.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, AppointmentError> {
    let trimmed = input.trim();

    let (clock, meridiem) = match trimmed.rsplit_once(' ') {
        Some((clock, suffix))
            if suffix.eq_ignore_ascii_case("am") || suffix.eq_ignore_ascii_case("pm") =>
        {
            (clock, Some(suffix.eq_ignore_ascii_case("pm")))
        }
        _ => (trimmed, None),
    };

    let (hour_str, minute_str) = clock
        .split_once(':')
        .ok_or_else(|| invalid(input))?;
    let mut hour: u32 = hour_str.trim().parse().map_err(|_| invalid(input))?;
    let minute: u32 = minute_str.trim().parse().map_err(|_| invalid(input))?;

    if let Some(is_pm) = meridiem {
        if hour < 1 || hour > 12 {
            return Err(invalid(input));
        }
        hour = match (hour, is_pm) {
            (12, false) => 0,
            (12, true) => 12,
            (h, false) => h,
            (h, true) => h + 12,
        };
    }

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| invalid(input))
}

/// Combine a selected calendar date with a selected time string into a single
/// local wall-clock timestamp.
pub fn combine_date_time(
    date: NaiveDate,
    time: &str,
) -> Result<NaiveDateTime, AppointmentError> {
    Ok(date.and_time(parse_time_of_day(time)?))
}

fn invalid(input: &str) -> AppointmentError {
    AppointmentError::InvalidTime(format!("Unrecognized time: {:?}", input))
}
