// libs/agenda-cell/src/services/occupancy.rs
//
// Overlays stored appointments and availability blocks onto the day lattice.
// Pure function of its inputs; fetching is the caller's concern.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

use appointment_cell::models::{Appointment, AppointmentStatus};
use appointment_cell::services::conflict::overlaps;
use availability_cell::models::AvailabilityBlock;

use crate::models::{CalendarCell, CellEntry, CellState, DayBucket};
use crate::services::grid::hour_band;

/// Annotate every (day, hour) cell with its occupancy.
///
/// An entry overlaps a cell iff its interval intersects the cell's half-open
/// one-hour window, so entries starting mid-hour or spanning several hours
/// surface in each cell they touch. When both kinds overlap one cell, the
/// appointment wins and the availability is suppressed there. With
/// `only_free` set, a cell keeps its state only when it has an availability
/// overlap and no appointment overlap; everything else renders blank.
///
/// CANCELADA appointments never surface and never suppress a free slot.
pub fn resolve_occupancy(
    days: &[DayBucket],
    appointments: &[Appointment],
    availabilities: &[AvailabilityBlock],
    only_free: bool,
) -> Vec<Vec<CalendarCell>> {
    let appointments_by_day = index_by_day(
        appointments
            .iter()
            .filter(|a| a.status != AppointmentStatus::Cancelled),
        |a| a.start_time,
    );
    let availability_by_day = index_by_day(availabilities.iter(), |b| b.start_time);

    days.iter()
        .map(|day| {
            let day_appointments = appointments_by_day.get(&day.date);
            let day_availability = availability_by_day.get(&day.date);

            hour_band()
                .map(|hour| {
                    let cell_start = day
                        .date
                        .and_hms_opt(hour, 0, 0)
                        .expect("hour band stays within 0..24");
                    let cell_end = cell_start + chrono::Duration::hours(1);

                    let appointment = day_appointments.and_then(|entries| {
                        entries.iter().find(|a| {
                            overlaps(a.start_time, a.end_time(), cell_start, cell_end)
                        })
                    });
                    let availability = day_availability.and_then(|entries| {
                        entries.iter().find(|b| {
                            overlaps(b.start_time, b.end_time(), cell_start, cell_end)
                        })
                    });

                    let state = if only_free {
                        match (appointment, availability) {
                            (None, Some(block)) => CellState::Available(availability_entry(block)),
                            _ => CellState::Empty,
                        }
                    } else {
                        match (appointment, availability) {
                            (Some(apt), _) => CellState::Appointment(appointment_entry(apt)),
                            (None, Some(block)) => CellState::Available(availability_entry(block)),
                            (None, None) => CellState::Empty,
                        }
                    };

                    CalendarCell {
                        date: day.date,
                        hour,
                        state,
                    }
                })
                .collect()
        })
        .collect()
}

/// Group entries by ISO calendar date and sort each day by start time.
/// The sort is stable, so entries sharing a timestamp keep insertion order.
fn index_by_day<'a, T, F>(
    entries: impl IntoIterator<Item = &'a T>,
    start_of: F,
) -> HashMap<NaiveDate, Vec<&'a T>>
where
    T: 'a,
    F: Fn(&T) -> NaiveDateTime,
{
    let mut map: HashMap<NaiveDate, Vec<&T>> = HashMap::new();
    for entry in entries {
        map.entry(start_of(entry).date()).or_default().push(entry);
    }
    for day_entries in map.values_mut() {
        day_entries.sort_by_key(|e| start_of(e));
    }
    map
}

fn appointment_entry(appointment: &Appointment) -> CellEntry {
    CellEntry {
        id: appointment.id,
        start_time: appointment.start_time,
        duration_minutes: appointment.duration_minutes,
        label: appointment.client.as_ref().map(|c| c.full_name.clone()),
    }
}

fn availability_entry(block: &AvailabilityBlock) -> CellEntry {
    CellEntry {
        id: block.id,
        start_time: block.start_time,
        duration_minutes: block.duration_minutes,
        label: block.notes.clone(),
    }
}
