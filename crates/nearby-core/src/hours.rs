//! Open/closed status derived from a weekly opening-hours schedule.
//!
//! Evaluation is a pure function of the schedule, the category and the
//! caller-supplied wall-clock time, so results are deterministic in tests.

use chrono::{Datelike, NaiveDateTime, Timelike};

use crate::locations::{Category, OpeningHours, Period};

/// Status shown on a location card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenStatus {
    AlwaysOpen,
    Open,
    Closed,
    Unknown,
}

impl OpenStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            OpenStatus::AlwaysOpen => "24 Hours",
            OpenStatus::Open => "Open Now",
            OpenStatus::Closed => "Closed",
            OpenStatus::Unknown => "Not Available",
        }
    }

    /// `true` when the location can be visited right now.
    #[must_use]
    pub fn is_open(self) -> bool {
        matches!(self, OpenStatus::AlwaysOpen | OpenStatus::Open)
    }
}

/// Derive the status of a location at `now` (local wall-clock time).
///
/// ATMs are modeled as always available and ignore the schedule. A missing
/// schedule yields [`OpenStatus::Unknown`].
#[must_use]
pub fn evaluate_status(
    schedule: Option<&OpeningHours>,
    category: Category,
    now: NaiveDateTime,
) -> OpenStatus {
    if category == Category::Atm {
        return OpenStatus::AlwaysOpen;
    }
    let Some(schedule) = schedule else {
        return OpenStatus::Unknown;
    };

    if schedule.periods.iter().any(Period::is_always_open) {
        return OpenStatus::AlwaysOpen;
    }

    #[allow(clippy::cast_possible_truncation)]
    let day = now.weekday().num_days_from_sunday() as u8;
    let minute = now.hour() * 60 + now.minute();

    if schedule
        .periods
        .iter()
        .any(|period| period_contains(period, day, minute))
    {
        OpenStatus::Open
    } else {
        OpenStatus::Closed
    }
}

/// Both bounds are inclusive. A period whose close day differs from its open
/// day covers the tail of the open day and the head of the close day.
fn period_contains(period: &Period, day: u8, minute: u32) -> bool {
    let open = period.open.minute_of_day();
    let close = period.close.minute_of_day();

    if period.open.day == period.close.day {
        day == period.open.day && minute >= open && minute <= close
    } else {
        (day == period.open.day && minute >= open) || (day == period.close.day && minute <= close)
    }
}
