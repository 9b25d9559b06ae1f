// SPDX-FileCopyrightText: 2026 Plaza Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Calendar events and date-window listing.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A scheduled marketplace event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Events starting on `day` (UTC), ordered by start.
pub fn events_on(events: &[CalendarEvent], day: NaiveDate) -> Vec<CalendarEvent> {
    sorted_by_start(
        events
            .iter()
            .filter(|e| e.start_date.date_naive() == day)
            .cloned()
            .collect(),
    )
}

/// Events that start and end within the given month, ordered by start.
///
/// An invalid `month` yields no events.
pub fn events_in_month(events: &[CalendarEvent], year: i32, month: u32) -> Vec<CalendarEvent> {
    let Some((first, next)) = month_bounds(year, month) else {
        return Vec::new();
    };
    sorted_by_start(
        events
            .iter()
            .filter(|e| {
                let start = e.start_date.date_naive();
                let end = e.end_date.date_naive();
                start >= first && end < next
            })
            .cloned()
            .collect(),
    )
}

/// First day of the month and first day of the following month.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = first.checked_add_months(Months::new(1))?;
    Some((first, next))
}

fn sorted_by_start(mut events: Vec<CalendarEvent>) -> Vec<CalendarEvent> {
    events.sort_by_key(|e| e.start_date);
    events
}
