//! Day-level folding of the forecast series.
//!
//! Entries arrive sorted by time, so the first appearance of a date is also
//! its chronological position. Nothing here re-sorts.

use chrono::NaiveDate;

use crate::model::{DailySummary, ForecastEntry};

/// Only the first this-many distinct dates are summarised.
pub const MAX_DAYS: usize = 6;

/// Calendar date of an entry as written by the provider, with no timezone shift.
pub fn date_key(entry: &ForecastEntry) -> NaiveDate {
    entry.timestamp.date()
}

pub fn summarize_by_day(entries: &[ForecastEntry]) -> Vec<DailySummary> {
    let mut groups: Vec<(NaiveDate, Vec<&ForecastEntry>)> = Vec::new();

    for entry in entries {
        let date = date_key(entry);
        if let Some((_, members)) = groups.iter_mut().find(|(d, _)| *d == date) {
            members.push(entry);
        } else if groups.len() < MAX_DAYS {
            groups.push((date, vec![entry]));
        }
    }

    groups
        .into_iter()
        .map(|(date, members)| summarize(date, &members))
        .collect()
}

/// All entries for `date`, in their original order.
pub fn entries_for_date(entries: &[ForecastEntry], date: NaiveDate) -> Vec<&ForecastEntry> {
    entries.iter().filter(|e| date_key(e) == date).collect()
}

fn summarize(date: NaiveDate, members: &[&ForecastEntry]) -> DailySummary {
    let temps = members.iter().map(|e| e.temperature_c);

    DailySummary {
        date,
        min_temperature_c: temps.clone().reduce(f64::min),
        max_temperature_c: temps.reduce(f64::max),
        // Groups are never empty when built by `summarize_by_day`.
        representative_icon: members
            .first()
            .map(|e| e.icon_code.clone())
            .unwrap_or_default(),
    }
}
