//! Plain-text rendering of weather records.

use std::fmt::Write;

use chrono::{Local, NaiveDate};
use skycast_core::{CurrentWeather, DailySummary, ForecastEntry};

const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

/// Image URL for a provider icon code.
pub fn icon_url(code: &str) -> String {
    format!("{ICON_BASE_URL}/{code}.png")
}

pub fn current(place: &str, weather: &CurrentWeather) -> String {
    let observed = weather.observed_at.with_timezone(&Local).format("%H:%M");

    let mut out = String::new();
    let _ = writeln!(out, "{place} (observed {observed})");
    let _ = writeln!(out, "  Temperature: {}°C", weather.temperature_c);
    let _ = writeln!(out, "  Rain:        {} mm", weather.rain_mm);
    let _ = writeln!(out, "  Wind:        {} m/s", weather.wind_speed_ms);
    let _ = writeln!(out, "  Icon:        {}", icon_url(&weather.icon_code));
    out
}

pub fn daily(days: &[DailySummary]) -> String {
    let mut out = String::from("Forecast\n");
    for day in days {
        let _ = writeln!(
            out,
            "  {}  {:>14}  {}",
            day.date.format("%a %Y-%m-%d"),
            temperature_range(day.min_temperature_c, day.max_temperature_c),
            icon_url(&day.representative_icon),
        );
    }
    out
}

pub fn hourly(date: NaiveDate, entries: &[&ForecastEntry]) -> String {
    let mut out = format!("{}\n", date.format("%A %Y-%m-%d"));
    if entries.is_empty() {
        out.push_str("  no forecast steps for this date\n");
        return out;
    }

    for entry in entries {
        let _ = writeln!(
            out,
            "  {}  {:>6}°C  rain {} mm  wind {} m/s  {}",
            entry.timestamp.format("%H.00"),
            entry.temperature_c,
            entry.rain_mm,
            entry.wind_speed_ms,
            icon_url(&entry.icon_code),
        );
    }
    out
}

fn temperature_range(min: Option<f64>, max: Option<f64>) -> String {
    let show = |t: Option<f64>| t.map_or_else(|| "--".to_string(), |t| t.to_string());
    format!("{}...{}°C", show(min), show(max))
}
