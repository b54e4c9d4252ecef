use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// A resolved geographic position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw response body returned by the weather provider, not yet decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPayload(String);

impl RawPayload {
    pub fn new(body: impl Into<String>) -> Self {
        Self(body.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RawPayload {
    fn from(body: String) -> Self {
        Self(body)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub observed_at: DateTime<Utc>,
    /// Rounded to two decimals.
    pub temperature_c: f64,
    pub rain_mm: f64,
    pub wind_speed_ms: f64,
    pub icon_code: String,
}

/// One time step of the provider's forecast series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Provider-local wall-clock time, taken verbatim from the feed.
    pub timestamp: NaiveDateTime,
    /// Rounded to one decimal.
    pub temperature_c: f64,
    pub rain_mm: f64,
    pub wind_speed_ms: f64,
    pub icon_code: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    /// `None` when the day has no temperatures to fold over.
    pub min_temperature_c: Option<f64>,
    pub max_temperature_c: Option<f64>,
    pub representative_icon: String,
}
