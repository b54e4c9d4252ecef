//! Decoding of OpenWeather payloads into domain records.
//!
//! The provider reports temperatures in Kelvin. Current conditions are kept
//! at two decimals after conversion, forecast steps at one.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::{
    error::ParseError,
    model::{CurrentWeather, ForecastEntry, RawPayload},
};

const KELVIN_OFFSET: f64 = 273.15;
const FORECAST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn parse_current(payload: &RawPayload) -> Result<CurrentWeather, ParseError> {
    const CONTEXT: &str = "current weather";

    let parsed: OwCurrentResponse = decode(payload, CONTEXT)?;

    let observed_at = DateTime::<Utc>::from_timestamp(parsed.dt, 0).ok_or_else(|| {
        ParseError::invalid(CONTEXT, format!("timestamp {} is out of range", parsed.dt))
    })?;

    Ok(CurrentWeather {
        observed_at,
        temperature_c: kelvin_to_celsius(parsed.main.temp, 2),
        rain_mm: parsed.rain.and_then(|r| r.last_hour).unwrap_or(0.0),
        wind_speed_ms: parsed.wind.speed,
        icon_code: first_icon(parsed.weather, CONTEXT)?,
    })
}

/// Decode the forecast list, preserving the provider's order.
pub fn parse_forecast(payload: &RawPayload) -> Result<Vec<ForecastEntry>, ParseError> {
    const CONTEXT: &str = "forecast";

    let parsed: OwForecastResponse = decode(payload, CONTEXT)?;

    if parsed.list.is_empty() {
        return Err(ParseError::invalid(CONTEXT, "forecast list is empty"));
    }

    parsed
        .list
        .into_iter()
        .map(|step| {
            let timestamp = NaiveDateTime::parse_from_str(&step.dt_txt, FORECAST_TIME_FORMAT)
                .map_err(|e| {
                    ParseError::invalid(CONTEXT, format!("bad timestamp '{}': {e}", step.dt_txt))
                })?;

            Ok(ForecastEntry {
                timestamp,
                temperature_c: kelvin_to_celsius(step.main.temp, 1),
                rain_mm: step.rain.and_then(|r| r.last_three_hours).unwrap_or(0.0),
                wind_speed_ms: step.wind.speed,
                icon_code: first_icon(step.weather, CONTEXT)?,
            })
        })
        .collect()
}

pub fn kelvin_to_celsius(kelvin: f64, decimals: i32) -> f64 {
    round_half_up(kelvin - KELVIN_OFFSET, decimals)
}

/// Rounds ties toward positive infinity, so -2.25 becomes -2.2.
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale + 0.5).floor() / scale
}

fn decode<'a, T: Deserialize<'a>>(
    payload: &'a RawPayload,
    context: &'static str,
) -> Result<T, ParseError> {
    serde_json::from_str(payload.as_str()).map_err(|source| ParseError::Json { context, source })
}

fn first_icon(weather: Vec<OwWeather>, context: &'static str) -> Result<String, ParseError> {
    weather
        .into_iter()
        .next()
        .map(|w| w.icon)
        .ok_or_else(|| ParseError::invalid(context, "weather condition array is empty"))
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwRain {
    #[serde(rename = "1h")]
    last_hour: Option<f64>,
    #[serde(rename = "3h")]
    last_three_hours: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    rain: Option<OwRain>,
}

#[derive(Debug, Deserialize)]
struct OwForecastStep {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    rain: Option<OwRain>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastStep>,
}
