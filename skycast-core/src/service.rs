use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    Config,
    aggregate::{entries_for_date, summarize_by_day},
    error::Error,
    gateway::{WeatherGateway, WeatherSource},
    geo::{GeoResolver, Geocoder},
    model::{Coordinates, CurrentWeather, DailySummary, ForecastEntry},
    parse::{parse_current, parse_forecast},
};

/// Everything one refresh produces for a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub place: String,
    pub coordinates: Coordinates,
    pub current: CurrentWeather,
    /// The full forecast series; `daily` is derived from it.
    pub forecast: Vec<ForecastEntry>,
    pub daily: Vec<DailySummary>,
}

impl Report {
    /// Per-step drill-down for one day of the forecast.
    pub fn entries_for(&self, date: NaiveDate) -> Vec<&ForecastEntry> {
        entries_for_date(&self.forecast, date)
    }
}

#[derive(Debug)]
pub struct WeatherService {
    geocoder: Box<dyn Geocoder>,
    source: Box<dyn WeatherSource>,
}

impl WeatherService {
    pub fn new(geocoder: Box<dyn Geocoder>, source: Box<dyn WeatherSource>) -> Self {
        Self { geocoder, source }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            Box::new(GeoResolver::new(config)?),
            Box::new(WeatherGateway::new(config)?),
        ))
    }

    /// Resolve `place`, then fetch and decode current conditions and forecast.
    pub async fn refresh(&self, place: &str) -> Result<Report, Error> {
        let coordinates = self
            .geocoder
            .resolve(place)
            .await?
            .ok_or_else(|| Error::NotFound {
                place: place.to_string(),
            })?;

        let (current, forecast) = tokio::try_join!(
            self.source.fetch_current(coordinates),
            self.source.fetch_forecast(coordinates),
        )?;

        let current = parse_current(&current)?;
        let forecast = parse_forecast(&forecast)?;
        let daily = summarize_by_day(&forecast);

        info!(
            place,
            steps = forecast.len(),
            days = daily.len(),
            "weather refreshed"
        );

        Ok(Report {
            place: place.to_string(),
            coordinates,
            current,
            forecast,
            daily,
        })
    }
}
