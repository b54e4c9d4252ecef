//! Core library for the `skycast` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Geocoding of free-text place names
//! - Raw access to the weather provider and decoding of its payloads
//! - Day-level aggregation of the forecast series
//!
//! It is used by `skycast-cli`, but any other front end can drive
//! [`WeatherService`] or the individual stages directly.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod gateway;
pub mod geo;
mod http;
pub mod model;
pub mod parse;
pub mod service;

pub use aggregate::{MAX_DAYS, entries_for_date, summarize_by_day};
pub use config::{Config, Endpoints};
pub use error::{Error, LookupFailed, ParseError, TransportError};
pub use gateway::{WeatherGateway, WeatherSource};
pub use geo::{GeoResolver, Geocoder};
pub use model::{Coordinates, CurrentWeather, DailySummary, ForecastEntry, RawPayload};
pub use parse::{parse_current, parse_forecast};
pub use service::{Report, WeatherService};
