//! Place name to coordinates via a Nominatim-style search endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use std::fmt::Debug;
use tracing::{debug, info};

use crate::{
    Config,
    error::{LookupFailed, ParseError, TransportError},
    http,
    model::Coordinates,
};

#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` means the provider had no candidate for `place`.
    async fn resolve(&self, place: &str) -> Result<Option<Coordinates>, LookupFailed>;
}

#[derive(Debug, Clone)]
pub struct GeoResolver {
    endpoint: String,
    http: Client,
}

impl GeoResolver {
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        Ok(Self {
            endpoint: config.endpoints.geocode_url.clone(),
            http: http::build_client(config)?,
        })
    }
}

#[async_trait]
impl Geocoder for GeoResolver {
    async fn resolve(&self, place: &str) -> Result<Option<Coordinates>, LookupFailed> {
        if place.trim().is_empty() {
            return Ok(None);
        }

        let body = http::get_text(&self.http, &self.endpoint, &[("q", place), ("format", "json")])
            .await?;

        let found = first_candidate(&body)?;
        match found {
            Some(coords) => info!(
                place,
                lat = coords.latitude,
                lon = coords.longitude,
                "resolved location"
            ),
            None => debug!(place, "geocoder returned no candidates"),
        }

        Ok(found)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(deserialize_with = "degrees")]
    lat: f64,
    #[serde(deserialize_with = "degrees")]
    lon: f64,
}

/// Nominatim sends coordinates as strings; other geocoders send numbers.
fn degrees<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrText {
        Number(f64),
        Text(String),
    }

    match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(n) => Ok(n),
        NumberOrText::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("'{s}' is not a coordinate"))),
    }
}

/// First-match-wins: no disambiguation between candidates.
pub(crate) fn first_candidate(body: &str) -> Result<Option<Coordinates>, ParseError> {
    let candidates: Vec<Candidate> =
        serde_json::from_str(body).map_err(|source| ParseError::Json {
            context: "geocoding",
            source,
        })?;

    Ok(candidates.into_iter().next().map(|c| Coordinates {
        latitude: c.lat,
        longitude: c.lon,
    }))
}
