//! Raw access to the weather provider. Nothing here decodes a response.

use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

use crate::{
    Config,
    error::TransportError,
    http,
    model::{Coordinates, RawPayload},
};

#[async_trait]
pub trait WeatherSource: Send + Sync + Debug {
    async fn fetch_current(&self, coords: Coordinates) -> Result<RawPayload, TransportError>;

    async fn fetch_forecast(&self, coords: Coordinates) -> Result<RawPayload, TransportError>;
}

#[derive(Debug, Clone)]
pub struct WeatherGateway {
    api_key: String,
    current_url: String,
    forecast_url: String,
    http: Client,
}

impl WeatherGateway {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?.to_owned();

        Ok(Self {
            api_key,
            current_url: config.endpoints.current_url.clone(),
            forecast_url: config.endpoints.forecast_url.clone(),
            http: http::build_client(config)?,
        })
    }

    async fn fetch(&self, url: &str, coords: Coordinates) -> Result<RawPayload, TransportError> {
        let lat = coords.latitude.to_string();
        let lon = coords.longitude.to_string();

        let body = http::get_text(
            &self.http,
            url,
            &[
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("appid", self.api_key.as_str()),
            ],
        )
        .await?;

        Ok(RawPayload::from(body))
    }
}

#[async_trait]
impl WeatherSource for WeatherGateway {
    async fn fetch_current(&self, coords: Coordinates) -> Result<RawPayload, TransportError> {
        self.fetch(&self.current_url, coords).await
    }

    async fn fetch_forecast(&self, coords: Coordinates) -> Result<RawPayload, TransportError> {
        self.fetch(&self.forecast_url, coords).await
    }
}
