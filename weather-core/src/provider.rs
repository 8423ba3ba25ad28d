use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, instrument};

use crate::{Settings, WeatherError, WeatherReading, query::build_query_url};

pub mod openweather;

pub use openweather::OpenWeatherFetcher;

/// One GET against a fully built query URL, decoded into a reading.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_weather(&self, url: &str) -> Result<WeatherReading, WeatherError>;
}

/// Build the query for `city` and fetch it once.
#[instrument(skip(fetcher, settings))]
pub async fn current_weather(
    fetcher: &dyn WeatherFetcher,
    settings: &Settings,
    city: &str,
) -> Result<WeatherReading, WeatherError> {
    let url = build_query_url(&settings.base_url, city, &settings.api_key)?;
    let reading = fetcher.fetch_weather(&url).await?;
    debug!(location = %reading.location_name, category = %reading.category, "weather received");
    Ok(reading)
}
