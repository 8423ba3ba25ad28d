use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{WeatherError, WeatherReading, query::redact_api_key};

use super::WeatherFetcher;

/// Fetcher for the OpenWeatherMap current-weather endpoint.
///
/// Certificate verification stays on; requests are bounded by the configured timeout.
#[derive(Debug, Clone)]
pub struct OpenWeatherFetcher {
    http: Client,
}

impl OpenWeatherFetcher {
    pub fn new(timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("weather-gpt/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http })
    }
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    deg: u16,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
}

impl TryFrom<OwCurrentResponse> for WeatherReading {
    type Error = WeatherError;

    fn try_from(parsed: OwCurrentResponse) -> Result<Self, Self::Error> {
        let category = parsed
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .ok_or_else(|| WeatherError::Decode("response contained no weather entries".into()))?;

        Ok(WeatherReading {
            location_name: parsed.name,
            country_code: parsed.sys.country,
            category,
            temperature_k: parsed.main.temp,
            feels_like_k: parsed.main.feels_like,
            temp_min_k: parsed.main.temp_min,
            temp_max_k: parsed.main.temp_max,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            wind_deg: parsed.wind.deg,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
        })
    }
}

/// Decode a current-weather body. Every field is required.
pub fn decode_reading(body: &str) -> Result<WeatherReading, WeatherError> {
    let parsed: OwCurrentResponse = serde_json::from_str(body)?;
    WeatherReading::try_from(parsed)
}

#[async_trait]
impl WeatherFetcher for OpenWeatherFetcher {
    async fn fetch_weather(&self, url: &str) -> Result<WeatherReading, WeatherError> {
        debug!(url = %redact_api_key(url), "requesting current weather");

        let res = self.http.get(url).send().await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "weather request failed");
            return Err(WeatherError::http_status(status.as_u16(), &body));
        }

        debug!(status = status.as_u16(), bytes = body.len(), "weather response received");
        decode_reading(&body)
    }
}
