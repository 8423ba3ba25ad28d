//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The query builder for the current-weather endpoint
//! - A fetcher abstraction with an OpenWeatherMap implementation
//! - The presenter that turns a reading into console text
//!
//! It is used by `weather-gpt-cli`, but can also be reused by other binaries.

pub mod config;
pub mod error;
pub mod model;
pub mod present;
pub mod provider;
pub mod query;

pub use config::{Config, Settings};
pub use error::WeatherError;
pub use model::WeatherReading;
pub use present::{Category, celsius, render_weather};
pub use provider::{OpenWeatherFetcher, WeatherFetcher, current_weather};
pub use query::build_query_url;
