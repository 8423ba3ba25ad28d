//! Human-readable rendering of a [`WeatherReading`].

use chrono::{DateTime, TimeZone};
use std::fmt::{Display, Write};

use crate::WeatherReading;

/// Fixed shift applied to sunrise/sunset before formatting (UTC+05:30).
pub const SUN_TIME_OFFSET_SECS: i64 = 19_800;

const KELVIN_OFFSET: f64 = 273.15;

const SEPARATOR: &str = "______________________________________________";

/// Weather categories with a dedicated display phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Clouds,
    Rain,
    Snow,
    Clear,
    Humid,
    Haze,
    Other,
}

impl Category {
    pub fn from_label(label: &str) -> Self {
        match label {
            "Clouds" => Category::Clouds,
            "Rain" => Category::Rain,
            "Snow" => Category::Snow,
            "Clear" => Category::Clear,
            "Humid" => Category::Humid,
            "Haze" => Category::Haze,
            _ => Category::Other,
        }
    }

    pub fn phrase(self) -> Option<&'static str> {
        match self {
            Category::Clouds => Some("☁️☁️  It's cloudy ☁️☁️"),
            Category::Rain => Some("🌧️  It's raining 🌧️"),
            Category::Snow => Some("❄️  It's snowing ❄️"),
            Category::Clear => Some("☀️  The sky is clear ☀️"),
            Category::Humid => Some("💧  It's humid 💧"),
            Category::Haze => Some("~ It's hazy ~"),
            Category::Other => None,
        }
    }
}

/// Kelvin to Celsius, rounded to 2 decimals (ties away from zero).
pub fn celsius(kelvin: f64) -> f64 {
    let c = ((kelvin - KELVIN_OFFSET) * 100.0).round() / 100.0;
    // Fold -0.0 so it never prints as "-0.00".
    if c == 0.0 { 0.0 } else { c }
}

/// `HH:MM:SS` of `unix_secs + SUN_TIME_OFFSET_SECS`, read as UTC.
pub fn shifted_clock(unix_secs: i64) -> String {
    unix_secs
        .checked_add(SUN_TIME_OFFSET_SECS)
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string())
}

/// Render the full report. `now` only feeds the banner clock.
pub fn render_weather<Tz>(reading: &WeatherReading, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = write_report(&mut out, reading, &now.format("%H:%M:%S").to_string());
    out
}

fn write_report(out: &mut String, r: &WeatherReading, clock: &str) -> std::fmt::Result {
    writeln!(out)?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out)?;
    writeln!(out, "Welcome to Weather-GPT! It's {clock} right now!")?;
    writeln!(out, "{SEPARATOR}")?;
    writeln!(out)?;

    writeln!(out, "Weather for {}, {}:", r.location_name, r.country_code)?;
    writeln!(out)?;

    if let Some(phrase) = Category::from_label(&r.category).phrase() {
        writeln!(out, "{phrase}")?;
        writeln!(out)?;
    }

    writeln!(out, "Temperature: {:.2}°C", celsius(r.temperature_k))?;
    writeln!(out, "Feels like: {:.2}°C", celsius(r.feels_like_k))?;
    writeln!(out, "Low: {:.2}°C", celsius(r.temp_min_k))?;
    writeln!(out, "High: {:.2}°C", celsius(r.temp_max_k))?;

    writeln!(out, "Humidity: {}%", r.humidity_pct)?;
    writeln!(out, "Wind Speed: {} meter/sec", r.wind_speed_mps)?;
    writeln!(out, "Wind Direction: {}°", r.wind_deg)?;

    writeln!(out)?;
    writeln!(
        out,
        "The sun rose at {} and will set at {}.",
        shifted_clock(r.sunrise),
        shifted_clock(r.sunset)
    )?;
    writeln!(out, "{SEPARATOR}")?;

    Ok(())
}
