/// One decoded current-weather observation.
///
/// Temperatures stay in Kelvin as received; conversion happens at presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub location_name: String,
    pub country_code: String,
    /// Primary condition label, e.g. "Clouds" or "Rain".
    pub category: String,
    pub temperature_k: f64,
    pub feels_like_k: f64,
    pub temp_min_k: f64,
    pub temp_max_k: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub wind_deg: u16,
    /// Unix seconds, UTC.
    pub sunrise: i64,
    pub sunset: i64,
}
