use reqwest::Url;

use crate::error::WeatherError;

/// Build the current-weather URL: `{base_url}/weather?q={city}&appid={api_key}`.
///
/// Query values are form-encoded, so `New York` goes out as `New+York`.
pub fn build_query_url(base_url: &str, city: &str, api_key: &str) -> Result<String, WeatherError> {
    let city = city.trim();
    if city.is_empty() {
        return Err(WeatherError::configuration("City name must not be empty"));
    }
    if api_key.trim().is_empty() {
        return Err(WeatherError::configuration("API key must not be empty"));
    }

    let mut url = endpoint(base_url)?;
    url.query_pairs_mut().append_pair("q", city).append_pair("appid", api_key);

    Ok(url.into())
}

/// Validate a base URL and append the `/weather` path segment.
pub(crate) fn endpoint(base_url: &str) -> Result<Url, WeatherError> {
    let base = base_url.trim().trim_end_matches('/');
    if base.is_empty() {
        return Err(WeatherError::configuration("Base URL must not be empty"));
    }

    let mut url = Url::parse(base)
        .map_err(|e| WeatherError::configuration(format!("Invalid base URL '{base_url}': {e}")))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(WeatherError::configuration(format!(
            "Base URL '{base_url}' must use http or https"
        )));
    }
    if url.query().is_some() {
        return Err(WeatherError::configuration(format!(
            "Base URL '{base_url}' must not carry a query string"
        )));
    }
    if url.fragment().is_some() {
        return Err(WeatherError::configuration(format!(
            "Base URL '{base_url}' must not carry a fragment"
        )));
    }

    url.path_segments_mut()
        .map_err(|()| WeatherError::configuration(format!("Base URL '{base_url}' cannot take a path")))?
        .pop_if_empty()
        .push("weather");

    Ok(url)
}

/// Copy of `url` with the `appid` value masked, for logs.
pub(crate) fn redact_api_key(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return "<invalid url>".to_string();
    };

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "appid" { "***".to_string() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}
