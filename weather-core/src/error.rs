use thiserror::Error;

/// Failures of a single weather lookup.
///
/// Every variant is fatal to the invocation; nothing is retried.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Missing or blank credential, malformed base URL, or other bad settings.
    /// Raised before any network activity.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Connection, DNS, TLS or timeout failure.
    #[error("Failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("Weather service responded with status {code}: {body}")]
    HttpStatus { code: u16, body: String },

    /// The body is not JSON, or a required field is missing or mistyped.
    #[error("Failed to decode weather response: {0}")]
    Decode(String),
}

impl WeatherError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    pub fn http_status(code: u16, body: &str) -> Self {
        Self::HttpStatus { code, body: truncate_body(body) }
    }

    /// HTTP status code, for the status variant only.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_code_only_for_http_status() {
        assert_eq!(WeatherError::http_status(404, "city not found").status_code(), Some(404));
        assert_eq!(WeatherError::configuration("no key").status_code(), None);
        assert_eq!(WeatherError::Decode("bad".into()).status_code(), None);
    }

    #[test]
    fn long_bodies_are_truncated_on_char_boundary() {
        let body = "é".repeat(300);
        let err = WeatherError::http_status(500, &body);

        match err {
            WeatherError::HttpStatus { body, .. } => {
                assert!(body.ends_with("..."));
                assert_eq!(body.chars().count(), 203);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_bodies_are_kept() {
        let err = WeatherError::http_status(401, "{\"cod\":401}");
        assert_eq!(err.to_string(), "Weather service responded with status 401: {\"cod\":401}");
    }
}
