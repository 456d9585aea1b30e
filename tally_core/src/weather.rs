//! Weather lookup collaborator.
//!
//! Resolves a city name to a current temperature in °C. The lookup is
//! best-effort: any failure (missing key, network, bad status, bad
//! payload) is absorbed into a fixed fallback so callers always get a
//! usable number.

use crate::config::WeatherConfig;
use serde::Deserialize;
use std::time::Duration;

/// Temperature substituted when the weather lookup fails, in °C.
pub const FALLBACK_TEMP_C: f64 = 20.0;

/// A collaborator that resolves a city to a temperature.
///
/// Implementations must be infallible from the caller's point of view:
/// a degraded lookup returns a fallback value, never an error.
pub trait WeatherLookup {
    fn temperature_c(&self, city: &str) -> f64;
}

/// OpenWeatherMap current-weather response (metric units).
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
}

/// Weather lookup backed by the OpenWeatherMap current-weather API.
pub struct OpenWeatherClient {
    client: reqwest::blocking::Client,
    api_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn fetch(&self, city: &str, api_key: &str) -> Result<f64, reqwest::Error> {
        let response = self
            .client
            .get(&self.api_url)
            .query(&[("q", city), ("appid", api_key), ("units", "metric")])
            .send()?
            .error_for_status()?;

        let body: WeatherResponse = response.json()?;
        Ok(body.main.temp)
    }
}

impl WeatherLookup for OpenWeatherClient {
    fn temperature_c(&self, city: &str) -> f64 {
        let api_key = match self.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => {
                tracing::warn!(
                    "No weather API key configured; using fallback temperature {} C",
                    FALLBACK_TEMP_C
                );
                return FALLBACK_TEMP_C;
            }
        };

        match self.fetch(city, api_key) {
            Ok(temp) => {
                tracing::debug!("Weather for {}: {} C", city, temp);
                temp
            }
            Err(e) => {
                tracing::warn!(
                    "Weather lookup for {} failed: {}. Using fallback {} C",
                    city,
                    e,
                    FALLBACK_TEMP_C
                );
                FALLBACK_TEMP_C
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeatherConfig;

    #[test]
    fn test_missing_api_key_falls_back() {
        let config = WeatherConfig {
            api_key: None,
            ..WeatherConfig::default()
        };
        let client = OpenWeatherClient::new(&config);
        assert_eq!(client.temperature_c("Lisbon"), FALLBACK_TEMP_C);
    }

    #[test]
    fn test_unreachable_endpoint_falls_back() {
        let config = WeatherConfig {
            api_url: "http://127.0.0.1:0/weather".into(),
            api_key: Some("key".into()),
            timeout_seconds: 1,
        };
        let client = OpenWeatherClient::new(&config);
        assert_eq!(client.temperature_c("Lisbon"), FALLBACK_TEMP_C);
    }

    #[test]
    fn test_response_shape_parses() {
        let body: WeatherResponse =
            serde_json::from_str(r#"{"main": {"temp": 27.4, "humidity": 40}}"#).unwrap();
        assert_eq!(body.main.temp, 27.4);
    }
}
