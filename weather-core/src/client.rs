//! OpenWeather current-weather client.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    config::Config,
    icons::icon_for_code,
    model::WeatherReading,
};

/// The fixed unit-system parameter sent with every request.
const UNITS: &str = "imperial";

/// What a lookup can fail with. The widget routes each kind to a
/// different user-visible effect, so the kinds stay distinct here
/// instead of collapsing into one opaque error.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The search box was empty; no request was made.
    #[error("Enter City Name")]
    EmptyCity,

    /// The provider answered with a non-success status. `message` is
    /// the `message` field of the parsed body.
    #[error("{message}")]
    Provider { status: StatusCode, message: String },

    /// The request never completed (connection, DNS, ...).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The body was not the JSON shape we expect.
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Thin client over the current-weather endpoint. Cheap to clone; the
/// inner reqwest client is shared.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Look up current weather for `city`.
    ///
    /// The body is parsed as JSON before the status is inspected, so a
    /// non-2xx answer with an unparseable body classifies as
    /// [`FetchError::Parse`], not [`FetchError::Provider`].
    pub async fn current_weather(&self, city: &str) -> Result<WeatherReading, FetchError> {
        if city.is_empty() {
            return Err(FetchError::EmptyCity);
        }

        // The city is interpolated as-is, not percent-encoded. That is
        // the observed contract of the endpoint template.
        let url = format!(
            "{}/data/2.5/weather?q={}&units={}&appid={}",
            self.base_url, city, UNITS, self.api_key
        );

        debug!(%city, "fetching current weather");

        let res = self.http.get(&url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        let json: serde_json::Value = serde_json::from_str(&body)?;

        if !status.is_success() {
            let message = json
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or("provider request failed")
                .to_string();

            return Err(FetchError::Provider { status, message });
        }

        let parsed: CurrentResponse = serde_json::from_value(json)?;

        Ok(reading_from_response(parsed))
    }
}

fn reading_from_response(parsed: CurrentResponse) -> WeatherReading {
    let code = parsed
        .weather
        .first()
        .map(|w| w.icon.as_str())
        .unwrap_or_default();

    WeatherReading {
        temperature: parsed.main.temp as i32,
        humidity: parsed.main.humidity,
        wind_speed: parsed.wind.speed,
        location: parsed.name,
        icon: icon_for_code(code),
    }
}

#[derive(Debug, Deserialize)]
struct CurrentMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct CurrentCondition {
    icon: String,
}

#[derive(Debug, Deserialize)]
struct CurrentWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    name: String,
    main: CurrentMain,
    weather: Vec<CurrentCondition>,
    wind: CurrentWind,
}
