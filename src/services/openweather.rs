use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::config::DEFAULT_OPENWEATHER_BASE_URL;
use crate::services::openai_client::http_client;
use crate::error::{PlannerError, Result};
use crate::tools::weather::{Coordinates, CurrentConditions, ForecastPoint, WeatherProvider};

/// OpenWeatherMap geocoding, current weather and 5-day/3-hour forecast
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    lang: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct GeoEntry {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct MainBlock {
    temp: f64,
    feels_like: f64,
    humidity: u32,
}

#[derive(Debug, Deserialize)]
struct ConditionBlock {
    description: String,
}

#[derive(Debug, Default, Deserialize)]
struct WindBlock {
    #[serde(default)]
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
    #[serde(default)]
    wind: WindBlock,
}

#[derive(Debug, Deserialize)]
struct ForecastEntry {
    dt: i64,
    main: MainBlock,
    #[serde(default)]
    weather: Vec<ConditionBlock>,
}

#[derive(Debug, Default, Deserialize)]
struct CityBlock {
    /// Offset from UTC in seconds
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    list: Vec<ForecastEntry>,
    #[serde(default)]
    city: CityBlock,
}

fn first_description(conditions: &[ConditionBlock]) -> String {
    conditions
        .first()
        .map(|condition| condition.description.clone())
        .unwrap_or_default()
}

impl OpenWeatherClient {
    pub fn new(api_key: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        Ok(Self {
            api_key: api_key.into(),
            base_url: DEFAULT_OPENWEATHER_BASE_URL.to_string(),
            lang: "en".to_string(),
            client: http_client(timeout)?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = lang.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlannerError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response.json().await?)
    }

    fn weather_params(&self, coordinates: Coordinates) -> Vec<(&'static str, String)> {
        vec![
            ("lat", coordinates.lat.to_string()),
            ("lon", coordinates.lon.to_string()),
            ("units", "metric".to_string()),
            ("lang", self.lang.clone()),
        ]
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherClient {
    async fn geocode(&self, place: &str) -> Result<Option<Coordinates>> {
        let entries: Vec<GeoEntry> = self
            .get_json(
                "/geo/1.0/direct",
                &[("q", place.to_string()), ("limit", "1".to_string())],
            )
            .await?;

        Ok(entries.first().map(|entry| Coordinates {
            lat: entry.lat,
            lon: entry.lon,
        }))
    }

    async fn current(&self, coordinates: Coordinates) -> Result<CurrentConditions> {
        let body: CurrentResponse = self
            .get_json("/data/2.5/weather", &self.weather_params(coordinates))
            .await?;

        Ok(CurrentConditions {
            temperature: body.main.temp,
            feels_like: body.main.feels_like,
            humidity: body.main.humidity,
            description: first_description(&body.weather),
            wind_speed: body.wind.speed,
        })
    }

    async fn forecast(&self, coordinates: Coordinates) -> Result<Vec<ForecastPoint>> {
        let body: ForecastResponse = self
            .get_json("/data/2.5/forecast", &self.weather_params(coordinates))
            .await?;

        let offset = FixedOffset::east_opt(body.city.timezone).ok_or_else(|| {
            PlannerError::InvalidResponse(format!(
                "forecast timezone offset out of range: {}",
                body.city.timezone
            ))
        })?;

        body.list
            .into_iter()
            .map(|entry| {
                let timestamp = DateTime::<Utc>::from_timestamp(entry.dt, 0).ok_or_else(|| {
                    PlannerError::InvalidResponse(format!("forecast timestamp out of range: {}", entry.dt))
                })?;
                Ok(ForecastPoint {
                    timestamp: timestamp.with_timezone(&offset),
                    temperature: entry.main.temp,
                    feels_like: entry.main.feels_like,
                    humidity: entry.main.humidity,
                    description: first_description(&entry.weather),
                })
            })
            .collect()
    }
}
