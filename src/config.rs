//! Environment-driven configuration.

use crate::core::persona::PersonaVariant;
use crate::error::{PlannerError, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SERPER_BASE_URL: &str = "https://google.serper.dev";
pub const DEFAULT_OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_LOG_FILE: &str = "trip_agent_workflow.log";
pub const DEFAULT_PORT: u16 = 5555;

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub openai_api_key: String,
    pub model: String,
    pub openai_base_url: String,
    pub serper_api_key: Option<String>,
    pub serper_base_url: String,
    pub openweather_api_key: Option<String>,
    pub openweather_base_url: String,
    pub openweather_lang: String,
    pub persona_variant: PersonaVariant,
    /// `None` disables the interaction log file
    pub log_file: Option<PathBuf>,
    /// Completion length cap; `None` leaves it to the model
    pub max_tokens: Option<u32>,
    /// HTTP timeout for every provider client; `None` keeps reqwest's default (no timeout)
    pub request_timeout: Option<Duration>,
    pub port: u16,
}

impl PlannerConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let openai_api_key = get("OPENAI_API_KEY").ok_or_else(|| {
            PlannerError::Config(
                "OPENAI_API_KEY environment variable must be set before creating a planner"
                    .to_string(),
            )
        })?;

        let persona_variant = match get("TRIP_AGENT_PERSONAS") {
            Some(value) => value.parse()?,
            None => PersonaVariant::default(),
        };

        // An explicitly empty TRIP_AGENT_LOG_FILE turns the file sink off.
        let log_file = match lookup("TRIP_AGENT_LOG_FILE") {
            Some(value) if value.trim().is_empty() => None,
            Some(value) => Some(PathBuf::from(value.trim())),
            None => Some(PathBuf::from(DEFAULT_LOG_FILE)),
        };

        let request_timeout = get("REQUEST_TIMEOUT_SECS")
            .map(|value| {
                value.parse().map(Duration::from_secs).map_err(|err| {
                    PlannerError::Config(format!("REQUEST_TIMEOUT_SECS must be an integer: {err}"))
                })
            })
            .transpose()?;

        let max_tokens = get("OPENAI_MAX_TOKENS")
            .map(|value| {
                value.parse::<u32>().map_err(|err| {
                    PlannerError::Config(format!("OPENAI_MAX_TOKENS must be an integer: {err}"))
                })
            })
            .transpose()?;

        let port = match get("PORT") {
            Some(value) => value
                .parse()
                .map_err(|err| PlannerError::Config(format!("PORT must be a port number: {err}")))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            openai_api_key,
            model: get("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: get("OPENAI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            serper_api_key: get("SERPER_API_KEY"),
            serper_base_url: get("SERPER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SERPER_BASE_URL.to_string()),
            openweather_api_key: get("OPENWEATHER_API_KEY"),
            openweather_base_url: get("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OPENWEATHER_BASE_URL.to_string()),
            openweather_lang: get("OPENWEATHER_LANG").unwrap_or_else(|| "en".to_string()),
            persona_variant,
            log_file,
            max_tokens,
            request_timeout,
            port,
        })
    }
}
