#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{FixedOffset, NaiveDate};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex,
};
use trip_agent_rs::{
    tools::{Coordinates, CurrentConditions, ForecastPoint},
    AgentPersona, CompletionProvider, PlannerError, Result, SearchHit, SearchProvider,
    TripRequest, WeatherProvider,
};

pub fn busan_trip() -> TripRequest {
    TripRequest::new("Busan", "2024-01-15", "2024-01-17")
        .with_departure("Seoul")
        .with_people(2)
        .with_budget(50)
        .with_purpose("family trip")
}

/// Completion service that answers with a canned markdown table and can be
/// told to fail on one call (1-based).
#[derive(Debug, Default)]
pub struct ScriptedCompletion {
    fail_on: Option<usize>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on: Some(call),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedCompletion {
    async fn complete(&self, persona: &AgentPersona, prompt: &str) -> Result<String> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };
        if self.fail_on == Some(call) {
            return Err(PlannerError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            });
        }
        Ok(format!(
            "| {} | call {} |\n\n## Sources\n- https://example.com/{}",
            persona.role, call, call
        ))
    }
}

/// Search service that records every query it receives
#[derive(Debug, Default)]
pub struct RecordingSearch {
    queries: Mutex<Vec<String>>,
}

impl RecordingSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for RecordingSearch {
    async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(vec![
            SearchHit::new("Haeundae Grand", "Beachfront hotel", "https://example.com/grand"),
            SearchHit::new("Jagalchi Market", "Seafood market", "https://example.com/jagalchi"),
        ])
    }
}

/// Weather service with a fixed two-day forecast for Busan
#[derive(Debug, Default)]
pub struct StubWeather {
    pub calls: AtomicUsize,
}

impl StubWeather {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn point(day: u32, hour: u32, temperature: f64, description: &str) -> ForecastPoint {
    let offset = FixedOffset::east_opt(9 * 3600).unwrap();
    ForecastPoint {
        timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_local_timezone(offset)
            .unwrap(),
        temperature,
        feels_like: temperature - 3.0,
        humidity: 50,
        description: description.to_string(),
    }
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn geocode(&self, _place: &str) -> Result<Option<Coordinates>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Coordinates {
            lat: 35.1796,
            lon: 129.0756,
        }))
    }

    async fn current(&self, _coordinates: Coordinates) -> Result<CurrentConditions> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(CurrentConditions {
            temperature: 4.0,
            feels_like: 1.0,
            humidity: 45,
            description: "clear sky".to_string(),
            wind_speed: 3.0,
        })
    }

    async fn forecast(&self, _coordinates: Coordinates) -> Result<Vec<ForecastPoint>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![
            point(15, 9, 20.0, "clear"),
            point(15, 12, 22.0, "clear"),
            point(15, 18, 18.0, "cloudy"),
            point(16, 9, 15.0, "rain"),
        ])
    }
}
