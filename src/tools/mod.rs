//! Per-domain data fetchers.
//!
//! A fetcher turns trip parameters into a short text digest for a prompt. It
//! never fails: missing input, missing credentials and provider errors all
//! become a sentinel line, so one unavailable source cannot stop a plan.

pub mod food;
pub mod hotel;
pub mod search;
pub mod transport;
pub mod weather;

use std::sync::Arc;

use crate::error::PlannerError;
use crate::types::{Domain, TripRequest};

pub use search::{SearchHit, SearchProvider};
pub use weather::{Coordinates, CurrentConditions, ForecastPoint, WeatherProvider};

pub const NO_DESTINATION: &str = "No destination was provided, so the search cannot be performed.";
pub const EMPTY_QUERY: &str = "The search query is empty, so the search cannot be performed.";
pub const NO_SEARCH_RESULTS: &str = "No live search results were found.";
pub const SEARCH_UNAVAILABLE: &str = "Web search is not configured, so no live results are available.";
pub const WEATHER_UNAVAILABLE: &str = "The weather API key is not configured.";

pub fn search_failed(err: &PlannerError) -> String {
    format!("Search request failed: {err}")
}

pub fn location_not_found(destination: &str) -> String {
    format!("No location data found for {destination}.")
}

pub fn weather_failed(err: &PlannerError) -> String {
    format!("Weather lookup failed: {err}")
}

/// The external data sources available to a planner.
///
/// An absent provider behaves like a missing credential.
#[derive(Debug, Clone, Default)]
pub struct DataFetchers {
    search: Option<Arc<dyn SearchProvider>>,
    weather: Option<Arc<dyn WeatherProvider>>,
}

impl DataFetchers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(search);
        self
    }

    pub fn with_weather(mut self, weather: Arc<dyn WeatherProvider>) -> Self {
        self.weather = Some(weather);
        self
    }

    /// Digest for `domain`, or `None` for domains with no external source
    pub async fn fetch(&self, domain: Domain, trip: &TripRequest) -> Option<String> {
        let search = self.search.as_deref();
        match domain {
            Domain::Weather => Some(weather::fetch_weather_digest(self.weather.as_deref(), trip).await),
            Domain::Transport => Some(transport::transport_digest(trip)),
            Domain::Hotel => Some(hotel::fetch_hotel_digest(search, trip).await),
            Domain::Itinerary => None,
            Domain::Food => Some(food::fetch_food_digest(search, trip).await),
        }
    }
}
