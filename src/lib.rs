//! trip-agent-rs: a multi-agent travel planner.
//!
//! Five domain agents (weather, transport, hotel, itinerary, food) run one
//! after another. Each gathers live data where it has a source, renders a
//! prompt, and asks the completion service for a markdown answer. The
//! answers are aggregated into a [`PlanResult`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use trip_agent_rs::{PlannerConfig, TravelPlanner, TripRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = PlannerConfig::from_env()?;
//!     let planner = TravelPlanner::from_config(&config)?;
//!
//!     let trip = TripRequest::new("Busan", "2024-01-15", "2024-01-17")
//!         .with_departure("Seoul")
//!         .with_people(2)
//!         .with_budget(50);
//!
//!     let plan = planner.generate_plan(&trip).await?;
//!     println!("{}", plan.hotel);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod logging;
pub mod prompts;
pub mod services;
pub mod tools;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "server")]
pub mod server;

pub use config::PlannerConfig;
pub use core::{
    persona_for, Agent, AgentPersona, CompletionProvider, PersonaVariant, PlanStage,
    TravelPlanner,
};
pub use error::{PlannerError, Result};
pub use logging::{InteractionLog, InteractionSink};
pub use tools::{DataFetchers, SearchHit, SearchProvider, WeatherProvider};
pub use types::{Domain, PlanResult, TripRequest, WeatherReport};
