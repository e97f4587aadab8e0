pub mod plan;
pub mod trip;

pub use plan::{Domain, PlanBuilder, PlanResult, WeatherReport};
pub use trip::TripRequest;
