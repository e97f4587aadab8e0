use crate::error::{PlannerError, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five travel-planning topics, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Weather,
    Transport,
    Hotel,
    /// Day-by-day itinerary; keyed as `plan` in the result
    #[serde(rename = "plan")]
    Itinerary,
    Food,
}

impl Domain {
    /// Fixed execution order of the plan pipeline
    pub const ALL: [Domain; 5] = [
        Domain::Weather,
        Domain::Transport,
        Domain::Hotel,
        Domain::Itinerary,
        Domain::Food,
    ];

    /// Key under which this domain's output appears in a [`PlanResult`]
    pub fn key(self) -> &'static str {
        match self {
            Domain::Weather => "weather",
            Domain::Transport => "transport",
            Domain::Hotel => "hotel",
            Domain::Itinerary => "plan",
            Domain::Food => "food",
        }
    }

    /// Name of the agent that handles this domain, used in interaction logs
    pub fn agent_name(self) -> &'static str {
        match self {
            Domain::Weather => "WeatherAgent",
            Domain::Transport => "TransportAgent",
            Domain::Hotel => "HotelAgent",
            Domain::Itinerary => "PlanAgent",
            Domain::Food => "FoodAgent",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Aggregated output of a full plan request.
///
/// Every field is the model's completion for that domain, as free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlanResult {
    pub weather: String,
    pub transport: String,
    pub hotel: String,
    pub plan: String,
    pub food: String,
}

impl PlanResult {
    /// Completion text for a domain
    pub fn get(&self, domain: Domain) -> &str {
        match domain {
            Domain::Weather => &self.weather,
            Domain::Transport => &self.transport,
            Domain::Hotel => &self.hotel,
            Domain::Itinerary => &self.plan,
            Domain::Food => &self.food,
        }
    }

    /// Iterate `(domain, text)` pairs in pipeline order
    pub fn iter(&self) -> impl Iterator<Item = (Domain, &str)> {
        Domain::ALL.into_iter().map(move |domain| (domain, self.get(domain)))
    }
}

/// Output of the weather-only entry point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WeatherReport {
    pub weather: String,
}

/// Collects per-domain completions and yields a [`PlanResult`] only once all
/// five are present.
#[derive(Debug, Default)]
pub struct PlanBuilder {
    weather: Option<String>,
    transport: Option<String>,
    hotel: Option<String>,
    plan: Option<String>,
    food: Option<String>,
}

impl PlanBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, domain: Domain, text: String) {
        let slot = match domain {
            Domain::Weather => &mut self.weather,
            Domain::Transport => &mut self.transport,
            Domain::Hotel => &mut self.hotel,
            Domain::Itinerary => &mut self.plan,
            Domain::Food => &mut self.food,
        };
        *slot = Some(text);
    }

    pub fn finish(self) -> Result<PlanResult> {
        fn take(slot: Option<String>, domain: Domain) -> Result<String> {
            slot.ok_or_else(|| {
                PlannerError::InvalidResponse(format!("no completion recorded for {domain}"))
            })
        }

        Ok(PlanResult {
            weather: take(self.weather, Domain::Weather)?,
            transport: take(self.transport, Domain::Transport)?,
            hotel: take(self.hotel, Domain::Hotel)?,
            plan: take(self.plan, Domain::Itinerary)?,
            food: take(self.food, Domain::Food)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_itinerary_is_keyed_as_plan() {
        assert_eq!(Domain::Itinerary.key(), "plan");
        assert_eq!(
            serde_json::to_value(Domain::Itinerary).unwrap(),
            serde_json::json!("plan")
        );
    }

    #[test]
    fn test_builder_requires_all_domains() {
        let mut builder = PlanBuilder::new();
        builder.set(Domain::Weather, "sunny".to_string());
        builder.set(Domain::Transport, "train".to_string());
        assert!(builder.finish().is_err());
    }

    #[test]
    fn test_plan_result_serializes_five_string_keys() {
        let mut builder = PlanBuilder::new();
        for domain in Domain::ALL {
            builder.set(domain, format!("{domain} text"));
        }
        let result = builder.finish().unwrap();

        let value = serde_json::to_value(&result).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 5);
        for key in ["weather", "transport", "hotel", "plan", "food"] {
            assert!(object[key].is_string(), "{key} should be a string");
        }
        assert_eq!(result.get(Domain::Itinerary), "plan text");
        assert_eq!(result.iter().count(), 5);
    }
}
