use crate::error::{PlannerError, Result};
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trip parameters submitted with a plan request.
///
/// Missing fields deserialize to empty text or `None`; nothing here fails on
/// absent input. Use [`TripRequest::validate`] at an outward-facing boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TripRequest {
    /// Departure city (e.g., "Seoul")
    #[serde(deserialize_with = "lenient_text")]
    pub departure: String,
    /// Destination city (e.g., "Busan")
    #[serde(deserialize_with = "lenient_text")]
    pub destination: String,
    /// First day of the trip, `YYYY-MM-DD`
    #[serde(deserialize_with = "lenient_text")]
    pub start_date: String,
    /// Last day of the trip, `YYYY-MM-DD`
    #[serde(deserialize_with = "lenient_text")]
    pub end_date: String,
    /// Number of travelers
    #[serde(deserialize_with = "lenient_count")]
    pub people: Option<u32>,
    /// Total budget in units of 10,000 KRW
    #[serde(deserialize_with = "lenient_count")]
    pub budget: Option<u32>,
    /// Trip purpose or special notes (e.g., "family trip")
    #[serde(deserialize_with = "lenient_text")]
    pub purpose: String,
}

impl TripRequest {
    pub fn new(
        destination: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            destination: destination.into(),
            start_date: start_date.into(),
            end_date: end_date.into(),
            ..Self::default()
        }
    }

    pub fn with_departure(mut self, departure: impl Into<String>) -> Self {
        self.departure = departure.into();
        self
    }

    pub fn with_people(mut self, people: u32) -> Self {
        self.people = Some(people);
        self
    }

    pub fn with_budget(mut self, budget: u32) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = purpose.into();
        self
    }

    /// Read trip parameters out of a loosely-typed payload.
    ///
    /// Unknown keys are ignored and missing or mistyped ones fall back to
    /// their defaults. A payload that is not an object yields an empty request.
    pub fn from_value(payload: &Value) -> Self {
        if !payload.is_object() {
            return Self::default();
        }
        Self::deserialize(payload).unwrap_or_default()
    }

    /// Boundary validation used by the CLI and HTTP layer, never by the pipeline.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("destination", &self.destination),
            ("start_date", &self.start_date),
            ("end_date", &self.end_date),
        ] {
            if value.trim().is_empty() {
                return Err(PlannerError::InvalidRequest(format!("{field} is required")));
            }
        }

        let start = parse_date("start_date", &self.start_date)?;
        let end = parse_date("end_date", &self.end_date)?;
        if end < start {
            return Err(PlannerError::InvalidRequest(format!(
                "end_date {} is before start_date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Travel period rendered as `start ~ end`
    pub fn period(&self) -> String {
        format!("{} ~ {}", self.start_date, self.end_date)
    }

    pub fn people_text(&self) -> String {
        self.people.map(|p| p.to_string()).unwrap_or_default()
    }

    pub fn budget_text(&self) -> String {
        self.budget.map(|b| b.to_string()).unwrap_or_default()
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|err| {
        PlannerError::InvalidRequest(format!("{field} must be YYYY-MM-DD ({value}): {err}"))
    })
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(number) => number.to_string(),
        _ => String::new(),
    })
}

fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_reads_form_payload() {
        let trip = TripRequest::from_value(&json!({
            "departure": "Seoul",
            "destination": "Busan",
            "start_date": "2024-01-15",
            "end_date": "2024-01-17",
            "people": 2,
            "budget": 50,
            "purpose": "family trip"
        }));

        assert_eq!(trip.departure, "Seoul");
        assert_eq!(trip.destination, "Busan");
        assert_eq!(trip.people, Some(2));
        assert_eq!(trip.budget, Some(50));
        assert_eq!(trip.period(), "2024-01-15 ~ 2024-01-17");
    }

    #[test]
    fn test_from_value_accepts_numeric_strings() {
        let trip = TripRequest::from_value(&json!({
            "destination": "Busan",
            "people": "2",
            "budget": " 50 "
        }));
        assert_eq!(trip.people, Some(2));
        assert_eq!(trip.budget, Some(50));
    }

    #[test]
    fn test_from_value_defaults_missing_and_mistyped_fields() {
        let trip = TripRequest::from_value(&json!({
            "destination": null,
            "people": "a few",
            "budget": -3,
            "purpose": ["not", "text"]
        }));

        assert_eq!(trip, TripRequest::default());
        assert_eq!(trip.people_text(), "");
        assert_eq!(TripRequest::from_value(&json!("Busan")), TripRequest::default());
    }

    #[test]
    fn test_validate() {
        let trip = TripRequest::new("Busan", "2024-01-15", "2024-01-17");
        assert!(trip.validate().is_ok());

        let missing = TripRequest::new("", "2024-01-15", "2024-01-17");
        let err = missing.validate().unwrap_err();
        assert!(err.to_string().contains("destination is required"));

        let reversed = TripRequest::new("Busan", "2024-01-17", "2024-01-15");
        assert!(reversed.validate().is_err());

        let malformed = TripRequest::new("Busan", "15/01/2024", "2024-01-17");
        assert!(malformed.validate().is_err());
    }
}
