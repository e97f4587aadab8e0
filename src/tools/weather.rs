use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate};
use std::{collections::HashMap, fmt::Debug, fmt::Write, time::Instant};
use tracing::{info, warn};

use super::{location_not_found, weather_failed, NO_DESTINATION, WEATHER_UNAVAILABLE};
use crate::{error::Result, types::TripRequest};

/// Forecast points listed individually (3-hour steps, about 36 hours)
pub const SHORT_RANGE_POINTS: usize = 12;
/// Forecast points folded into the daily summary (about 5 days)
pub const ROLLUP_POINTS: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub description: String,
    pub wind_speed: f64,
}

/// One forecast sample, stamped in the location's local offset
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub timestamp: DateTime<FixedOffset>,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u32,
    pub description: String,
}

/// Min/max temperature and most frequent description for one calendar day
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub min: f64,
    pub max: f64,
    pub description: String,
}

/// Geocoding and forecast service
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a place name; `Ok(None)` when the provider knows no such place
    async fn geocode(&self, place: &str) -> Result<Option<Coordinates>>;

    async fn current(&self, coordinates: Coordinates) -> Result<CurrentConditions>;

    /// Forecast points in the order the provider returns them
    async fn forecast(&self, coordinates: Coordinates) -> Result<Vec<ForecastPoint>>;
}

/// Group points by local calendar day, in order of first appearance.
pub fn daily_rollup(points: &[ForecastPoint]) -> Vec<DailySummary> {
    let mut days: Vec<(NaiveDate, Vec<f64>, Vec<&str>)> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for point in points {
        let date = point.timestamp.date_naive();
        let slot = *index.entry(date).or_insert_with(|| {
            days.push((date, Vec::new(), Vec::new()));
            days.len() - 1
        });
        days[slot].1.push(point.temperature);
        days[slot].2.push(point.description.as_str());
    }

    days.into_iter()
        .map(|(date, temps, descriptions)| DailySummary {
            date,
            min: temps.iter().copied().fold(f64::INFINITY, f64::min),
            max: temps.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            description: majority_description(&descriptions).to_string(),
        })
        .collect()
}

/// Most frequent label; ties go to the label seen first.
pub fn majority_description<'a>(descriptions: &[&'a str]) -> &'a str {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for &description in descriptions {
        match counts.iter_mut().find(|(label, _)| *label == description) {
            Some((_, count)) => *count += 1,
            None => counts.push((description, 1)),
        }
    }

    counts
        .iter()
        .fold(None::<(&'a str, usize)>, |best, &(label, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((label, count)),
        })
        .map(|(label, _)| label)
        .unwrap_or("")
}

/// Render current conditions, the short-range forecast and the daily rollup
pub fn render_weather_digest(
    destination: &str,
    current: &CurrentConditions,
    points: &[ForecastPoint],
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Current weather in {destination}");
    let _ = writeln!(
        out,
        "Temperature: {:.1}°C (feels like {:.1}°C)",
        current.temperature, current.feels_like
    );
    let _ = writeln!(
        out,
        "Humidity: {}%, conditions: {}",
        current.humidity, current.description
    );
    let _ = writeln!(out, "Wind: {:.1}m/s", current.wind_speed);

    let _ = writeln!(out, "\nForecast (3-hour intervals):");
    for (idx, point) in points.iter().take(SHORT_RANGE_POINTS).enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - {:.1}°C, {}, humidity {}%",
            idx + 1,
            point.timestamp.format("%m/%d %H:%M"),
            point.temperature,
            point.description,
            point.humidity
        );
    }

    let _ = writeln!(out, "\nDaily summary:");
    let rollup_len = points.len().min(ROLLUP_POINTS);
    for (idx, day) in daily_rollup(&points[..rollup_len]).iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. {} - low {:.1}°C, high {:.1}°C, {}",
            idx + 1,
            day.date.format("%m/%d"),
            day.min,
            day.max,
            day.description
        );
    }

    out
}

/// Weather digest for a trip; never fails.
pub async fn fetch_weather_digest(
    provider: Option<&dyn WeatherProvider>,
    trip: &TripRequest,
) -> String {
    let destination = trip.destination.trim();
    if destination.is_empty() {
        return NO_DESTINATION.to_string();
    }
    let Some(provider) = provider else {
        return WEATHER_UNAVAILABLE.to_string();
    };

    let started = Instant::now();
    let digest = match lookup(provider, destination).await {
        Ok(Some(digest)) => digest,
        Ok(None) => location_not_found(destination),
        Err(err) => {
            warn!(destination, "weather lookup failed: {}", err);
            weather_failed(&err)
        }
    };

    info!(
        search_type = "weather",
        query = destination,
        period = %trip.period(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "weather lookup completed"
    );
    digest
}

async fn lookup(provider: &dyn WeatherProvider, destination: &str) -> Result<Option<String>> {
    let Some(coordinates) = provider.geocode(destination).await? else {
        return Ok(None);
    };
    let current = provider.current(coordinates).await?;
    let points = provider.forecast(coordinates).await?;
    Ok(Some(render_weather_digest(destination, &current, &points)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn point(day: u32, hour: u32, temperature: f64, description: &str) -> ForecastPoint {
        let offset = FixedOffset::east_opt(9 * 3600).unwrap();
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
            .and_local_timezone(offset)
            .unwrap();
        ForecastPoint {
            timestamp,
            temperature,
            feels_like: temperature - 2.0,
            humidity: 60,
            description: description.to_string(),
        }
    }

    #[derive(Debug, Default)]
    struct Stub {
        calls: AtomicUsize,
        unknown_place: bool,
        forecast_fails: bool,
    }

    #[async_trait]
    impl WeatherProvider for Stub {
        async fn geocode(&self, _place: &str) -> Result<Option<Coordinates>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unknown_place {
                return Ok(None);
            }
            Ok(Some(Coordinates {
                lat: 35.1796,
                lon: 129.0756,
            }))
        }

        async fn current(&self, _coordinates: Coordinates) -> Result<CurrentConditions> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(CurrentConditions {
                temperature: 3.24,
                feels_like: 0.06,
                humidity: 41,
                description: "clear sky".to_string(),
                wind_speed: 2.1,
            })
        }

        async fn forecast(&self, _coordinates: Coordinates) -> Result<Vec<ForecastPoint>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.forecast_fails {
                return Err(PlannerError::Api {
                    status: 401,
                    message: "Invalid API key".to_string(),
                });
            }
            Ok(vec![
                point(15, 9, 20.0, "clear"),
                point(15, 12, 22.0, "clear"),
                point(15, 18, 18.0, "cloudy"),
                point(16, 9, 15.0, "rain"),
            ])
        }
    }

    #[test]
    fn test_daily_rollup_two_days() {
        let points = vec![
            point(15, 9, 20.0, "clear"),
            point(15, 12, 22.0, "clear"),
            point(15, 18, 18.0, "cloudy"),
            point(16, 9, 15.0, "rain"),
        ];

        let rollup = daily_rollup(&points);
        assert_eq!(rollup.len(), 2);

        assert_eq!(rollup[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(rollup[0].min, 18.0);
        assert_eq!(rollup[0].max, 22.0);
        assert_eq!(rollup[0].description, "clear");

        assert_eq!(rollup[1].min, 15.0);
        assert_eq!(rollup[1].max, 15.0);
        assert_eq!(rollup[1].description, "rain");
    }

    #[test]
    fn test_majority_tie_goes_to_first_seen() {
        assert_eq!(majority_description(&["snow", "rain", "rain", "snow"]), "snow");
        assert_eq!(majority_description(&["fog", "rain", "rain"]), "rain");
        assert_eq!(majority_description(&[]), "");
    }

    #[test]
    fn test_rollup_groups_by_local_day() {
        // 23:00 and 02:00 local belong to different days even though they are 3h apart.
        let points = vec![point(15, 23, 5.0, "mist"), point(16, 2, 3.0, "mist")];
        let rollup = daily_rollup(&points);
        assert_eq!(rollup.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_destination_makes_no_calls() {
        let stub = Stub::default();
        let trip = TripRequest::new("  ", "2024-01-15", "2024-01-17");

        let digest = fetch_weather_digest(Some(&stub), &trip).await;

        assert_eq!(digest, NO_DESTINATION);
        assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_provider_sentinel() {
        let trip = TripRequest::new("Busan", "2024-01-15", "2024-01-17");
        assert_eq!(fetch_weather_digest(None, &trip).await, WEATHER_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_digest_sections() {
        let stub = Stub::default();
        let trip = TripRequest::new("Busan", "2024-01-15", "2024-01-17");

        let digest = fetch_weather_digest(Some(&stub), &trip).await;

        assert!(digest.starts_with("Current weather in Busan\n"));
        assert!(digest.contains("Temperature: 3.2°C (feels like 0.1°C)"));
        assert!(digest.contains("Humidity: 41%, conditions: clear sky"));
        assert!(digest.contains("1. 01/15 09:00 - 20.0°C, clear, humidity 60%"));
        assert!(digest.contains("1. 01/15 - low 18.0°C, high 22.0°C, clear"));
        assert!(digest.contains("2. 01/16 - low 15.0°C, high 15.0°C, rain"));
        assert_eq!(stub.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_unknown_place_and_provider_failure_degrade() {
        let trip = TripRequest::new("Atlantis", "2024-01-15", "2024-01-17");

        let unknown = Stub {
            unknown_place: true,
            ..Stub::default()
        };
        let digest = fetch_weather_digest(Some(&unknown), &trip).await;
        assert_eq!(digest, location_not_found("Atlantis"));

        let failing = Stub {
            forecast_fails: true,
            ..Stub::default()
        };
        let digest = fetch_weather_digest(Some(&failing), &trip).await;
        assert!(digest.starts_with("Weather lookup failed"));
        assert!(digest.contains("Invalid API key"));
    }
}
