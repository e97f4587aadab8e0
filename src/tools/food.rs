use super::{search::search_digest, search::SearchProvider, NO_DESTINATION};
use crate::types::TripRequest;

pub fn food_query(trip: &TripRequest) -> Option<String> {
    let destination = trip.destination.trim();
    (!destination.is_empty()).then(|| format!("{destination} restaurant recommendations"))
}

pub async fn fetch_food_digest(search: Option<&dyn SearchProvider>, trip: &TripRequest) -> String {
    match food_query(trip) {
        Some(query) => search_digest(search, "food", &query).await,
        None => NO_DESTINATION.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_query() {
        let trip = TripRequest::new("Busan", "2024-01-15", "2024-01-17");
        assert_eq!(
            food_query(&trip).as_deref(),
            Some("Busan restaurant recommendations")
        );
        assert_eq!(food_query(&TripRequest::default()), None);
    }
}
