use super::{search::search_digest, search::SearchProvider, NO_DESTINATION};
use crate::types::TripRequest;

/// Search query for lodging: destination, dates and purpose, blanks skipped.
/// `None` when there is no destination to search for.
pub fn hotel_query(trip: &TripRequest) -> Option<String> {
    let destination = trip.destination.trim();
    if destination.is_empty() {
        return None;
    }

    let parts = [
        destination,
        "hotel recommendations",
        trip.start_date.trim(),
        trip.end_date.trim(),
        trip.purpose.trim(),
    ];
    Some(
        parts
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" "),
    )
}

pub async fn fetch_hotel_digest(search: Option<&dyn SearchProvider>, trip: &TripRequest) -> String {
    match hotel_query(trip) {
        Some(query) => search_digest(search, "hotel", &query).await,
        None => NO_DESTINATION.to_string(),
    }
}
