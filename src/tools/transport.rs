//! Transport has no live timetable source. The digest is a fixed set of
//! search keywords the model is asked to reason about.

use super::NO_DESTINATION;
use crate::types::TripRequest;

pub fn search_keywords(trip: &TripRequest) -> Vec<String> {
    let departure = trip.departure.trim();
    let destination = trip.destination.trim();
    let route = [departure, destination]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if route.is_empty() {
        return Vec::new();
    }

    let mut keywords = vec![
        format!("{route} train schedule"),
        format!("{route} express bus schedule"),
        format!("{route} flight"),
    ];
    if !destination.is_empty() {
        keywords.push(format!("{destination} local transit"));
    }
    keywords
}

pub fn transport_digest(trip: &TripRequest) -> String {
    let keywords = search_keywords(trip);
    if keywords.is_empty() {
        return NO_DESTINATION.to_string();
    }

    let mut lines = vec!["Suggested searches:".to_string()];
    lines.extend(
        keywords
            .iter()
            .enumerate()
            .map(|(idx, keyword)| format!("{}. {}", idx + 1, keyword)),
    );
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_cover_each_mode() {
        let trip = TripRequest::new("Busan", "2024-01-15", "2024-01-17").with_departure("Seoul");
        assert_eq!(
            search_keywords(&trip),
            vec![
                "Seoul Busan train schedule",
                "Seoul Busan express bus schedule",
                "Seoul Busan flight",
                "Busan local transit",
            ]
        );
    }

    #[test]
    fn test_digest_without_departure() {
        let trip = TripRequest::new("Busan", "", "");
        let digest = transport_digest(&trip);
        assert!(digest.starts_with("Suggested searches:\n1. Busan train schedule"));
        assert!(digest.ends_with("4. Busan local transit"));
    }

    #[test]
    fn test_no_route_sentinel() {
        assert_eq!(transport_digest(&TripRequest::default()), NO_DESTINATION);
    }
}
