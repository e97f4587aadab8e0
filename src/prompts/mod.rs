//! Prompt builders, one per domain.
//!
//! Templates are rendered the same way whether the digest holds live data or
//! a sentinel line; a poor digest only weakens the answer.

use crate::types::{Domain, TripRequest};

const SOURCES_SECTION: &str = r#"## Sources
End your answer with a "Sources" section that lists the URL of every page, search result or data provider you relied on, one per line. If a recommendation is based on general knowledge rather than a source, say so next to it. Do not invent URLs."#;

/// Build the prompt for `domain`. `digest` is ignored by domains that have no
/// external data source.
pub fn build_prompt(domain: Domain, trip: &TripRequest, digest: Option<&str>) -> String {
    let digest = digest.unwrap_or_default();
    match domain {
        Domain::Weather => weather_prompt(trip, digest),
        Domain::Transport => transport_prompt(trip, digest),
        Domain::Hotel => hotel_prompt(trip, digest),
        Domain::Itinerary => itinerary_prompt(trip),
        Domain::Food => food_prompt(trip, digest),
    }
}

fn budget(trip: &TripRequest) -> String {
    format!("{} (x10,000 KRW)", trip.budget_text())
}

pub fn weather_prompt(trip: &TripRequest, forecast: &str) -> String {
    format!(
        r#"Destination: {destination}
Travel period: {period}
Travelers: {people}
Purpose / notes: {purpose}

Reflect every point below and give realistic recommendations.
1. Analyze the weather for the travel period using the live forecast below; note any days the forecast does not cover.
2. Identify patterns: temperature swings between day and night, rain or snow windows, wind.
3. Recommend clothing for each layer (tops, bottoms, outerwear, shoes, accessories).
4. List essential items (umbrella, sunscreen, hat, sunglasses, warm gear) and why each is needed.
5. Give weather-related cautions and safety tips for the travelers.
6. Suggest a balance between indoor and outdoor activities for each day.

## Output table
| Date | Weather | Low / High (°C) | Recommended clothing | Essential items | Indoor/Outdoor advice |

{sources}

[Live weather forecast]
{forecast}
"#,
        destination = trip.destination,
        period = trip.period(),
        people = trip.people_text(),
        purpose = trip.purpose,
        sources = SOURCES_SECTION,
    )
}

pub fn transport_prompt(trip: &TripRequest, keywords: &str) -> String {
    format!(
        r#"Departure: {departure}
Destination: {destination}
Travel period: {period}
Travelers: {people}
Budget: {budget}
Purpose / notes: {purpose}

Reflect every point below and give realistic recommendations.
1. Use the search keywords below to work out which transport options actually connect the departure point and the destination.
2. Categorize the options (flight, train, express bus, ferry, car) and drop the ones that do not serve this route.
3. For each option give typical travel time, approximate cost per person and for the whole group, and booking channels.
4. Weigh pros and cons (speed, price, transfers, luggage) against the budget, group size and trip purpose.
5. Cover local transit at the destination and any passes worth buying.
6. Rank the options and explain the top choice.

## Output table
| Rank | Mode | Route | Travel time | Cost per person | Total cost | Pros | Cons |

{sources}

[Transport search keywords]
{keywords}
"#,
        departure = trip.departure,
        destination = trip.destination,
        period = trip.period(),
        people = trip.people_text(),
        budget = budget(trip),
        purpose = trip.purpose,
        sources = SOURCES_SECTION,
    )
}

pub fn hotel_prompt(trip: &TripRequest, search_results: &str) -> String {
    format!(
        r#"Destination: {destination}
Check-in / check-out: {period}
Travelers: {people}
Budget: {budget}
Purpose / notes: {purpose}

Recommend 2-3 places to stay, reflecting every point below.
1. Start from the live search results below and confirm each property's current availability and rates.
2. Categorize candidates by type (hotel, resort, pension, guesthouse, rental).
3. Evaluate location: transit access, distance to main sights, neighborhood safety.
4. Analyze value for money against the budget, including taxes and service fees.
5. Compare amenities, room types suitable for the group, and cancellation policies.
6. Summarize recent reviews and flag any recurring complaints.

## Output table
| Name | Type | Location | Price per night | Total price | Room type | Amenities | Review summary | Booking link |

{sources}

[Live lodging search results]
{search_results}
"#,
        destination = trip.destination,
        period = trip.period(),
        people = trip.people_text(),
        budget = budget(trip),
        purpose = trip.purpose,
        sources = SOURCES_SECTION,
    )
}

pub fn itinerary_prompt(trip: &TripRequest) -> String {
    format!(
        r#"Destination: {destination}
Travel period: {period}
Travelers: {people}
Budget: {budget}
Purpose / notes: {purpose}

Plan the trip one day at a time, reflecting every point below.
1. Recognize what the trip purpose implies (family, couple, food tour, activities) and pick sights accordingly.
2. Group sights by area so each day minimizes backtracking.
3. Give the time needed for each stop and the travel time between stops.
4. Estimate entry fees and daily spend against the budget.
5. Note opening hours, reservations and indoor fallbacks for bad weather.
6. Add practical tips and safety notes for each day.

## Output table
| Day | Time | Place / activity | Time needed | Why it is recommended | Estimated cost | Tips |

{sources}
"#,
        destination = trip.destination,
        period = trip.period(),
        people = trip.people_text(),
        budget = budget(trip),
        purpose = trip.purpose,
        sources = SOURCES_SECTION,
    )
}

pub fn food_prompt(trip: &TripRequest, search_results: &str) -> String {
    format!(
        r#"Destination: {destination}
Travel period: {period}
Travelers: {people}
Budget: {budget}
Purpose / notes: {purpose}

Recommend restaurants for breakfast, lunch and dinner, reflecting every point below.
1. Start from the live search results below and keep only places that are currently operating.
2. Identify the regional specialties and signature dishes of the destination.
3. Categorize restaurants by price range and atmosphere; separate local favorites from tourist spots.
4. Give reservation needs, opening hours, waiting times and access by transit or car.
5. Note options for dietary restrictions and for children or older travelers.
6. Cross-check ratings and recent reviews before recommending.

## Output table
| Meal | Restaurant | Location | Price range | Signature dishes | Rating | Reservation | Link |

{sources}

[Live restaurant search results]
{search_results}
"#,
        destination = trip.destination,
        period = trip.period(),
        people = trip.people_text(),
        budget = budget(trip),
        purpose = trip.purpose,
        sources = SOURCES_SECTION,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{NO_DESTINATION, SEARCH_UNAVAILABLE};

    fn busan() -> TripRequest {
        TripRequest::new("Busan", "2024-01-15", "2024-01-17")
            .with_departure("Seoul")
            .with_people(2)
            .with_budget(50)
            .with_purpose("family trip")
    }

    #[test]
    fn test_every_prompt_has_summary_table_and_sources() {
        let trip = busan();
        for domain in Domain::ALL {
            let prompt = build_prompt(domain, &trip, Some("digest"));
            assert!(prompt.starts_with(match domain {
                Domain::Transport => "Departure: Seoul\nDestination: Busan",
                _ => "Destination: Busan",
            }));
            assert!(prompt.contains("2024-01-15 ~ 2024-01-17"), "{domain}");
            assert!(prompt.contains("Travelers: 2"), "{domain}");
            assert!(prompt.contains("1. "), "{domain}");
            assert!(prompt.contains("## Output table\n| "), "{domain}");
            assert!(prompt.contains("## Sources"), "{domain}");
        }
    }

    #[test]
    fn test_digest_is_embedded() {
        let trip = busan();
        let prompt = build_prompt(Domain::Hotel, &trip, Some("1. Park Hyatt Busan - Sea view"));
        assert!(prompt.ends_with("[Live lodging search results]\n1. Park Hyatt Busan - Sea view\n"));
        assert!(prompt.contains("Budget: 50 (x10,000 KRW)"));
    }

    #[test]
    fn test_sentinel_renders_same_template() {
        let trip = busan();
        let rich = build_prompt(Domain::Food, &trip, Some("1. Jagalchi Market"));
        let degraded = build_prompt(Domain::Food, &trip, Some(SEARCH_UNAVAILABLE));

        assert_eq!(
            rich.replace("1. Jagalchi Market", SEARCH_UNAVAILABLE),
            degraded
        );
    }

    #[test]
    fn test_empty_trip_still_builds() {
        let trip = TripRequest::default();
        for domain in Domain::ALL {
            let prompt = build_prompt(domain, &trip, Some(NO_DESTINATION));
            assert!(prompt.contains("## Sources"));
        }
        assert!(build_prompt(Domain::Itinerary, &trip, None).contains("Budget:  (x10,000 KRW)"));
    }
}
