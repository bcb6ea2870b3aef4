use serde::{Deserialize, Serialize};

use crate::geo::distance_km;
use crate::{LocationResult, VenueSummary};

/// Client-side search state for the directory and map screens.
///
/// `distance_km` is only meaningful while `location` is set; the UI hides
/// the radius control otherwise.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SearchFilters {
    pub query: String,
    pub location: Option<LocationResult>,
    pub distance_km: f64,
    pub business_types: Vec<String>,
    pub features: Vec<String>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: String::new(),
            location: None,
            distance_km: 10.0,
            business_types: Vec::new(),
            features: Vec::new(),
        }
    }
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        self.query.trim().is_empty()
            && self.location.is_none()
            && self.business_types.is_empty()
            && self.features.is_empty()
    }
}

/// Applies `filters` to the full venue list and returns the subset to
/// display, paired with the distance from the selected location where one
/// is set.
///
/// Venues without coordinates are excluded while distance filtering is
/// active. When a location is selected the result is sorted ascending by
/// distance; otherwise input order is preserved.
pub fn filter_venues_with_distance(
    venues: &[VenueSummary],
    filters: &SearchFilters,
) -> Vec<(VenueSummary, Option<f64>)> {
    let query = filters.query.trim().to_lowercase();

    let mut matched: Vec<(VenueSummary, Option<f64>)> = venues
        .iter()
        .filter(|venue| matches_query(venue, &query))
        .filter(|venue| matches_business_type(venue, &filters.business_types))
        .filter(|venue| matches_features(venue, &filters.features))
        .filter_map(|venue| match &filters.location {
            Some(location) => {
                let coords = venue.coords().filter(|c| c.is_valid())?;
                let d = distance_km(&location.coords, &coords);
                (d <= filters.distance_km).then(|| (venue.clone(), Some(d)))
            }
            None => Some((venue.clone(), None)),
        })
        .collect();

    if filters.location.is_some() {
        matched.sort_by(|(_, a), (_, b)| {
            a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    matched
}

pub fn filter_venues(venues: &[VenueSummary], filters: &SearchFilters) -> Vec<VenueSummary> {
    filter_venues_with_distance(venues, filters)
        .into_iter()
        .map(|(venue, _)| venue)
        .collect()
}

fn matches_query(venue: &VenueSummary, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    venue.name.to_lowercase().contains(query) || venue.address.to_lowercase().contains(query)
}

fn matches_business_type(venue: &VenueSummary, business_types: &[String]) -> bool {
    business_types.is_empty() || business_types.iter().any(|t| *t == venue.business_type)
}

// Any-match: a venue passes when it offers at least one selected feature.
fn matches_features(venue: &VenueSummary, features: &[String]) -> bool {
    features.is_empty() || features.iter().any(|f| venue.features.contains(f))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LatLong;

    fn venue(id: i64, name: &str, business_type: &str, coords: Option<(f64, f64)>) -> VenueSummary {
        VenueSummary {
            id,
            slug: name.to_lowercase().replace(' ', "-"),
            name: name.to_string(),
            description: String::new(),
            business_type: business_type.to_string(),
            features: Vec::new(),
            address: format!("{name} Street, London"),
            city: "London".to_string(),
            postcode: "E1 6AN".to_string(),
            lat: coords.map(|(lat, _)| lat),
            long: coords.map(|(_, long)| long),
            website: None,
            phone: None,
            logo_url: None,
            average_rating: None,
            review_count: 0,
        }
    }

    fn london_location() -> LocationResult {
        LocationResult {
            name: "London".to_string(),
            coords: LatLong { lat: 51.5074, long: -0.1278 },
            address: "London, UK".to_string(),
            postcode: None,
            city: Some("London".to_string()),
            region: None,
        }
    }

    fn sample_venues() -> Vec<VenueSummary> {
        vec![
            venue(1, "The Anchor", "pub", Some((51.51, -0.12))),
            venue(2, "Rainbow Cafe", "restaurant", Some((51.52, -0.10))),
            venue(3, "Northern Star", "pub", Some((53.48, -2.24))),
            venue(4, "Ungeocoded Arms", "pub", None),
        ]
    }

    #[test]
    fn empty_filters_return_everything_in_order() {
        let venues = sample_venues();
        let result = filter_venues(&venues, &SearchFilters::default());
        assert_eq!(
            result.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![1, 2, 3, 4]
        );
    }

    #[test]
    fn query_matches_name_and_address_case_insensitively() {
        let venues = sample_venues();
        let filters = SearchFilters { query: "rainbow".to_string(), ..Default::default() };
        assert_eq!(filter_venues(&venues, &filters).len(), 1);

        let filters = SearchFilters { query: "STAR STREET".to_string(), ..Default::default() };
        assert_eq!(filter_venues(&venues, &filters)[0].id, 3);
    }

    #[test]
    fn empty_type_set_means_no_type_filter() {
        let venues = sample_venues();
        let filters = SearchFilters {
            business_types: vec!["pub".to_string()],
            ..Default::default()
        };
        assert_eq!(filter_venues(&venues, &filters).len(), 3);
        assert_eq!(filter_venues(&venues, &SearchFilters::default()).len(), 4);
    }

    #[test]
    fn feature_filter_is_any_match() {
        let mut venues = sample_venues();
        venues[0].features = vec!["step_free_access".to_string()];
        venues[1].features = vec!["gender_neutral_toilets".to_string(), "quiet_space".to_string()];

        let filters = SearchFilters {
            features: vec!["quiet_space".to_string(), "step_free_access".to_string()],
            ..Default::default()
        };
        let result = filter_venues(&venues, &filters);
        assert_eq!(result.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn distance_filter_excludes_far_and_ungeocoded_venues() {
        let venues = sample_venues();
        let filters = SearchFilters {
            location: Some(london_location()),
            distance_km: 25.0,
            ..Default::default()
        };
        let result = filter_venues_with_distance(&venues, &filters);
        // Manchester venue is ~260 km out; venue 4 has no coordinates.
        assert_eq!(result.len(), 2);
        for (_, d) in &result {
            assert!(d.unwrap() <= 25.0);
        }
    }

    #[test]
    fn distance_filter_sorts_ascending() {
        let venues = sample_venues();
        let filters = SearchFilters {
            location: Some(london_location()),
            distance_km: 500.0,
            ..Default::default()
        };
        let result = filter_venues_with_distance(&venues, &filters);
        let distances: Vec<f64> = result.iter().map(|(_, d)| d.unwrap()).collect();
        let mut sorted = distances.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(distances, sorted);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn filtering_is_idempotent() {
        let venues = sample_venues();
        let filters = SearchFilters {
            query: "the".to_string(),
            location: Some(london_location()),
            distance_km: 300.0,
            ..Default::default()
        };
        let once = filter_venues(&venues, &filters);
        let twice = filter_venues(&once, &filters);
        assert_eq!(once, twice);
    }

    #[test]
    fn narrowing_distance_never_grows_the_result() {
        let venues = sample_venues();
        let mut previous = usize::MAX;
        for radius in [500.0, 100.0, 25.0, 5.0, 0.5] {
            let filters = SearchFilters {
                location: Some(london_location()),
                distance_km: radius,
                ..Default::default()
            };
            let count = filter_venues(&venues, &filters).len();
            assert!(count <= previous);
            previous = count;
        }
    }
}
