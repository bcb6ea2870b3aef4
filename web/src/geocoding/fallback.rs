use shared_types::{LatLong, LocationResult};

/// The degraded-mode city list. Searched by case-insensitive substring
/// match against name or address when the live geocoder is unreachable.
const FALLBACK_CITIES: &[(&str, &str, f64, f64)] = &[
    ("London", "London, England", 51.5074, -0.1278),
    ("Manchester", "Manchester, England", 53.4808, -2.2426),
    ("Birmingham", "Birmingham, England", 52.4862, -1.8904),
    ("Brighton", "Brighton, England", 50.8225, -0.1372),
    ("Bristol", "Bristol, England", 51.4545, -2.5879),
    ("Leeds", "Leeds, England", 53.8008, -1.5491),
    ("Glasgow", "Glasgow, Scotland", 55.8642, -4.2518),
    ("Cardiff", "Cardiff, Wales", 51.4816, -3.1791),
];

pub fn search_fallback_cities(query: &str) -> Vec<LocationResult> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    FALLBACK_CITIES
        .iter()
        .filter(|(name, address, _, _)| {
            name.to_lowercase().contains(&needle) || address.to_lowercase().contains(&needle)
        })
        .map(|(name, address, lat, long)| LocationResult {
            name: name.to_string(),
            coords: LatLong { lat: *lat, long: *long },
            address: address.to_string(),
            postcode: None,
            city: Some(name.to_string()),
            region: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::search_fallback_cities;

    #[test]
    fn substring_match_is_case_insensitive() {
        let results = search_fallback_cities("MANCH");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Manchester");
    }

    #[test]
    fn address_matches_too() {
        // "Scotland" only appears in the address field.
        let results = search_fallback_cities("scotland");
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "Glasgow");
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(search_fallback_cities("paris").is_empty());
        assert!(search_fallback_cities("   ").is_empty());
    }

    #[test]
    fn coordinates_are_plausible() {
        for city in search_fallback_cities("l") {
            assert!(city.coords.is_valid());
        }
    }
}
