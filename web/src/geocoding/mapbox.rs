//! Client for the places-geocoding HTTP API. Parsing is kept separate from
//! the fetch so the feature-to-`LocationResult` mapping is testable without
//! the network.

use serde::Deserialize;
use shared_types::{LatLong, LocationResult};

use super::GeocodingError;

#[derive(Debug, Deserialize)]
struct GeocodeFeatureCollection {
    features: Vec<GeocodeFeature>,
}

#[derive(Debug, Deserialize)]
struct GeocodeFeature {
    text: String,
    place_name: String,
    center: Vec<f64>, // [longitude, latitude]
    #[serde(default)]
    context: Vec<ContextEntry>,
}

#[derive(Debug, Deserialize)]
struct ContextEntry {
    id: String,
    text: String,
}

/// Maps the raw feature-collection payload into `LocationResult`s.
/// Postcode, city and region come out of the context list by the id
/// type-prefix convention (`postcode.…`, `place.…`, `region.…`). Features
/// without a usable center are dropped rather than failing the batch.
pub fn parse_feature_collection(payload: &str) -> Result<Vec<LocationResult>, GeocodingError> {
    let collection: GeocodeFeatureCollection =
        serde_json::from_str(payload).map_err(|e| GeocodingError::Payload(e.to_string()))?;

    Ok(collection
        .features
        .into_iter()
        .filter_map(|feature| {
            let (long, lat) = match feature.center.as_slice() {
                [long, lat] => (*long, *lat),
                _ => return None,
            };
            if !lat.is_finite() || !long.is_finite() {
                return None;
            }

            let context_text = |prefix: &str| {
                feature
                    .context
                    .iter()
                    .find(|entry| entry.id.starts_with(prefix))
                    .map(|entry| entry.text.clone())
            };

            Some(LocationResult {
                name: feature.text,
                coords: LatLong { lat, long },
                address: feature.place_name,
                postcode: context_text("postcode."),
                city: context_text("place."),
                region: context_text("region."),
            })
        })
        .collect())
}

#[cfg(feature = "ssr")]
pub async fn geocode(query: &str) -> Result<Vec<LocationResult>, GeocodingError> {
    let token = std::env::var("GEOCODING_API_TOKEN").map_err(|_| GeocodingError::MissingToken)?;

    let url = format!(
        "https://api.mapbox.com/geocoding/v5/mapbox.places/{}.json?access_token={}&limit=5&country=gb",
        urlencoding::encode(query),
        token
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    let response = client.get(&url).send().await?;
    if !response.status().is_success() {
        return Err(GeocodingError::Status(response.status().as_u16()));
    }

    let body = response.text().await?;
    parse_feature_collection(&body)
}

#[cfg(test)]
mod tests {
    use super::parse_feature_collection;

    const SAMPLE: &str = r#"{
        "features": [
            {
                "id": "place.1",
                "text": "Manchester",
                "place_name": "Manchester, Greater Manchester, England, United Kingdom",
                "center": [-2.2426, 53.4808],
                "context": [
                    {"id": "postcode.99", "text": "M1 1AA"},
                    {"id": "place.77", "text": "Manchester"},
                    {"id": "region.55", "text": "England"}
                ]
            },
            {
                "id": "place.2",
                "text": "Broken",
                "place_name": "Broken, Nowhere",
                "center": [],
                "context": []
            }
        ]
    }"#;

    #[test]
    fn maps_features_and_context_by_prefix() {
        let results = parse_feature_collection(SAMPLE).unwrap();
        // The center-less feature is dropped, not an error.
        assert_eq!(results.len(), 1);

        let result = &results[0];
        assert_eq!(result.name, "Manchester");
        assert!((result.coords.lat - 53.4808).abs() < 1e-9);
        assert!((result.coords.long - -2.2426).abs() < 1e-9);
        assert_eq!(result.postcode.as_deref(), Some("M1 1AA"));
        assert_eq!(result.city.as_deref(), Some("Manchester"));
        assert_eq!(result.region.as_deref(), Some("England"));
    }

    #[test]
    fn malformed_payload_is_an_error() {
        assert!(parse_feature_collection("{\"nope\": 1}").is_err());
        assert!(parse_feature_collection("not json").is_err());
    }

    #[test]
    fn empty_collection_is_fine() {
        assert!(parse_feature_collection("{\"features\": []}").unwrap().is_empty());
    }
}
