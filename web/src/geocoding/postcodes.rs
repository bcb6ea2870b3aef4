//! Free UK postcode lookup (postcodes.io). Used when the query is shaped
//! like a UK postcode instead of a place name.

use serde::Deserialize;
use shared_types::{LatLong, LocationResult};

use super::GeocodingError;

#[derive(Debug, Deserialize)]
struct PostcodeEnvelope {
    status: u16,
    result: Option<PostcodeResult>,
}

#[derive(Debug, Deserialize)]
struct PostcodeResult {
    postcode: String,
    latitude: f64,
    longitude: f64,
    admin_district: Option<String>,
    region: Option<String>,
}

/// Outward-inward shape with a digit in the outward part, e.g. "M1 1AA",
/// "SW1A 2AA", "m11aa". Deliberately loose; the lookup service is the
/// authority on validity.
pub fn looks_like_uk_postcode(query: &str) -> bool {
    let compact: String = query.chars().filter(|c| !c.is_whitespace()).collect();
    if !(5..=8).contains(&compact.len()) || !compact.chars().all(|c| c.is_ascii_alphanumeric()) {
        return false;
    }
    let starts_alpha = compact.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let has_digit = compact.chars().any(|c| c.is_ascii_digit());
    let inward_ok = {
        let inward = &compact[compact.len() - 3..];
        inward.chars().next().is_some_and(|c| c.is_ascii_digit())
            && inward.chars().skip(1).all(|c| c.is_ascii_alphabetic())
    };
    starts_alpha && has_digit && inward_ok
}

pub fn parse_postcode_payload(payload: &str) -> Result<Option<LocationResult>, GeocodingError> {
    let envelope: PostcodeEnvelope =
        serde_json::from_str(payload).map_err(|e| GeocodingError::Payload(e.to_string()))?;

    if envelope.status != 200 {
        return Ok(None);
    }
    let Some(result) = envelope.result else {
        return Ok(None);
    };

    let city = result.admin_district;
    let address = match &city {
        Some(city) => format!("{}, {}", result.postcode, city),
        None => result.postcode.clone(),
    };

    Ok(Some(LocationResult {
        name: result.postcode.clone(),
        coords: LatLong { lat: result.latitude, long: result.longitude },
        address,
        postcode: Some(result.postcode),
        city,
        region: result.region,
    }))
}

#[cfg(feature = "ssr")]
pub async fn lookup(postcode: &str) -> Result<Option<LocationResult>, GeocodingError> {
    let url = format!(
        "https://api.postcodes.io/postcodes/{}",
        urlencoding::encode(postcode.trim())
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    let response = client.get(&url).send().await?;
    if response.status().as_u16() == 404 {
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(GeocodingError::Status(response.status().as_u16()));
    }

    let body = response.text().await?;
    parse_postcode_payload(&body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postcode_shapes() {
        assert!(looks_like_uk_postcode("M1 1AA"));
        assert!(looks_like_uk_postcode("SW1A2AA"));
        assert!(looks_like_uk_postcode("m1 1aa"));
        assert!(!looks_like_uk_postcode("Manchester"));
        assert!(!looks_like_uk_postcode("12345"));
        assert!(!looks_like_uk_postcode("M1"));
    }

    #[test]
    fn parses_a_hit() {
        let payload = r#"{
            "status": 200,
            "result": {
                "postcode": "M1 1AA",
                "latitude": 53.476,
                "longitude": -2.234,
                "admin_district": "Manchester",
                "region": "North West"
            }
        }"#;
        let result = parse_postcode_payload(payload).unwrap().unwrap();
        assert_eq!(result.postcode.as_deref(), Some("M1 1AA"));
        assert_eq!(result.city.as_deref(), Some("Manchester"));
        assert_eq!(result.address, "M1 1AA, Manchester");
        assert!(result.coords.is_valid());
    }

    #[test]
    fn non_200_status_is_a_miss_not_an_error() {
        let payload = r#"{"status": 404, "error": "Postcode not found"}"#;
        assert!(parse_postcode_payload(payload).unwrap().is_none());
    }
}
