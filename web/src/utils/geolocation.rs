use shared_types::{LatLong, LocationResult};

/// W3C geolocation error codes.
pub const PERMISSION_DENIED: u16 = 1;
pub const POSITION_UNAVAILABLE: u16 = 2;
pub const TIMEOUT: u16 = 3;

/// Maps a geolocation failure onto the message shown to the user. Anything
/// outside the three defined codes is reported as unknown.
pub fn geolocation_error_message(code: u16) -> &'static str {
    match code {
        PERMISSION_DENIED => "Location access was denied. You can still search by place name.",
        POSITION_UNAVAILABLE => "Your position could not be determined. Try searching instead.",
        TIMEOUT => "Finding your location took too long. Try again or search by place name.",
        _ => "Something went wrong finding your location.",
    }
}

/// Builds the selection produced by the "use my location" button. There is
/// no reverse geocode, so the coordinates stand in for an address.
pub fn current_location_result(lat: f64, long: f64) -> LocationResult {
    LocationResult {
        name: "Your Current Location".to_string(),
        coords: LatLong { lat, long },
        address: format!("{lat:.4}, {long:.4}"),
        postcode: None,
        city: None,
        region: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_location_shows_its_coordinates() {
        let location = current_location_result(51.5074, -0.1278);
        assert_eq!(location.name, "Your Current Location");
        assert_eq!(location.address, "51.5074, -0.1278");
        assert_eq!(location.coords.lat, 51.5074);
        assert_eq!(location.coords.long, -0.1278);
        assert!(location.postcode.is_none());
        assert!(location.city.is_none());
    }

    #[test]
    fn each_code_gets_a_distinct_message() {
        let messages = [
            geolocation_error_message(PERMISSION_DENIED),
            geolocation_error_message(POSITION_UNAVAILABLE),
            geolocation_error_message(TIMEOUT),
            geolocation_error_message(99),
        ];
        for (i, a) in messages.iter().enumerate() {
            for b in &messages[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
