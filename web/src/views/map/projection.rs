//! Shared projection and marker styling for both map backends. The tile
//! and SVG renderers draw the same venues the same colors; only the canvas
//! differs.

use shared_types::{LatLong, VenueSummary};

// Bounding box covering Great Britain, with a little margin.
const LAT_MIN: f64 = 49.9;
const LAT_MAX: f64 = 58.7;
const LONG_MIN: f64 = -8.2;
const LONG_MAX: f64 = 1.8;

// Markers never sit flush against the edge of the SVG canvas.
const EDGE_MARGIN_PCT: f64 = 5.0;

/// Projects a coordinate onto the SVG canvas as (x%, y%) percentages.
/// Latitude grows northward but the canvas grows downward, so y is
/// inverted. Non-finite coordinates yield None.
pub fn project(coords: &LatLong) -> Option<(f64, f64)> {
    if !coords.is_valid() {
        return None;
    }

    let x = (coords.long - LONG_MIN) / (LONG_MAX - LONG_MIN) * 100.0;
    let y = (LAT_MAX - coords.lat) / (LAT_MAX - LAT_MIN) * 100.0;

    Some((
        x.clamp(EDGE_MARGIN_PCT, 100.0 - EDGE_MARGIN_PCT),
        y.clamp(EDGE_MARGIN_PCT, 100.0 - EDGE_MARGIN_PCT),
    ))
}

/// Marker fill color by venue type, shared by both renderers.
pub fn venue_type_color(business_type: &str) -> &'static str {
    match business_type {
        "pub" | "bar" => "#5b21b6",
        "cafe" | "restaurant" => "#f97316",
        "shop" => "#0e7490",
        "community_space" => "#15803d",
        "health" => "#be185d",
        _ => "#6b7280",
    }
}

/// Venues that can be drawn at all: published entries with finite
/// coordinates. Returns each venue with its projected canvas position.
pub fn projectable_venues(venues: &[VenueSummary]) -> Vec<(VenueSummary, (f64, f64))> {
    venues
        .iter()
        .filter_map(|venue| {
            let coords = venue.coords()?;
            let point = project(&coords)?;
            Some((venue.clone(), point))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn london_lands_inside_the_canvas() {
        let (x, y) = project(&LatLong { lat: 51.5074, long: -0.1278 }).unwrap();
        assert!((5.0..=95.0).contains(&x));
        assert!((5.0..=95.0).contains(&y));
    }

    #[test]
    fn north_is_up() {
        let (_, london_y) = project(&LatLong { lat: 51.5074, long: -0.1278 }).unwrap();
        let (_, glasgow_y) = project(&LatLong { lat: 55.8642, long: -4.2518 }).unwrap();
        assert!(glasgow_y < london_y);
    }

    #[test]
    fn east_is_right() {
        let (cardiff_x, _) = project(&LatLong { lat: 51.4816, long: -3.1791 }).unwrap();
        let (london_x, _) = project(&LatLong { lat: 51.5074, long: -0.1278 }).unwrap();
        assert!(cardiff_x < london_x);
    }

    #[test]
    fn out_of_box_coordinates_clamp_to_the_margin() {
        let (x, y) = project(&LatLong { lat: 40.0, long: 20.0 }).unwrap();
        assert_eq!(x, 95.0);
        assert_eq!(y, 95.0);
    }

    #[test]
    fn non_finite_coordinates_yield_none() {
        assert!(project(&LatLong { lat: f64::NAN, long: 0.0 }).is_none());
        assert!(project(&LatLong { lat: 51.0, long: f64::INFINITY }).is_none());
    }

    #[test]
    fn unknown_types_get_the_neutral_color() {
        assert_eq!(venue_type_color("hotel"), "#6b7280");
        assert_ne!(venue_type_color("pub"), venue_type_color("cafe"));
    }

    #[test]
    fn venues_without_coordinates_are_skipped() {
        let venue = VenueSummary {
            id: 1,
            slug: "the-anchor".to_string(),
            name: "The Anchor".to_string(),
            description: String::new(),
            business_type: "pub".to_string(),
            features: Vec::new(),
            address: "1 Anchor St".to_string(),
            city: "London".to_string(),
            postcode: "E1 6AN".to_string(),
            lat: Some(51.51),
            long: Some(-0.12),
            website: None,
            phone: None,
            logo_url: None,
            average_rating: None,
            review_count: 0,
        };
        let mut unmapped = venue.clone();
        unmapped.id = 2;
        unmapped.lat = None;
        let mut broken = venue.clone();
        broken.id = 3;
        broken.lat = Some(f64::NAN);

        let drawn = projectable_venues(&[venue, unmapped, broken]);
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].0.id, 1);
    }
}
