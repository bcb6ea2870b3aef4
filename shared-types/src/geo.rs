use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct LatLong {
    pub lat: f64,
    pub long: f64,
}

impl LatLong {
    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat, long }
    }

    /// Finite and inside geographic range. `distance_km` itself does not
    /// validate, so callers that cannot tolerate NaN guard with this.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.long.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.long)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct MapBounds {
    pub north_east: LatLong,
    pub south_west: LatLong,
}

impl MapBounds {
    pub fn contains(&self, point: &LatLong) -> bool {
        point.lat <= self.north_east.lat
            && point.lat >= self.south_west.lat
            && point.long <= self.north_east.long
            && point.long >= self.south_west.long
    }
}

impl Default for MapBounds {
    fn default() -> Self {
        Self {
            north_east: LatLong { lat: 0.0, long: 0.0 },
            south_west: LatLong { lat: 0.0, long: 0.0 },
        }
    }
}

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in kilometers, by the
/// Haversine formula. Pure and unvalidated: NaN in, NaN out.
pub fn distance_km(a: &LatLong, b: &LatLong) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_long = (b.long - a.long).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_long / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON: LatLong = LatLong { lat: 51.5074, long: -0.1278 };
    const MANCHESTER: LatLong = LatLong { lat: 53.4808, long: -2.2426 };
    const BRISTOL: LatLong = LatLong { lat: 51.4545, long: -2.5879 };

    #[test]
    fn identical_coordinates_yield_zero() {
        assert!(distance_km(&LONDON, &LONDON).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let there = distance_km(&LONDON, &MANCHESTER);
        let back = distance_km(&MANCHESTER, &LONDON);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn london_to_manchester_is_roughly_right() {
        let d = distance_km(&LONDON, &MANCHESTER);
        // Straight-line distance is about 262 km.
        assert!(d > 250.0 && d < 275.0, "got {d}");
    }

    #[test]
    fn triangle_inequality_holds() {
        let direct = distance_km(&LONDON, &MANCHESTER);
        let via = distance_km(&LONDON, &BRISTOL) + distance_km(&BRISTOL, &MANCHESTER);
        assert!(direct <= via + 1e-6);
    }

    #[test]
    fn nan_propagates_without_panicking() {
        let bad = LatLong { lat: f64::NAN, long: 0.0 };
        assert!(distance_km(&bad, &LONDON).is_nan());
    }

    #[test]
    fn validity_check() {
        assert!(LONDON.is_valid());
        assert!(!LatLong { lat: f64::NAN, long: 0.0 }.is_valid());
        assert!(!LatLong { lat: 91.0, long: 0.0 }.is_valid());
        assert!(!LatLong { lat: 0.0, long: -181.0 }.is_valid());
    }

    #[test]
    fn bounds_contains() {
        let bounds = MapBounds {
            north_east: LatLong { lat: 54.0, long: 0.0 },
            south_west: LatLong { lat: 51.0, long: -3.0 },
        };
        assert!(bounds.contains(&MANCHESTER));
        assert!(!bounds.contains(&LatLong { lat: 56.0, long: -1.0 }));
    }
}
