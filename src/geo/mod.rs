use crate::models::{city_of, Coordinates};
use rand::Rng;
use tracing::debug;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Maximum offset, in degrees per axis, applied to a city's base coordinate.
/// About 1.1 km, enough to separate markers while a hostel stays within a
/// 10 km radius of a university that sits within 7.8 km of the city centre.
pub const JITTER_DEGREES: f64 = 0.01;

/// Base coordinates for the cities the directory can place without a geocoder
const CITY_COORDINATES: &[(&str, f64, f64)] = &[
    ("Delhi", 28.6139, 77.2090),
    ("Mumbai", 19.0760, 72.8777),
    ("Bangalore", 12.9716, 77.5946),
    ("Chennai", 13.0827, 80.2707),
    ("Kolkata", 22.5726, 88.3639),
    ("Hyderabad", 17.3850, 78.4867),
    ("Jaipur", 26.9124, 75.7873),
    ("Varanasi", 25.3176, 82.9739),
    ("Goa", 15.2993, 74.1240),
    ("Shimla", 31.1048, 77.1734),
];

/// Great-circle distance in kilometers using the Haversine formula
pub fn haversine_distance(a: Coordinates, b: Coordinates) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lng = (b.lng - a.lng).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_KM * c
}

/// Base coordinate of a known city (case-insensitive)
pub fn city_coordinates(city: &str) -> Option<Coordinates> {
    let city = city.trim();
    CITY_COORDINATES
        .iter()
        .find(|(name, _, _)| name.eq_ignore_ascii_case(city))
        .map(|&(_, lat, lng)| Coordinates::new(lat, lng))
}

/// Reads a literal "lat,lng" location
pub fn parse_lat_lng(location: &str) -> Option<Coordinates> {
    let (lat, lng) = location.split_once(',')?;
    let lat = lat.trim().parse::<f64>().ok()?;
    let lng = lng.trim().parse::<f64>().ok()?;

    if lat.is_finite() && lng.is_finite() {
        Some(Coordinates::new(lat, lng))
    } else {
        None
    }
}

/// Best-effort position for a hostel location.
///
/// Literal "lat,lng" strings are returned as-is. Otherwise the city before
/// the first comma is looked up and jittered with `rng` so co-located
/// hostels do not share a marker. Unknown cities resolve to `None`.
pub fn resolve_coordinates<R: Rng>(location: &str, rng: &mut R) -> Option<Coordinates> {
    if let Some(coordinates) = parse_lat_lng(location) {
        return Some(coordinates);
    }

    let city = city_of(location);
    let Some(base) = city_coordinates(city) else {
        debug!("No coordinates known for city '{}'", city.trim());
        return None;
    };

    Some(Coordinates::new(
        base.lat + rng.gen_range(-JITTER_DEGREES..JITTER_DEGREES),
        base.lng + rng.gen_range(-JITTER_DEGREES..JITTER_DEGREES),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const DELHI: Coordinates = Coordinates { lat: 28.6139, lng: 77.2090 };
    const MUMBAI: Coordinates = Coordinates { lat: 19.0760, lng: 72.8777 };

    #[test]
    fn test_haversine_delhi_mumbai() {
        let distance = haversine_distance(DELHI, MUMBAI);
        // Should be approximately 1161-1165 km
        assert!(distance > 1161.0 && distance < 1165.0, "got {}", distance);
    }

    #[test]
    fn distance_to_self_is_zero() {
        for point in [DELHI, MUMBAI, Coordinates::new(-90.0, 180.0), Coordinates::new(0.0, 0.0)] {
            assert_eq!(haversine_distance(point, point), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (DELHI, MUMBAI),
            (Coordinates::new(-33.86, 151.2), Coordinates::new(51.5, -0.12)),
            (Coordinates::new(89.9, -179.9), Coordinates::new(-89.9, 179.9)),
        ];

        for (a, b) in pairs {
            let there = haversine_distance(a, b);
            let back = haversine_distance(b, a);
            assert!((there - back).abs() < 1e-9, "{} vs {}", there, back);
            assert!(there >= 0.0);
        }
    }

    #[test]
    fn literal_pairs_are_returned_unchanged() {
        let mut rng = StdRng::seed_from_u64(1);
        let resolved = resolve_coordinates("28.545600,77.192600", &mut rng);
        assert_eq!(resolved, Some(Coordinates::new(28.5456, 77.1926)));
    }

    #[test]
    fn known_city_is_jittered_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let point = resolve_coordinates("Delhi, India", &mut rng).unwrap();
            assert!((point.lat - DELHI.lat).abs() <= JITTER_DEGREES);
            assert!((point.lng - DELHI.lng).abs() <= JITTER_DEGREES);
        }
    }

    #[test]
    fn seeded_jitter_is_reproducible() {
        let first = resolve_coordinates("Goa, India", &mut StdRng::seed_from_u64(42));
        let second = resolve_coordinates("Goa, India", &mut StdRng::seed_from_u64(42));
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_city_does_not_resolve() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(resolve_coordinates("Atlantis, Ocean", &mut rng), None);
        assert_eq!(resolve_coordinates("", &mut rng), None);
    }

    #[test]
    fn bare_city_without_country_resolves() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(resolve_coordinates("shimla", &mut rng).is_some());
    }
}
