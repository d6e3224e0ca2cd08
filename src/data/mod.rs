//! Static reference data loaded once per process and never mutated.

use crate::models::{Coordinates, Hostel, University};
use once_cell::sync::Lazy;

static HOSTELS: Lazy<Vec<Hostel>> = Lazy::new(build_hostels);
static UNIVERSITIES: Lazy<Vec<University>> = Lazy::new(build_universities);

/// Every hostel in the directory
pub fn hostels() -> &'static [Hostel] {
    &HOSTELS
}

/// Every university usable as a proximity anchor
pub fn universities() -> &'static [University] {
    &UNIVERSITIES
}

pub fn hostel_by_id(id: u32) -> Option<&'static Hostel> {
    HOSTELS.iter().find(|h| h.id == id)
}

pub fn university_by_id(id: u32) -> Option<&'static University> {
    UNIVERSITIES.iter().find(|u| u.id == id)
}

/// Distinct city names taken from the hostel locations, sorted
pub fn all_cities() -> Vec<String> {
    cities_of(&HOSTELS)
}

pub fn cities_of(hostels: &[Hostel]) -> Vec<String> {
    let mut cities: Vec<String> = hostels.iter().map(|h| h.city().to_string()).collect();
    cities.sort();
    cities.dedup();
    cities
}

fn hostel(
    id: u32,
    name: &str,
    image: &str,
    rating: f32,
    price: u32,
    location: &str,
    distance: &str,
    amenities: &[&str],
) -> Hostel {
    Hostel {
        id,
        name: name.to_string(),
        image: image.to_string(),
        rating,
        price,
        location: location.to_string(),
        distance: distance.to_string(),
        amenities: amenities.iter().map(|a| a.to_string()).collect(),
    }
}

fn build_hostels() -> Vec<Hostel> {
    const ALL: &[&str] = &["WiFi", "Breakfast", "Social"];

    vec![
        hostel(1, "Backpacker's Paradise", "https://images.unsplash.com/photo-1582719508461-905c673771fd?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8Mnx8aG9zdGVsfGVufDB8fDB8fHww&auto=format&fit=crop&w=800&q=60", 4.7, 25, "Delhi, India", "0.5 km", ALL),
        hostel(2, "Nomad's Home", "https://images.unsplash.com/photo-1520277739336-7bf67edfa768?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8M3x8aG9zdGVsfGVufDB8fDB8fHww&auto=format&fit=crop&w=800&q=60", 4.5, 22, "Mumbai, India", "0.7 km", &["WiFi", "Social"]),
        hostel(3, "Travelers Hub", "https://images.unsplash.com/photo-1555854877-bab0e564b8d5?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8NXx8aG9zdGVsfGVufDB8fDB8fHww&auto=format&fit=crop&w=800&q=60", 4.2, 18, "Bangalore, India", "1.2 km", &["WiFi", "Breakfast"]),
        hostel(4, "Wanderer's Rest", "https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8Nnx8aG9zdGVsfGVufDB8fDB8fHww&auto=format&fit=crop&w=800&q=60", 4.8, 28, "Jaipur, India", "0.3 km", ALL),
        hostel(5, "Globe Trotter Inn", "https://images.unsplash.com/photo-1596436889106-be35e843f974?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8OXx8aG9zdGVsfGVufDB8fDB8fHww&auto=format&fit=crop&w=800&q=60", 4.3, 20, "Kolkata, India", "0.9 km", &["WiFi", "Social"]),
        hostel(6, "Wayfarer's Haven", "https://images.unsplash.com/photo-1590856029826-c7a73142bbf1?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8MTN8fGhvc3RlbHxlbnwwfHwwfHx8MA%3D%3D&auto=format&fit=crop&w=800&q=60", 4.6, 23, "Chennai, India", "0.6 km", ALL),
        hostel(7, "Urban Oasis Hostel", "https://images.unsplash.com/photo-1562884857-bfc31164gravity?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8MjB8fGhvc3RlbHxlbnwwfHwwfHx8MA%3D%3D&auto=format&fit=crop&w=800&q=60", 4.4, 21, "Hyderabad, India", "1.1 km", &["WiFi", "Breakfast"]),
        hostel(8, "Riverside Retreat", "https://images.unsplash.com/photo-1605610562040-e87b1ee67539?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8MTZ8fGhvc3RlbHxlbnwwfHwwfHx8MA%3D%3D&auto=format&fit=crop&w=800&q=60", 4.9, 30, "Varanasi, India", "0.4 km", ALL),
        hostel(9, "Beachside Bungalow", "https://images.unsplash.com/photo-1587018681535-91a74f790e2c?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8MTl8fGhvc3RlbHxlbnwwfHwwfHx8MA%3D%3D&auto=format&fit=crop&w=800&q=60", 4.7, 27, "Goa, India", "0.2 km", &["WiFi", "Social"]),
        hostel(10, "Mountain View Lodge", "https://images.unsplash.com/photo-1551918120-9739cb430c6d?ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxzZWFyY2h8MTR8fGhvc3RlbHxlbnwwfHwwfHx8MA%3D%3D&auto=format&fit=crop&w=800&q=60", 4.8, 26, "Shimla, India", "0.8 km", ALL),
    ]
}

fn university(id: u32, name: &str, location: &str, lat: f64, lng: f64) -> University {
    University {
        id,
        name: name.to_string(),
        location: location.to_string(),
        coordinates: Coordinates::new(lat, lng),
        rank: None,
    }
}

fn build_universities() -> Vec<University> {
    vec![
        university(1, "Indian Institute of Technology (IIT) Delhi", "New Delhi", 28.5456, 77.1926),
        university(2, "Indian Institute of Technology (IIT) Bombay", "Mumbai", 19.1334, 72.9133),
        university(3, "Indian Institute of Technology (IIT) Madras", "Chennai", 12.9914, 80.2336),
        university(4, "Indian Institute of Technology (IIT) Kanpur", "Kanpur", 26.5123, 80.2329),
        university(5, "Indian Institute of Technology (IIT) Kharagpur", "Kharagpur", 22.3149, 87.3110),
        university(6, "Indian Institute of Science (IISc)", "Bangalore", 13.0219, 77.5671),
        university(7, "Jawaharlal Nehru University (JNU)", "New Delhi", 28.5403, 77.1675),
        university(8, "Delhi University (DU)", "Delhi", 28.6889, 77.3178),
        university(9, "Banaras Hindu University (BHU)", "Varanasi", 25.2677, 82.9913),
        university(10, "Anna University", "Chennai", 13.0108, 80.2339),
        university(11, "University of Hyderabad", "Hyderabad", 17.4617, 78.3340),
        university(12, "Jadavpur University", "Kolkata", 22.4968, 88.3714),
        university(13, "National Institute of Technology (NIT) Tiruchirappalli", "Tiruchirappalli", 10.7587, 78.8173),
        university(14, "Manipal Academy of Higher Education", "Manipal", 13.3524, 74.7937),
        university(15, "Indian Institute of Management (IIM) Ahmedabad", "Ahmedabad", 23.0313, 72.5263),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn hostel_ids_are_unique() {
        let ids: HashSet<u32> = hostels().iter().map(|h| h.id).collect();
        assert_eq!(ids.len(), hostels().len());
    }

    #[test]
    fn image_urls_keep_their_query_parameters() {
        for h in hostels() {
            assert!(h.image.starts_with("https://images.unsplash.com/photo-"), "{}", h.name);
            assert!(h.image.contains("?ixlib=rb-4.0.3&ixid="), "{}", h.name);
        }
        let urban_oasis = hostel_by_id(7).unwrap();
        assert!(urban_oasis.image.contains("photo-1562884857-bfc31164gravity?"));
    }

    #[test]
    fn university_ids_are_unique() {
        let ids: HashSet<u32> = universities().iter().map(|u| u.id).collect();
        assert_eq!(ids.len(), universities().len());
    }

    #[test]
    fn ratings_and_prices_are_in_range() {
        for h in hostels() {
            assert!((0.0..=5.0).contains(&h.rating), "{} rating {}", h.name, h.rating);
            assert!(h.price > 0, "{} has no price", h.name);
        }
    }

    #[test]
    fn university_coordinates_are_valid() {
        for u in universities() {
            assert!(u.coordinates.is_valid(), "{} has bad coordinates", u.name);
        }
    }

    #[test]
    fn lookup_by_id() {
        assert_eq!(hostel_by_id(4).map(|h| h.name.as_str()), Some("Wanderer's Rest"));
        assert!(hostel_by_id(999).is_none());
        assert!(university_by_id(1).is_some());
        assert!(university_by_id(0).is_none());
    }

    #[test]
    fn cities_are_sorted_and_distinct() {
        let cities = all_cities();
        assert_eq!(cities.len(), 10);
        assert_eq!(cities.first().map(String::as_str), Some("Bangalore"));
        assert_eq!(cities.last().map(String::as_str), Some("Varanasi"));
    }
}
