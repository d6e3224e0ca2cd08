use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both axes are inside the valid decimal-degree ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// Formats the position the way a "use current location" search submits it
    pub fn to_location_query(&self) -> String {
        format!("{:.6},{:.6}", self.lat, self.lng)
    }
}

/// A hostel listing in the directory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hostel {
    pub id: u32,
    pub name: String,
    pub image: String,
    pub rating: f32,
    pub price: u32,
    /// Conventionally "Area, City", or a literal "lat,lng" pair
    pub location: String,
    /// Display text with unit suffix, e.g. "0.5 km"
    pub distance: String,
    pub amenities: Vec<String>,
}

impl Hostel {
    /// The part of the location before the first comma
    pub fn city(&self) -> &str {
        city_of(&self.location)
    }

    pub fn stars(&self) -> StarRating {
        StarRating::from_rating(self.rating)
    }

    /// Amenities with a known icon, in listing order
    pub fn recognized_amenities(&self) -> Vec<Amenity> {
        self.amenities
            .iter()
            .filter_map(|tag| Amenity::recognize(tag))
            .collect()
    }
}

pub(crate) fn city_of(location: &str) -> &str {
    location.split(',').next().unwrap_or(location)
}

/// A university used as a proximity anchor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct University {
    pub id: u32,
    pub name: String,
    pub location: String,
    pub coordinates: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

/// A hostel annotated with its distance to a selected university.
///
/// The wrapped record is a copy; its `distance` text is rewritten to the
/// computed value while the source collection stays untouched. `coordinates`
/// is the resolved position the distance was measured from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NearbyHostel {
    #[serde(flatten)]
    pub hostel: Hostel,
    pub coordinates: Coordinates,
    pub distance_km: f64,
}

impl NearbyHostel {
    pub fn new(hostel: &Hostel, coordinates: Coordinates, distance_km: f64) -> Self {
        let mut hostel = hostel.clone();
        hostel.distance = format_distance(distance_km);
        Self {
            hostel,
            coordinates,
            distance_km,
        }
    }
}

/// One decimal place with a "km" suffix
pub fn format_distance(km: f64) -> String {
    format!("{:.1} km", km)
}

/// Kind of account behind a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum UserType {
    #[default]
    Student,
    HostelProvider,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::HostelProvider => "hostelProvider",
        }
    }
}

impl std::str::FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "hostelprovider" | "hostel-provider" | "hostel_provider" | "provider" => {
                Ok(Self::HostelProvider)
            }
            other => Err(format!("unknown user type: {}", other)),
        }
    }
}

/// The mock authenticated identity held for one session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
}

impl SessionUser {
    pub fn is_provider(&self) -> bool {
        self.user_type == UserType::HostelProvider
    }
}

/// Five-star breakdown of a rating
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StarRating {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl StarRating {
    pub const MAX: f32 = 5.0;

    pub fn from_rating(rating: f32) -> Self {
        let rating = if rating.is_nan() {
            0.0
        } else {
            rating.clamp(0.0, Self::MAX)
        };

        let full = rating.floor() as u8;
        let half = u8::from(rating.fract() != 0.0);
        let empty = 5 - rating.ceil() as u8;

        Self { full, half, empty }
    }

    /// e.g. "★★★★½" padded with "☆"
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(5 * 3);
        out.extend(std::iter::repeat('★').take(self.full as usize));
        out.extend(std::iter::repeat('½').take(self.half as usize));
        out.extend(std::iter::repeat('☆').take(self.empty as usize));
        out
    }
}

/// Amenities that have a dedicated icon
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Amenity {
    Wifi,
    Breakfast,
    Social,
    Gym,
    Study,
    Security,
}

impl Amenity {
    pub fn recognize(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "wifi" => Some(Self::Wifi),
            "breakfast" => Some(Self::Breakfast),
            "social" => Some(Self::Social),
            "gym" => Some(Self::Gym),
            "library" | "study rooms" | "study areas" => Some(Self::Study),
            "security" => Some(Self::Security),
            _ => None,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Wifi => "📶",
            Self::Breakfast => "☕",
            Self::Social => "👥",
            Self::Gym => "🏋",
            Self::Study => "📚",
            Self::Security => "🛡",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_always_add_up_to_five() {
        for tenth in 0..=50 {
            let stars = StarRating::from_rating(tenth as f32 / 10.0);
            assert_eq!(stars.full + stars.half + stars.empty, 5, "rating {}", tenth);
        }
    }

    #[test]
    fn half_star_for_fractional_rating() {
        let stars = StarRating::from_rating(4.7);
        assert_eq!(stars, StarRating { full: 4, half: 1, empty: 0 });
        assert_eq!(stars.render(), "★★★★½");

        let stars = StarRating::from_rating(3.0);
        assert_eq!(stars, StarRating { full: 3, half: 0, empty: 2 });
    }

    #[test]
    fn out_of_range_ratings_are_clamped() {
        assert_eq!(StarRating::from_rating(7.2).full, 5);
        assert_eq!(StarRating::from_rating(-1.0).empty, 5);
    }

    #[test]
    fn amenity_recognition_is_case_insensitive() {
        assert_eq!(Amenity::recognize("WiFi"), Some(Amenity::Wifi));
        assert_eq!(Amenity::recognize("Study Rooms"), Some(Amenity::Study));
        assert_eq!(Amenity::recognize("Rooftop Bar"), None);
    }

    #[test]
    fn session_user_uses_camel_case_on_the_wire() {
        let user = SessionUser {
            id: "123456".to_string(),
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            user_type: UserType::HostelProvider,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["userType"], "hostelProvider");
    }

    #[test]
    fn nearby_hostel_rewrites_distance_on_a_copy() {
        let hostel = Hostel {
            id: 1,
            name: "Test".to_string(),
            image: String::new(),
            rating: 4.0,
            price: 20,
            location: "Delhi, India".to_string(),
            distance: "0.5 km".to_string(),
            amenities: vec![],
        };

        let nearby = NearbyHostel::new(&hostel, Coordinates::new(28.6, 77.2), 7.26);
        assert_eq!(nearby.hostel.distance, "7.3 km");
        assert_eq!(nearby.coordinates, Coordinates::new(28.6, 77.2));
        assert_eq!(hostel.distance, "0.5 km");
    }

    #[test]
    fn location_query_has_six_decimals() {
        let here = Coordinates::new(28.61394, 77.209);
        assert_eq!(here.to_location_query(), "28.613940,77.209000");
    }
}
