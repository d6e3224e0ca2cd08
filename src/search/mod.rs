use crate::config::{Config, SearchLimits};
use crate::data;
use crate::geo::{haversine_distance, resolve_coordinates};
use crate::models::{Hostel, NearbyHostel, University};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info};

/// Hostels whose location contains `query`, ignoring case.
///
/// A blank query returns the whole collection in its original order.
pub fn search_by_location(query: &str, hostels: &[Hostel]) -> Vec<Hostel> {
    if query.trim().is_empty() {
        return hostels.to_vec();
    }

    let needle = query.to_lowercase();
    hostels
        .iter()
        .filter(|h| h.location.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Universities whose name or location contains `query`, ignoring case.
///
/// An empty query lists the first `limits.default_listing` universities;
/// matches are capped at `limits.max_matches`. Collection order is kept.
pub fn search_universities(
    query: &str,
    universities: &[University],
    limits: SearchLimits,
) -> Vec<University> {
    if query.trim().is_empty() {
        return universities
            .iter()
            .take(limits.default_listing)
            .cloned()
            .collect();
    }

    let needle = query.to_lowercase();
    universities
        .iter()
        .filter(|u| {
            u.name.to_lowercase().contains(&needle) || u.location.to_lowercase().contains(&needle)
        })
        .take(limits.max_matches)
        .cloned()
        .collect()
}

/// Hostels within `radius_km` of the university with `university_id`.
///
/// Hostels whose location cannot be resolved are skipped, and an unknown
/// university yields an empty result. Each returned entry is a copy
/// carrying the computed distance; input order is preserved.
pub fn hostels_near<R: Rng>(
    university_id: u32,
    universities: &[University],
    hostels: &[Hostel],
    radius_km: f64,
    rng: &mut R,
) -> Vec<NearbyHostel> {
    let Some(university) = universities.iter().find(|u| u.id == university_id) else {
        debug!("University {} not found, no nearby hostels", university_id);
        return Vec::new();
    };

    hostels
        .iter()
        .filter_map(|hostel| {
            let position = resolve_coordinates(&hostel.location, rng)?;
            let distance = haversine_distance(university.coordinates, position);
            (distance <= radius_km).then(|| NearbyHostel::new(hostel, position, distance))
        })
        .collect()
}

/// Read-only view over the hostel and university collections
pub struct Directory {
    hostels: Vec<Hostel>,
    universities: Vec<University>,
    limits: SearchLimits,
    jitter_seed: u64,
}

impl Directory {
    /// Directory over the built-in reference data
    pub fn new(config: &Config) -> Self {
        Self::with_data(
            data::hostels().to_vec(),
            data::universities().to_vec(),
            config,
        )
    }

    pub fn with_data(hostels: Vec<Hostel>, universities: Vec<University>, config: &Config) -> Self {
        Self {
            hostels,
            universities,
            limits: config.limits,
            jitter_seed: config.jitter_seed,
        }
    }

    pub fn hostels(&self) -> &[Hostel] {
        &self.hostels
    }

    pub fn universities(&self) -> &[University] {
        &self.universities
    }

    /// Detail lookup; `None` is the "not found" state
    pub fn hostel(&self, id: u32) -> Option<&Hostel> {
        self.hostels.iter().find(|h| h.id == id)
    }

    pub fn university(&self, id: u32) -> Option<&University> {
        self.universities.iter().find(|u| u.id == id)
    }

    pub fn cities(&self) -> Vec<String> {
        data::cities_of(&self.hostels)
    }

    pub fn search(&self, query: &str) -> Vec<Hostel> {
        let results = search_by_location(query, &self.hostels);
        info!("Search '{}' matched {} hostels", query.trim(), results.len());
        results
    }

    /// City chip selection; an empty city clears the filter
    pub fn search_by_city(&self, city: &str) -> Vec<Hostel> {
        self.search(city)
    }

    pub fn search_universities(&self, query: &str) -> Vec<University> {
        search_universities(query, &self.universities, self.limits)
    }

    pub fn hostels_near(&self, university_id: u32, radius_km: f64) -> Vec<NearbyHostel> {
        let results = hostels_near(
            university_id,
            &self.universities,
            &self.hostels,
            radius_km,
            &mut self.rng(),
        );
        info!(
            "{} hostels within {} km of university {}",
            results.len(),
            radius_km,
            university_id
        );
        results
    }

    /// Fresh jitter generator; equal seeds give equal placements
    pub fn rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.jitter_seed)
    }
}
