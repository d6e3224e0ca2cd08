use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Number of universities listed when the query is empty
pub const DEFAULT_UNIVERSITY_LISTING: usize = 20;
/// Upper bound on matched universities for a non-empty query
pub const MAX_UNIVERSITY_MATCHES: usize = 30;
pub const DEFAULT_RADIUS_KM: f64 = 10.0;
pub const DEFAULT_JITTER_SEED: u64 = 0x5EED;
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Caps applied to university search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub default_listing: usize,
    pub max_matches: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            default_listing: DEFAULT_UNIVERSITY_LISTING,
            max_matches: MAX_UNIVERSITY_MATCHES,
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// JSON file backing the session store
    pub session_file: PathBuf,
    /// Seed for the coordinate jitter generator
    pub jitter_seed: u64,
    pub radius_km: f64,
    pub limits: SearchLimits,
    /// Artificial latency applied to login, signup and form submission
    pub simulated_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            session_file: env::temp_dir().join("hostel-finder-session.json"),
            jitter_seed: DEFAULT_JITTER_SEED,
            radius_km: DEFAULT_RADIUS_KM,
            limits: SearchLimits::default(),
            simulated_delay: Duration::from_millis(DEFAULT_DELAY_MS),
        }
    }
}

impl Config {
    /// Defaults overridden by `HOSTEL_FINDER_*` environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(path) = env::var("HOSTEL_FINDER_SESSION_FILE") {
            config.session_file = PathBuf::from(path);
        }
        if let Some(seed) = parse_var("HOSTEL_FINDER_JITTER_SEED")? {
            config.jitter_seed = seed;
        }
        if let Some(radius) = parse_var::<f64>("HOSTEL_FINDER_RADIUS_KM")? {
            anyhow::ensure!(radius >= 0.0, "HOSTEL_FINDER_RADIUS_KM must not be negative");
            config.radius_km = radius;
        }
        if let Some(listing) = parse_var("HOSTEL_FINDER_DEFAULT_UNIVERSITIES")? {
            config.limits.default_listing = listing;
        }
        if let Some(max) = parse_var("HOSTEL_FINDER_MAX_UNIVERSITIES")? {
            config.limits.max_matches = max;
        }
        if let Some(delay) = parse_var("HOSTEL_FINDER_DELAY_MS")? {
            config.simulated_delay = Duration::from_millis(delay);
        }

        Ok(config)
    }

    /// Same configuration without artificial latency
    pub fn without_delay(mut self) -> Self {
        self.simulated_delay = Duration::ZERO;
        self
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} must be a number, got '{}'", name, value)),
        Err(_) => Ok(None),
    }
}
