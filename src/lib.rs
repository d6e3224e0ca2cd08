//! Student hostel directory: reference data, location and university search,
//! proximity filtering, placeholder authentication, image upload checks and
//! listing submission.

pub mod auth;
pub mod config;
pub mod contact;
pub mod data;
pub mod forms;
pub mod geo;
pub mod listing;
pub mod map;
pub mod models;
pub mod search;
pub mod upload;

pub use config::Config;
pub use models::{Coordinates, Hostel, NearbyHostel, SessionUser, University, UserType};
pub use search::Directory;
