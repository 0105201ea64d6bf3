//! Trackings

pub mod data;
pub mod errors;
pub mod service;

pub use errors::TrackingsServiceError;
pub use service::*;
