//! Domain services.

pub mod clients;
pub mod identities;
pub mod trackings;
