//! Identities

mod errors;
mod handlers;
pub(crate) mod models;

pub(crate) use handlers::*;
