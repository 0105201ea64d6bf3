//! Clients

pub mod data;
pub mod errors;
pub mod service;

pub use errors::ClientsServiceError;
pub use service::*;
