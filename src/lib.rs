//! BRIX
//!
//! Container tracking for a logistics office: identities, clients and shipment
//! records, and the rules deciding who may read or change which of them.

pub mod access;
pub mod clients;
pub mod dataset;
pub mod filters;
pub mod identities;
pub mod logins;
pub mod prelude;
pub mod snapshot;
pub mod summary;
pub mod trackings;
pub mod uuids;
