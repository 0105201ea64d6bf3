//! Authentication

mod credentials;
pub(crate) mod middleware;
