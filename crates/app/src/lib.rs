//! BRIX application services, snapshot persistence and the shared dataset store.

pub mod context;
pub mod domain;
pub mod storage;
pub mod store;

#[cfg(test)]
mod test;
