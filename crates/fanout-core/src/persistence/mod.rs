//! Persistence layer for degree aggregation
//!
//! Provides SQLite-backed storage for edges, grouped degree counts and the
//! joined feature table.

mod schema;
mod store;

pub use schema::{Schema, Table};
pub use store::DegreeStore;
