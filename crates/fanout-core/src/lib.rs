//! fanout-core - Degree features for graph clustering
//!
//! Turns a directed edge list into a standardized per-node feature matrix:
//!
//! 1. **Aggregate**: count in-degree and out-degree per node, outer-join
//!    them and derive `ratio = in_degree / (out_degree + 1)`
//! 2. **Extract**: read the features ordered by user id into a dense table
//! 3. **Scale and export**: standardize each column and write the matrix
//!
//! Aggregation runs either as SQL over a SQLite `DegreeStore` or as hash
//! counting in memory; both yield the same rows.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod extract;
pub mod persistence;
pub mod pipeline;

pub use aggregate::{aggregate_in_memory, aggregate_into_store, AggregateSummary, DegreeCounts};
pub use config::{FanoutConfig, StoreBackend};
pub use error::{ConfigError, FanoutError, PersistenceError, Result};
pub use extract::extract_features;
pub use persistence::{DegreeStore, Table};
pub use pipeline::{Pipeline, RunReport};
