//! fanout-io - Data I/O for degree feature extraction
//!
//! This crate provides the file-facing pieces of the pipeline:
//!
//! - **Edge lists**: delimited `followed_id follower_id` pairs, one per line
//! - **Feature tables**: per-node degree rows and their dense matrix form
//! - **Matrix export**: plain-text rows with fixed 8-digit precision
//!
//! # Design
//!
//! Edge lists are streamed, never loaded whole. Every malformed line is a
//! hard error carrying its line number.

pub mod edge_list;
pub mod reader;
pub mod schema;
pub mod writer;

pub use edge_list::*;
pub use reader::*;
pub use schema::*;
pub use writer::*;
