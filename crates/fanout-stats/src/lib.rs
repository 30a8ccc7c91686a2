//! fanout-stats - Statistical functions for feature preparation
//!
//! This crate provides the numeric side of the pipeline:
//!
//! - **Summary**: count, mean, population variance, min and max
//! - **Scaler**: column-wise standardization to zero mean, unit variance
//!
//! # Zero variance
//!
//! A constant column has no spread to divide by. What the scaler emits for
//! it is an explicit `ZeroVariancePolicy`, never an accident of floating
//! point.

pub mod scaler;
pub mod summary;

pub use scaler::*;
pub use summary::*;
