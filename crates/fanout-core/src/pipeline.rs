//! The three-stage feature pipeline
//!
//! Aggregate edges into per-node degree rows, extract them as a dense
//! table ordered by user id, then standardize and write the matrix. Each
//! stage runs to completion before the next starts.

use std::path::PathBuf;

use fanout_io::{write_matrix, EdgeListReader, FeatureTable, FEATURE_COLUMNS};
use fanout_stats::StandardScaler;

use crate::aggregate::{aggregate_in_memory, aggregate_into_store, AggregateSummary};
use crate::config::{FanoutConfig, StoreBackend};
use crate::error::Result;
use crate::extract::extract_features;
use crate::persistence::DegreeStore;

/// What a completed run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: AggregateSummary,
    /// Rows written to the output matrix
    pub rows_written: usize,
    /// Columns that had zero variance
    pub constant_columns: Vec<&'static str>,
    pub output: PathBuf,
}

/// A validated pipeline, ready to run
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: FanoutConfig,
}

impl Pipeline {
    /// Validate `config` and build a pipeline
    pub fn new(config: FanoutConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Run every stage, writing the scaled matrix to the output path
    pub fn run(&self) -> Result<RunReport> {
        let (summary, table) = self.build_feature_table()?;
        tracing::info!("Extracted {} feature rows", table.num_rows());

        tracing::info!("Scaling features...");
        let (scaler, scaled) =
            StandardScaler::fit_transform(table.values(), self.config.scaling.zero_variance)?;
        for (index, name) in FEATURE_COLUMNS.iter().enumerate() {
            tracing::debug!(
                "{}: mean {} std {}",
                name,
                scaler.means()[index],
                scaler.std_devs()[index]
            );
        }
        let constant_columns: Vec<&'static str> = scaler
            .constant_columns()
            .into_iter()
            .map(|index| FEATURE_COLUMNS[index])
            .collect();
        if !constant_columns.is_empty() {
            tracing::warn!(
                "Zero-variance columns {:?} scaled with policy {:?}",
                constant_columns,
                scaler.policy()
            );
        }

        let output = self.config.paths.output.clone();
        tracing::info!("Saving final data to {}", output.display());
        write_matrix(&output, &scaled)?;

        Ok(RunReport {
            summary,
            rows_written: scaled.nrows(),
            constant_columns,
            output,
        })
    }

    /// Aggregation and extraction: edge file to ordered feature table
    pub fn build_feature_table(&self) -> Result<(AggregateSummary, FeatureTable)> {
        let delimiter = self.config.ingest.delimiter_byte()?;
        let mut reader = EdgeListReader::open_with_delimiter(&self.config.paths.input, delimiter)?;

        match self.config.store.backend {
            StoreBackend::Sqlite => {
                let mut store = DegreeStore::open(&self.config.store.database)?;
                let summary =
                    aggregate_into_store(&mut store, &mut reader, self.config.store.batch_size)?;
                let table = extract_features(&store)?;
                store.close()?;
                Ok((summary, table))
            }
            StoreBackend::Memory => {
                let (summary, rows) = aggregate_in_memory(&mut reader)?;
                Ok((summary, FeatureTable::from_rows(&rows)?))
            }
        }
    }
}
