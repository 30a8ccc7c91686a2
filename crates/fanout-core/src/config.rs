//! Configuration for fanout-core
//!
//! Defaults reproduce the fixed file layout of a plain run: read
//! `twitter-2010.txt`, keep the degree tables in `twitter_degrees.duckdb`,
//! write `kmeans_features_duckdb.txt`.

use std::path::{Path, PathBuf};

use fanout_stats::ZeroVariancePolicy;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default edge list
pub const DEFAULT_INPUT: &str = "twitter-2010.txt";
/// Default SQLite database for the degree tables
pub const DEFAULT_DATABASE: &str = "twitter_degrees.duckdb";
/// SQLite's name for a private in-memory database
pub const IN_MEMORY_DATABASE: &str = ":memory:";
/// Default scaled matrix
pub const DEFAULT_OUTPUT: &str = "kmeans_features_duckdb.txt";

/// System-wide configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FanoutConfig {
    /// Input and output files
    pub paths: PathsConfig,
    /// Aggregation backend settings
    pub store: StoreConfig,
    /// Standardization settings
    pub scaling: ScalingConfig,
    /// Edge list parsing settings
    pub ingest: IngestConfig,
}

/// Input and output locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Edge list to read
    pub input: PathBuf,
    /// Scaled matrix to write
    pub output: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

/// Which aggregator builds the feature rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// SQL aggregation in SQLite
    #[default]
    Sqlite,
    /// Hash-based counting, nothing persisted
    Memory,
}

/// Aggregation backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Database file; `:memory:` keeps SQLite in memory
    pub database: PathBuf,
    /// Edges inserted per transaction
    pub batch_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            database: PathBuf::from(DEFAULT_DATABASE),
            batch_size: 100_000,
        }
    }
}

/// Standardization configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScalingConfig {
    /// What constant columns become
    pub zero_variance: ZeroVariancePolicy,
}

/// Edge list parsing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Field separator, a single ASCII character
    pub delimiter: char,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self { delimiter: ' ' }
    }
}

impl IngestConfig {
    /// The delimiter as a byte, once validated
    pub fn delimiter_byte(&self) -> Result<u8, ConfigError> {
        let c = self.delimiter;
        if !c.is_ascii() || c.is_ascii_digit() || matches!(c, '-' | '+' | '\n' | '\r') {
            return Err(ConfigError::OutOfRange(format!(
                "delimiter {:?} cannot separate integer node ids",
                c
            )));
        }
        Ok(c as u8)
    }
}

impl FanoutConfig {
    /// Defaults with explicit input and output paths
    pub fn with_paths(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathsConfig {
                input: input.into(),
                output: output.into(),
            },
            ..Self::default()
        }
    }

    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from a JSON string
    pub fn from_json(json_str: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Serialize configuration to JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml(&text)
    }

    /// Read a TOML file if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            tracing::info!("Loading configuration from {}", path.display());
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths.input.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("paths.input".to_string()));
        }

        if self.paths.output.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("paths.output".to_string()));
        }

        if self.store.database.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("store.database".to_string()));
        }

        if self.store.batch_size == 0 {
            return Err(ConfigError::OutOfRange(
                "store.batch_size must be positive".to_string(),
            ));
        }

        self.ingest.delimiter_byte()?;

        Ok(())
    }
}
