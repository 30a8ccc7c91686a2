//! Feature extraction from the degree store

use fanout_io::FeatureTable;

use crate::error::Result;
use crate::persistence::DegreeStore;

/// Read `features` into a dense table ordered by ascending user id
///
/// Columns follow `fanout_io::FEATURE_COLUMNS`; nothing is filtered.
pub fn extract_features(store: &DegreeStore) -> Result<FeatureTable> {
    tracing::info!("Fetching feature table from {}", store.location());
    let rows = store.feature_rows()?;
    Ok(FeatureTable::from_rows(&rows)?)
}
