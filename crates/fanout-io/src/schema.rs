//! Edge and feature types for degree data

use ndarray::{Array2, ArrayView1, Axis};
use serde::{Deserialize, Serialize};

use crate::reader::{IoError, IoResult};

/// Feature columns in matrix order
pub const FEATURE_COLUMNS: [&str; 3] = ["in_degree", "out_degree", "ratio"];

/// A directed edge: `follower_id` follows `followed_id`
///
/// The followed node is the target, the follower is the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// Target node
    pub followed_id: i64,
    /// Source node
    pub follower_id: i64,
}

impl Edge {
    /// Create a new edge
    pub fn new(followed_id: i64, follower_id: i64) -> Self {
        Self {
            followed_id,
            follower_id,
        }
    }
}

/// Degree features for a single node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub user_id: i64,
    pub in_degree: u64,
    pub out_degree: u64,
    /// `in_degree / (out_degree + 1.0)`
    pub ratio: f64,
}

impl FeatureRow {
    /// Build a row from raw counts, deriving the ratio
    pub fn from_counts(user_id: i64, in_degree: u64, out_degree: u64) -> Self {
        Self {
            user_id,
            in_degree,
            out_degree,
            ratio: in_degree as f64 / (out_degree as f64 + 1.0),
        }
    }

    /// Feature value by column index, in `FEATURE_COLUMNS` order
    pub fn feature(&self, column: usize) -> f64 {
        match column {
            0 => self.in_degree as f64,
            1 => self.out_degree as f64,
            _ => self.ratio,
        }
    }
}

/// Dense feature table ordered by ascending user id
///
/// `values` has one row per node and one column per entry of
/// `FEATURE_COLUMNS`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureTable {
    user_ids: Vec<i64>,
    values: Array2<f64>,
}

impl FeatureTable {
    /// Create a table, checking that ids and values line up
    pub fn new(user_ids: Vec<i64>, values: Array2<f64>) -> IoResult<Self> {
        if values.ncols() != FEATURE_COLUMNS.len() {
            return Err(IoError::InvalidFormat(format!(
                "expected {} feature columns, got {}",
                FEATURE_COLUMNS.len(),
                values.ncols()
            )));
        }
        if values.nrows() != user_ids.len() {
            return Err(IoError::InvalidFormat(format!(
                "{} user ids for {} feature rows",
                user_ids.len(),
                values.nrows()
            )));
        }
        if user_ids.windows(2).any(|w| w[0] >= w[1]) {
            return Err(IoError::InvalidFormat(
                "user ids must be strictly ascending".to_string(),
            ));
        }
        Ok(Self { user_ids, values })
    }

    /// Build a table from rows, sorting them by user id
    pub fn from_rows(rows: &[FeatureRow]) -> IoResult<Self> {
        let mut sorted = rows.to_vec();
        sorted.sort_by_key(|row| row.user_id);

        let values = Array2::from_shape_fn((sorted.len(), FEATURE_COLUMNS.len()), |(i, j)| {
            sorted[i].feature(j)
        });
        let user_ids = sorted.iter().map(|row| row.user_id).collect();

        Self::new(user_ids, values)
    }

    /// Empty table with the standard column layout
    pub fn empty() -> Self {
        Self {
            user_ids: Vec::new(),
            values: Array2::zeros((0, FEATURE_COLUMNS.len())),
        }
    }

    /// Number of nodes
    pub fn num_rows(&self) -> usize {
        self.user_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.user_ids.is_empty()
    }

    /// Node ids in row order
    pub fn user_ids(&self) -> &[i64] {
        &self.user_ids
    }

    /// The dense `n x 3` feature matrix
    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    /// Get a column by name
    pub fn column(&self, name: &str) -> Option<ArrayView1<'_, f64>> {
        FEATURE_COLUMNS
            .iter()
            .position(|c| *c == name)
            .map(|index| self.values.index_axis(Axis(1), index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_ratio_uses_smoothed_denominator() {
        assert_eq!(FeatureRow::from_counts(1, 0, 2).ratio, 0.0);
        assert_eq!(FeatureRow::from_counts(2, 1, 1).ratio, 0.5);
        assert_eq!(FeatureRow::from_counts(3, 2, 0).ratio, 2.0);
    }

    #[test]
    fn test_from_rows_sorts_by_user_id() {
        let rows = vec![
            FeatureRow::from_counts(3, 2, 0),
            FeatureRow::from_counts(1, 0, 2),
            FeatureRow::from_counts(2, 1, 1),
        ];
        let table = FeatureTable::from_rows(&rows).unwrap();

        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.user_ids(), &[1, 2, 3]);
        assert_eq!(
            table.values(),
            &array![[0.0, 2.0, 0.0], [1.0, 1.0, 0.5], [2.0, 0.0, 2.0]]
        );
    }

    #[test]
    fn test_column_lookup() {
        let rows = vec![FeatureRow::from_counts(7, 4, 1)];
        let table = FeatureTable::from_rows(&rows).unwrap();

        assert_eq!(table.column("out_degree").unwrap().to_vec(), vec![1.0]);
        assert_eq!(table.column("ratio").unwrap().to_vec(), vec![2.0]);
        assert!(table.column("pagerank").is_none());
    }

    #[test]
    fn test_new_rejects_mismatched_shapes() {
        assert!(FeatureTable::new(vec![1], Array2::zeros((1, 2))).is_err());
        assert!(FeatureTable::new(vec![1, 2], Array2::zeros((1, 3))).is_err());
        assert!(FeatureTable::new(vec![2, 1], Array2::zeros((2, 3))).is_err());
    }

    #[test]
    fn test_empty_table() {
        let table = FeatureTable::empty();
        assert!(table.is_empty());
        assert_eq!(table.num_rows(), 0);
        assert_eq!(table.values().ncols(), 3);
    }
}
