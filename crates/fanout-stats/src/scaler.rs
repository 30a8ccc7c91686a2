//! Column-wise standard scaling
//!
//! `StandardScaler` learns the mean and population standard deviation of
//! every column, then maps each value to `(x - mean) / std`.

use ndarray::{Array1, Array2, Axis, Zip};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::summary::SummaryStats;

/// Errors raised while scaling
#[derive(Debug, Error)]
pub enum ScaleError {
    #[error("Column {column} has zero variance")]
    ZeroVariance { column: usize },

    #[error("Shape mismatch: expected {expected} columns, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },
}

/// What to emit for a column whose standard deviation is zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroVariancePolicy {
    /// Centre only, so every value becomes 0.0
    #[default]
    Zero,
    /// Emit NaN for the whole column
    Nan,
    /// Refuse to scale
    Fail,
}

/// A fitted standard scaler
#[derive(Debug, Clone)]
pub struct StandardScaler {
    means: Array1<f64>,
    std_devs: Array1<f64>,
    constant: Vec<bool>,
    policy: ZeroVariancePolicy,
}

impl StandardScaler {
    /// Fit per-column statistics on `data` (rows are observations)
    ///
    /// Fails only under `ZeroVariancePolicy::Fail` when some column is
    /// constant. An empty matrix fits trivially.
    pub fn fit(data: &Array2<f64>, policy: ZeroVariancePolicy) -> Result<Self, ScaleError> {
        let stats: Vec<SummaryStats> = data
            .axis_iter(Axis(1))
            .map(|column| SummaryStats::from_data(&column.to_vec()))
            .collect();

        let constant: Vec<bool> = stats
            .iter()
            .map(|s| s.count > 0 && s.is_constant())
            .collect();

        if policy == ZeroVariancePolicy::Fail {
            if let Some(column) = constant.iter().position(|&c| c) {
                return Err(ScaleError::ZeroVariance { column });
            }
        }

        // Empty columns have NaN moments; keep them inert
        let means = stats
            .iter()
            .map(|s| if s.count == 0 { 0.0 } else { s.mean })
            .collect();
        let std_devs = stats
            .iter()
            .map(|s| if s.count == 0 { 1.0 } else { s.std_dev })
            .collect();

        Ok(Self {
            means,
            std_devs,
            constant,
            policy,
        })
    }

    /// Standardize `data` with the fitted statistics
    pub fn transform(&self, data: &Array2<f64>) -> Result<Array2<f64>, ScaleError> {
        self.check_width(data)?;

        let mut scaled = data.to_owned();
        for (index, mut column) in scaled.axis_iter_mut(Axis(1)).enumerate() {
            let mean = self.means[index];
            if self.constant[index] {
                let fill = match self.policy {
                    ZeroVariancePolicy::Nan => f64::NAN,
                    _ => 0.0,
                };
                column.fill(fill);
            } else {
                let std_dev = self.std_devs[index];
                column.mapv_inplace(|x| (x - mean) / std_dev);
            }
        }
        Ok(scaled)
    }

    /// Fit on `data` and return it standardized
    pub fn fit_transform(
        data: &Array2<f64>,
        policy: ZeroVariancePolicy,
    ) -> Result<(Self, Array2<f64>), ScaleError> {
        let scaler = Self::fit(data, policy)?;
        let scaled = scaler.transform(data)?;
        Ok((scaler, scaled))
    }

    /// Map standardized values back to the original scale
    ///
    /// Constant columns come back as their mean.
    pub fn inverse_transform(&self, scaled: &Array2<f64>) -> Result<Array2<f64>, ScaleError> {
        self.check_width(scaled)?;

        let scale: Array1<f64> = self
            .std_devs
            .iter()
            .zip(&self.constant)
            .map(|(&s, &c)| if c { 0.0 } else { s })
            .collect();

        let mut restored = scaled.to_owned();
        for mut row in restored.axis_iter_mut(Axis(0)) {
            Zip::from(&mut row)
                .and(&scale)
                .and(&self.means)
                .for_each(|x, &s, &m| *x = *x * s + m);
        }
        Ok(restored)
    }

    /// Per-column means
    pub fn means(&self) -> &Array1<f64> {
        &self.means
    }

    /// Per-column population standard deviations
    pub fn std_devs(&self) -> &Array1<f64> {
        &self.std_devs
    }

    /// Indices of columns treated as constant
    pub fn constant_columns(&self) -> Vec<usize> {
        self.constant
            .iter()
            .enumerate()
            .filter_map(|(i, &c)| c.then_some(i))
            .collect()
    }

    pub fn policy(&self) -> ZeroVariancePolicy {
        self.policy
    }

    fn check_width(&self, data: &Array2<f64>) -> Result<(), ScaleError> {
        if data.ncols() != self.means.len() {
            return Err(ScaleError::ShapeMismatch {
                expected: self.means.len(),
                actual: data.ncols(),
            });
        }
        Ok(())
    }
}
