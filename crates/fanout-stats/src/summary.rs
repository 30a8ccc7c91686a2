//! Summary statistics for feature columns
//!
//! Provides the moments the scaler needs:
//! - Mean, population variance, standard deviation
//! - Min, max, range

use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of values
    pub count: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Population variance (ddof = 0)
    pub variance: f64,
    /// Population standard deviation
    pub std_dev: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data
    pub fn from_data<'a, I>(data: I) -> Self
    where
        I: IntoIterator<Item = &'a f64>,
        I::IntoIter: Clone,
    {
        let values = data.into_iter();

        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &x in values.clone() {
            count += 1;
            sum += x;
            min = min.min(x);
            max = max.max(x);
        }

        if count == 0 {
            return Self::empty();
        }

        let mean = sum / count as f64;
        // Two-pass variance keeps cancellation error down on large counts
        let variance = values.map(|x| (x - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            count,
            min,
            max,
            mean,
            variance,
            std_dev: variance.sqrt(),
        }
    }

    /// Create empty statistics (all NaN)
    fn empty() -> Self {
        Self {
            count: 0,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            variance: f64::NAN,
            std_dev: f64::NAN,
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Compute z-score for a value
    pub fn zscore(&self, x: f64) -> f64 {
        (x - self.mean) / self.std_dev
    }

    /// Whether the column is constant up to floating-point noise
    ///
    /// A column of identical values can still show a tiny nonzero variance
    /// after the mean is rounded, so the bound grows with count and
    /// magnitude: `var <= n*eps*var + (n*|mean|*eps)^2`.
    pub fn is_constant(&self) -> bool {
        if self.count == 0 {
            return true;
        }
        if self.min == self.max {
            return true;
        }
        let n = self.count as f64;
        let eps = f64::EPSILON;
        let bound = n * eps * self.variance + (n * self.mean.abs() * eps).powi(2);
        self.variance <= bound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_stats_basic() {
        let data: Vec<f64> = (1..=10).map(|x| x as f64).collect();
        let stats = SummaryStats::from_data(&data);

        assert_eq!(stats.count, 10);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 10.0);
        assert_eq!(stats.range(), 9.0);
        assert!((stats.mean - 5.5).abs() < 1e-10);
        assert!((stats.variance - 8.25).abs() < 1e-10);
    }

    #[test]
    fn test_population_std_dev() {
        let data = vec![0.0, 1.0, 2.0];
        let stats = SummaryStats::from_data(&data);

        assert!((stats.std_dev - (2.0f64 / 3.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_zscore() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let stats = SummaryStats::from_data(&data);

        // Mean is 3.0
        assert!(stats.zscore(3.0).abs() < 1e-10);
        assert!(stats.zscore(5.0) > 1.0);
    }

    #[test]
    fn test_empty_is_nan() {
        let stats = SummaryStats::from_data(&Vec::<f64>::new());
        assert_eq!(stats.count, 0);
        assert!(stats.mean.is_nan());
        assert!(stats.is_constant());
    }

    #[test]
    fn test_constant_detection() {
        assert!(SummaryStats::from_data(&vec![0.1; 1000]).is_constant());
        assert!(SummaryStats::from_data(&vec![7.0]).is_constant());
        assert!(!SummaryStats::from_data(&vec![1.0, 1.0, 1.0 + 1e-6]).is_constant());
    }
}
