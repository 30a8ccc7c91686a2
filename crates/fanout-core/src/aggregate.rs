//! Degree aggregation
//!
//! Two interchangeable ways to turn an edge stream into feature rows:
//! SQL grouping in a `DegreeStore`, or hash counting in memory. Both
//! produce one row per node seen on either side of an edge.

use std::collections::BTreeMap;

use fanout_io::{Edge, EdgeSource, FeatureRow};

use crate::error::Result;
use crate::persistence::DegreeStore;

/// Row counts from an aggregation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateSummary {
    /// Edges read
    pub edges: u64,
    /// Distinct targets
    pub targets: u64,
    /// Distinct sources
    pub sources: u64,
    /// Distinct nodes overall
    pub nodes: u64,
}

/// Load `source` into `store` and build the degree and feature tables
///
/// Tables from an earlier run are dropped first.
pub fn aggregate_into_store<S: EdgeSource>(
    store: &mut DegreeStore,
    source: &mut S,
    batch_size: usize,
) -> Result<AggregateSummary> {
    tracing::info!("Creating edge table from {}", source.describe());
    store.reset()?;
    let edges = store.load_edges(source, batch_size)?;
    tracing::info!("Loaded {} edges", edges);

    tracing::info!("Calculating in-degrees...");
    let targets = store.build_in_degrees()?;

    tracing::info!("Calculating out-degrees...");
    let sources = store.build_out_degrees()?;

    tracing::info!("Joining degrees and calculating features...");
    let nodes = store.build_features()?;

    Ok(AggregateSummary {
        edges,
        targets,
        sources,
        nodes,
    })
}

/// Per-node edge counts
#[derive(Debug, Clone, Default)]
pub struct DegreeCounts {
    in_degrees: BTreeMap<i64, u64>,
    out_degrees: BTreeMap<i64, u64>,
    edges: u64,
}

impl DegreeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one edge toward its target and its source
    pub fn add(&mut self, edge: Edge) {
        *self.in_degrees.entry(edge.followed_id).or_insert(0) += 1;
        *self.out_degrees.entry(edge.follower_id).or_insert(0) += 1;
        self.edges += 1;
    }

    pub fn summary(&self) -> AggregateSummary {
        let nodes = self
            .out_degrees
            .keys()
            .filter(|id| !self.in_degrees.contains_key(*id))
            .count()
            + self.in_degrees.len();

        AggregateSummary {
            edges: self.edges,
            targets: self.in_degrees.len() as u64,
            sources: self.out_degrees.len() as u64,
            nodes: nodes as u64,
        }
    }

    /// Outer-join both count maps into rows sorted by user id
    pub fn into_feature_rows(self) -> Vec<FeatureRow> {
        let mut merged: BTreeMap<i64, (u64, u64)> = BTreeMap::new();
        for (id, count) in self.in_degrees {
            merged.entry(id).or_default().0 = count;
        }
        for (id, count) in self.out_degrees {
            merged.entry(id).or_default().1 = count;
        }

        merged
            .into_iter()
            .map(|(id, (in_degree, out_degree))| FeatureRow::from_counts(id, in_degree, out_degree))
            .collect()
    }
}

/// Count degrees without a database
pub fn aggregate_in_memory<S: EdgeSource>(
    source: &mut S,
) -> Result<(AggregateSummary, Vec<FeatureRow>)> {
    tracing::info!("Counting degrees in memory from {}", source.describe());
    let mut counts = DegreeCounts::new();
    source.for_each_edge(|edge| {
        counts.add(edge);
        Ok(())
    })?;

    let summary = counts.summary();
    Ok((summary, counts.into_feature_rows()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::Table;
    use fanout_io::VecEdgeSource;

    fn sample() -> Vec<(i64, i64)> {
        vec![(2, 1), (3, 1), (3, 2)]
    }

    #[test]
    fn test_in_memory_scenario() {
        let (summary, rows) = aggregate_in_memory(&mut VecEdgeSource::from(sample())).unwrap();

        assert_eq!(summary.edges, 3);
        assert_eq!(summary.nodes, 3);
        assert_eq!(
            rows,
            vec![
                FeatureRow::from_counts(1, 0, 2),
                FeatureRow::from_counts(2, 1, 1),
                FeatureRow::from_counts(3, 2, 0),
            ]
        );
    }

    #[test]
    fn test_parallel_edges_and_self_loops_count() {
        let (_, rows) =
            aggregate_in_memory(&mut VecEdgeSource::from(vec![(1, 2), (1, 2), (4, 4)])).unwrap();

        assert_eq!(rows[0], FeatureRow::from_counts(1, 2, 0));
        assert_eq!(rows[1], FeatureRow::from_counts(2, 0, 2));
        assert_eq!(rows[2], FeatureRow::from_counts(4, 1, 1));
    }

    #[test]
    fn test_store_scenario_summary() {
        let mut store = DegreeStore::in_memory().unwrap();
        let summary =
            aggregate_into_store(&mut store, &mut VecEdgeSource::from(sample()), 1).unwrap();

        assert_eq!(
            summary,
            AggregateSummary {
                edges: 3,
                targets: 2,
                sources: 2,
                nodes: 3,
            }
        );
        assert_eq!(store.count(Table::Features).unwrap(), 3);
    }

    #[test]
    fn test_backends_agree() {
        let edges: Vec<(i64, i64)> = (0..200i64)
            .map(|i| ((i * 7) % 31, (i * 13) % 47 + 20))
            .collect();

        let mut store = DegreeStore::in_memory().unwrap();
        let sql_summary =
            aggregate_into_store(&mut store, &mut VecEdgeSource::from(edges.clone()), 64).unwrap();
        let sql_rows = store.feature_rows().unwrap();

        let (mem_summary, mem_rows) =
            aggregate_in_memory(&mut VecEdgeSource::from(edges)).unwrap();

        assert_eq!(sql_summary, mem_summary);
        assert_eq!(sql_rows, mem_rows);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let mut store = DegreeStore::in_memory().unwrap();
        aggregate_into_store(&mut store, &mut VecEdgeSource::from(sample()), 10).unwrap();
        let first = store.feature_rows().unwrap();

        aggregate_into_store(&mut store, &mut VecEdgeSource::from(sample()), 10).unwrap();
        assert_eq!(store.feature_rows().unwrap(), first);
        assert_eq!(store.count(Table::Edges).unwrap(), 3);
    }
}
