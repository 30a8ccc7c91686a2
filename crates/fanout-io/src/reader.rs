//! Edge source trait and common error types
//!
//! The `EdgeSource` trait gives the aggregators a uniform way to pull
//! edges without caring where they come from.

use crate::schema::Edge;
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Malformed edge on line {line}: {reason}")]
    MalformedLine { line: u64, reason: String },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Failed to write {path}: {reason}")]
    WriteFailed { path: String, reason: String },
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// A stream of edges
///
/// Implementations yield edges in file order and stop at the first error.
pub trait EdgeSource {
    /// Pull the next edge, `Ok(None)` at end of input
    fn next_edge(&mut self) -> IoResult<Option<Edge>>;

    /// Human-readable description of where edges come from
    fn describe(&self) -> String;

    /// Drain the source, handing every edge to `visit`
    ///
    /// Returns the number of edges visited.
    fn for_each_edge<F>(&mut self, mut visit: F) -> IoResult<u64>
    where
        Self: Sized,
        F: FnMut(Edge) -> IoResult<()>,
    {
        let mut count = 0;
        while let Some(edge) = self.next_edge()? {
            visit(edge)?;
            count += 1;
        }
        Ok(count)
    }
}

/// An in-memory edge source, mostly useful for tests and small graphs
#[derive(Debug, Clone, Default)]
pub struct VecEdgeSource {
    edges: Vec<Edge>,
    position: usize,
}

impl VecEdgeSource {
    /// Wrap a vector of edges
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges, position: 0 }
    }
}

impl From<Vec<(i64, i64)>> for VecEdgeSource {
    fn from(pairs: Vec<(i64, i64)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(followed_id, follower_id)| Edge::new(followed_id, follower_id))
                .collect(),
        )
    }
}

impl EdgeSource for VecEdgeSource {
    fn next_edge(&mut self) -> IoResult<Option<Edge>> {
        let edge = self.edges.get(self.position).copied();
        if edge.is_some() {
            self.position += 1;
        }
        Ok(edge)
    }

    fn describe(&self) -> String {
        format!("{} in-memory edges", self.edges.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_source_drains_in_order() {
        let mut source = VecEdgeSource::from(vec![(2, 1), (3, 1)]);
        let mut seen = Vec::new();
        let count = source
            .for_each_edge(|edge| {
                seen.push(edge);
                Ok(())
            })
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(seen[0], Edge::new(2, 1));
        assert_eq!(seen[1], Edge::new(3, 1));
        assert!(source.next_edge().unwrap().is_none());
    }

    #[test]
    fn test_visitor_error_stops_iteration() {
        let mut source = VecEdgeSource::from(vec![(1, 2), (3, 4)]);
        let result = source.for_each_edge(|_| Err(IoError::InvalidFormat("stop".to_string())));
        assert!(result.is_err());
    }
}
