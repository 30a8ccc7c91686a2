//! SQLite store for edge and degree tables

use std::path::Path;

use fanout_io::{EdgeSource, FeatureRow};
use rusqlite::{params, Connection};

use super::schema::{Schema, Table};
use crate::error::{PersistenceError, Result};

/// Scope-owned handle on the degree database
///
/// The connection is released when the store is dropped; `close` does the
/// same but reports any error from SQLite.
pub struct DegreeStore {
    conn: Connection,
    location: String,
}

impl DegreeStore {
    /// Open (or create) a database at the given path
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        Self::with_connection(conn, path.display().to_string())
    }

    /// Create an in-memory database
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, ":memory:".to_string())
    }

    fn with_connection(conn: Connection, location: String) -> Result<Self> {
        conn.execute_batch(Schema::pragmas())?;
        Ok(Self { conn, location })
    }

    /// Where the database lives
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Drop tables from any previous run and create an empty edge table
    pub fn reset(&self) -> Result<()> {
        self.conn.execute_batch(Schema::drop_tables())?;
        self.conn.execute_batch(Schema::create_edges())?;
        Ok(())
    }

    /// Insert every edge from `source`, committing every `batch_size` rows
    ///
    /// Returns the number of edges inserted. A failing batch is rolled
    /// back; earlier batches stay committed.
    pub fn load_edges<S: EdgeSource>(&mut self, source: &mut S, batch_size: usize) -> Result<u64> {
        let batch_size = batch_size.max(1);
        let mut total = 0u64;

        loop {
            let tx = self.conn.transaction()?;
            let mut inserted = 0usize;
            {
                let mut stmt = tx.prepare_cached(Schema::insert_edge())?;
                while inserted < batch_size {
                    let Some(edge) = source.next_edge()? else {
                        break;
                    };
                    stmt.execute(params![edge.followed_id, edge.follower_id])?;
                    inserted += 1;
                }
            }
            tx.commit()?;

            total += inserted as u64;
            if inserted > 0 {
                tracing::debug!("Loaded {} edges into {}", total, self.location);
            }
            if inserted < batch_size {
                break;
            }
        }

        Ok(total)
    }

    /// Group edges by target into `in_degrees`
    pub fn build_in_degrees(&self) -> Result<u64> {
        self.conn.execute_batch(Schema::create_in_degrees())?;
        self.count(Table::InDegrees)
    }

    /// Group edges by source into `out_degrees`
    pub fn build_out_degrees(&self) -> Result<u64> {
        self.conn.execute_batch(Schema::create_out_degrees())?;
        self.count(Table::OutDegrees)
    }

    /// Join both degree tables into `features`
    pub fn build_features(&self) -> Result<u64> {
        self.conn.execute_batch(Schema::create_features())?;
        self.count(Table::Features)
    }

    /// Number of rows in a table
    pub fn count(&self, table: Table) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.name());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Whether a table exists
    pub fn has_table(&self, table: Table) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table.name()],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Read the feature table ordered by ascending user id
    pub fn feature_rows(&self) -> Result<Vec<FeatureRow>> {
        let mut stmt = self.conn.prepare(Schema::select_features())?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, Option<i64>>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, i64>(2)?,
                    row.get::<_, f64>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        raw.into_iter()
            .map(|(user_id, in_degree, out_degree, ratio)| -> Result<FeatureRow> {
                let user_id = user_id.ok_or_else(|| invalid("NULL user_id"))?;
                let in_degree = u64::try_from(in_degree)
                    .map_err(|_| invalid(&format!("negative in_degree for {}", user_id)))?;
                let out_degree = u64::try_from(out_degree)
                    .map_err(|_| invalid(&format!("negative out_degree for {}", user_id)))?;
                Ok(FeatureRow {
                    user_id,
                    in_degree,
                    out_degree,
                    ratio,
                })
            })
            .collect()
    }

    /// Close the connection, surfacing any error
    pub fn close(self) -> Result<()> {
        self.conn
            .close()
            .map_err(|(_, e)| PersistenceError::from(e).into())
    }
}

fn invalid(reason: &str) -> crate::error::FanoutError {
    PersistenceError::InvalidValue {
        table: Table::Features.name().to_string(),
        reason: reason.to_string(),
    }
    .into()
}
