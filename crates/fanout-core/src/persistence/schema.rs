//! SQLite schema for degree tables

/// Tables written by an aggregation run, in creation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Edges,
    InDegrees,
    OutDegrees,
    Features,
}

impl Table {
    pub const ALL: [Table; 4] = [
        Table::Edges,
        Table::InDegrees,
        Table::OutDegrees,
        Table::Features,
    ];

    /// SQL table name
    pub fn name(&self) -> &'static str {
        match self {
            Table::Edges => "edges",
            Table::InDegrees => "in_degrees",
            Table::OutDegrees => "out_degrees",
            Table::Features => "features",
        }
    }
}

/// SQLite schema definition
pub struct Schema;

impl Schema {
    /// Connection settings applied on open
    pub fn pragmas() -> &'static str {
        r#"
PRAGMA journal_mode = WAL;
PRAGMA synchronous = NORMAL;
"#
    }

    /// Drop every table from a previous run
    pub fn drop_tables() -> &'static str {
        r#"
DROP TABLE IF EXISTS features;
DROP TABLE IF EXISTS out_degrees;
DROP TABLE IF EXISTS in_degrees;
DROP TABLE IF EXISTS edges;
"#
    }

    /// Raw edge table, `followed_id` is the target
    pub fn create_edges() -> &'static str {
        r#"
CREATE TABLE edges (
    followed_id INTEGER NOT NULL,
    follower_id INTEGER NOT NULL
);
"#
    }

    pub fn insert_edge() -> &'static str {
        "INSERT INTO edges (followed_id, follower_id) VALUES (?1, ?2)"
    }

    /// Edges per target
    pub fn create_in_degrees() -> &'static str {
        r#"
CREATE TABLE in_degrees AS
SELECT followed_id AS user_id, COUNT(*) AS in_degree
FROM edges
GROUP BY followed_id;
"#
    }

    /// Edges per source
    pub fn create_out_degrees() -> &'static str {
        r#"
CREATE TABLE out_degrees AS
SELECT follower_id AS user_id, COUNT(*) AS out_degree
FROM edges
GROUP BY follower_id;
"#
    }

    /// Full outer join of both degree tables
    ///
    /// The key is coalesced so nodes that only appear as a source keep
    /// their id. A missing side counts as zero.
    pub fn create_features() -> &'static str {
        r#"
CREATE TABLE features AS
SELECT
    COALESCE(t1.user_id, t2.user_id) AS user_id,
    COALESCE(t1.in_degree, 0) AS in_degree,
    COALESCE(t2.out_degree, 0) AS out_degree,
    (COALESCE(t1.in_degree, 0) / (COALESCE(t2.out_degree, 0) + 1.0)) AS ratio
FROM in_degrees t1
FULL OUTER JOIN out_degrees t2 ON t1.user_id = t2.user_id;
"#
    }

    /// Feature rows in ascending id order
    pub fn select_features() -> &'static str {
        "SELECT user_id, in_degree, out_degree, ratio FROM features ORDER BY user_id"
    }
}
