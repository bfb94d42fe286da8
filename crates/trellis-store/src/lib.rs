//! Trellis Storage Layer
//!
//! Implements the `GraphStore` trait over SQLite.
//!
//! # Architecture
//!
//! Two graph collections (nodes, edges), the processed-content archive, a
//! single-row settings record, and a single-row maintenance record. Every
//! mutation is a single SQL statement, so individual writes are atomic even
//! when ingestions of different URLs interleave.
//!
//! # Thread Safety
//!
//! SQLite connections are not thread-safe. Callers wrap the store in a mutex
//! and keep lock scopes free of await points.
//!
//! # Examples
//!
//! ```no_run
//! use trellis_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is ready for graph operations
//! ```

#![warn(missing_docs)]

use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::warn;
use trellis_domain::traits::{EvictionStats, GraphSnapshot, GraphStore, SearchHit};
use trellis_domain::{
    EdgeId, EdgeKind, GraphEdge, GraphNode, NodeId, NodeKind, ProcessedContent, Settings,
};

/// Maximum number of hits a content search returns.
pub const SEARCH_RESULT_CAP: usize = 50;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be decoded
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// SQLite-based implementation of `GraphStore`.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path.
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    fn row_to_node(row: &Row<'_>) -> rusqlite::Result<GraphNode> {
        let kind_str: String = row.get(1)?;
        let kind = NodeKind::parse(&kind_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                1,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "unknown node kind: {}",
                    kind_str
                ))),
            )
        })?;

        let mentioned_by_json: String = row.get(8)?;
        let mentioned_by: Vec<String> =
            serde_json::from_str(&mentioned_by_json).map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    8,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(GraphNode {
            id: NodeId::from_raw(row.get::<_, String>(0)?),
            kind,
            label: row.get(2)?,
            url: row.get(3)?,
            summary: row.get(4)?,
            domain: row.get(5)?,
            content_type: row.get(6)?,
            importance: row.get(7)?,
            mentioned_by: mentioned_by.into_iter().map(NodeId::from_raw).collect(),
            created_at: row.get::<_, i64>(9)? as u64,
        })
    }

    fn row_to_edge(row: &Row<'_>) -> rusqlite::Result<GraphEdge> {
        let kind_str: String = row.get(3)?;
        let kind = EdgeKind::parse(&kind_str).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(format!(
                    "unknown edge kind: {}",
                    kind_str
                ))),
            )
        })?;

        Ok(GraphEdge {
            id: EdgeId::from_raw(row.get::<_, String>(0)?),
            source: NodeId::from_raw(row.get::<_, String>(1)?),
            target: NodeId::from_raw(row.get::<_, String>(2)?),
            kind,
            strength: row.get(4)?,
            label: row.get(5)?,
            created_at: row.get::<_, i64>(6)? as u64,
        })
    }

    fn row_to_content(row: &Row<'_>) -> rusqlite::Result<ProcessedContent> {
        let analysis_json: String = row.get(8)?;
        let analysis = serde_json::from_str(&analysis_json).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(8, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(ProcessedContent {
            id: row.get(0)?,
            url: row.get(1)?,
            title: row.get(2)?,
            text: row.get(3)?,
            domain: row.get(4)?,
            content_type: row.get(5)?,
            word_count: row.get::<_, i64>(6)? as usize,
            captured_at: row.get::<_, i64>(7)? as u64,
            analysis,
        })
    }

    fn mentioned_by_json(node: &GraphNode) -> Result<String, StoreError> {
        let raw: Vec<&str> = node.mentioned_by.iter().map(|id| id.as_str()).collect();
        serde_json::to_string(&raw).map_err(|e| StoreError::InvalidData(e.to_string()))
    }
}

impl GraphStore for SqliteStore {
    type Error = StoreError;

    fn upsert_node(&mut self, node: GraphNode) -> Result<(), Self::Error> {
        let mentioned_by = Self::mentioned_by_json(&node)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO nodes
             (id, kind, label, url, summary, domain, content_type, importance, mentioned_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                node.id.as_str(),
                node.kind.as_str(),
                &node.label,
                &node.url,
                &node.summary,
                &node.domain,
                &node.content_type,
                node.importance,
                mentioned_by,
                node.created_at as i64,
            ],
        )?;
        Ok(())
    }

    fn get_node(&self, id: &NodeId) -> Result<Option<GraphNode>, Self::Error> {
        let node = self
            .conn
            .query_row(
                "SELECT id, kind, label, url, summary, domain, content_type, importance, mentioned_by, created_at
                 FROM nodes WHERE id = ?1",
                params![id.as_str()],
                |row| Self::row_to_node(row),
            )
            .optional()?;
        Ok(node)
    }

    fn add_edge(&mut self, edge: GraphEdge) -> Result<bool, Self::Error> {
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO edges (id, source, target, kind, strength, label, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                edge.id.as_str(),
                edge.source.as_str(),
                edge.target.as_str(),
                edge.kind.as_str(),
                edge.strength,
                &edge.label,
                edge.created_at as i64,
            ],
        )?;
        Ok(inserted > 0)
    }

    fn graph_snapshot(&self) -> Result<GraphSnapshot, Self::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, label, url, summary, domain, content_type, importance, mentioned_by, created_at
             FROM nodes",
        )?;
        let nodes = stmt
            .query_map([], |row| Self::row_to_node(row))?
            .collect::<Result<Vec<_>, _>>()?;

        let mut stmt = self.conn.prepare(
            "SELECT id, source, target, kind, strength, label, created_at FROM edges",
        )?;
        let edges = stmt
            .query_map([], |row| Self::row_to_edge(row))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(GraphSnapshot { nodes, edges })
    }

    fn find_content_by_url(&self, url: &str) -> Result<Option<ProcessedContent>, Self::Error> {
        // Lookup goes through the derived id, so URL variants that normalize
        // identically dedup to the same record.
        let id = ProcessedContent::id_for_url(url);
        let content = self
            .conn
            .query_row(
                "SELECT id, url, title, body, domain, content_type, word_count, captured_at, analysis
                 FROM content WHERE id = ?1",
                params![id],
                |row| Self::row_to_content(row),
            )
            .optional()?;
        Ok(content)
    }

    fn store_content(
        &mut self,
        content: ProcessedContent,
        max_entries: usize,
    ) -> Result<(), Self::Error> {
        let analysis = serde_json::to_string(&content.analysis)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;

        self.conn.execute(
            "INSERT OR REPLACE INTO content
             (id, url, title, body, domain, content_type, word_count, captured_at, analysis)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                &content.id,
                &content.url,
                &content.title,
                &content.text,
                &content.domain,
                &content.content_type,
                content.word_count as i64,
                content.captured_at as i64,
                analysis,
            ],
        )?;

        // Trim the archive to the newest `max_entries` records.
        self.conn.execute(
            "DELETE FROM content WHERE id NOT IN
             (SELECT id FROM content ORDER BY captured_at DESC, id LIMIT ?1)",
            params![max_entries as i64],
        )?;

        Ok(())
    }

    fn search_content(&self, query: &str) -> Result<Vec<SearchHit>, Self::Error> {
        let pattern = format!("%{}%", query.to_lowercase());
        let mut stmt = self.conn.prepare(
            "SELECT id, url, title, body, domain, content_type, word_count, captured_at, analysis
             FROM content
             WHERE lower(title) LIKE ?1 OR lower(body) LIKE ?1 OR lower(analysis) LIKE ?1
             ORDER BY captured_at DESC
             LIMIT ?2",
        )?;

        let hits = stmt
            .query_map(params![pattern, SEARCH_RESULT_CAP as i64], |row| {
                let content = Self::row_to_content(row)?;
                Ok(SearchHit {
                    id: content.id,
                    url: content.url,
                    title: content.title,
                    summary: content.analysis.summary,
                    captured_at: content.captured_at,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(hits)
    }

    fn load_settings(&self) -> Result<Settings, Self::Error> {
        let body: Option<String> = self
            .conn
            .query_row("SELECT body FROM settings WHERE id = 0", [], |row| {
                row.get(0)
            })
            .optional()?;

        match body {
            Some(json) => match serde_json::from_str(&json) {
                Ok(settings) => Ok(settings),
                Err(e) => {
                    // A corrupt record must not take the system down; fall
                    // back to defaults and let the next save repair it.
                    warn!("stored settings unreadable, using defaults: {}", e);
                    Ok(Settings::default())
                }
            },
            None => Ok(Settings::default()),
        }
    }

    fn save_settings(&mut self, settings: &Settings) -> Result<(), Self::Error> {
        let body = serde_json::to_string(settings)
            .map_err(|e| StoreError::InvalidData(e.to_string()))?;
        self.conn.execute(
            "INSERT OR REPLACE INTO settings (id, body) VALUES (0, ?1)",
            params![body],
        )?;
        Ok(())
    }

    fn evict_older_than(
        &mut self,
        cutoff: u64,
        cascade: bool,
    ) -> Result<EvictionStats, Self::Error> {
        let content_removed = self.conn.execute(
            "DELETE FROM content WHERE captured_at < ?1",
            params![cutoff as i64],
        )?;

        let nodes_removed = self.conn.execute(
            "DELETE FROM nodes WHERE kind = 'page' AND created_at < ?1",
            params![cutoff as i64],
        )?;

        let edges_removed = if cascade {
            self.conn.execute(
                "DELETE FROM edges WHERE source NOT IN (SELECT id FROM nodes)
                 OR target NOT IN (SELECT id FROM nodes)",
                [],
            )?
        } else {
            0
        };

        Ok(EvictionStats {
            content_removed,
            nodes_removed,
            edges_removed,
        })
    }

    fn last_cleanup(&self) -> Result<Option<u64>, Self::Error> {
        let at: Option<i64> = self
            .conn
            .query_row(
                "SELECT last_cleanup FROM maintenance WHERE id = 0",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(at.map(|t| t as u64))
    }

    fn record_cleanup(&mut self, at: u64) -> Result<(), Self::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO maintenance (id, last_cleanup) VALUES (0, ?1)",
            params![at as i64],
        )?;
        Ok(())
    }
}
