// src/store/sqlite.rs

use std::collections::BTreeSet;
use std::path::Path;
use std::time::Duration;

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info};

use crate::errors::Result;
use crate::store::schema::install_schema;
use crate::types::{DueDate, Edge, ItemId, ItemState, QueueStatus, Stage};

const ITEM_COLUMNS: &str = "id, stage, queue, due_date, raw_due, is_blocking, is_blocked";

/// SQLite-backed state store: the `item_state` and `edges` tables.
///
/// Every multi-row write runs inside a single transaction, so readers on
/// other connections see either the old or the new table contents.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Create a fresh store at `path`, deleting any existing database.
    ///
    /// Used by full rebuilds: stale items and edges from a previous layout
    /// must not survive.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        if path.exists() {
            info!(path = ?path, "removing existing graph database");
            std::fs::remove_file(path)?;
        }
        Self::open(path)
    }

    /// Open (or create) the store at `path` without discarding data.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        install_schema(&conn)?;
        debug!(path = ?path, "opened graph database");
        Ok(Self { conn })
    }

    /// Private in-memory store, mostly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        install_schema(&conn)?;
        Ok(Self { conn })
    }

    // ---- edges -------------------------------------------------------------

    /// Atomically replace the whole edge set.
    pub fn replace_edges<'a, I>(&mut self, edges: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM edges", [])?;
        let mut inserted = 0;
        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO edges (parent_id, child_id) VALUES (?1, ?2)")?;
            for edge in edges {
                inserted += stmt.execute(params![edge.parent, edge.child])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// All edges, ordered by (parent, child).
    pub fn edges(&self) -> Result<Vec<Edge>> {
        let mut stmt = self
            .conn
            .prepare("SELECT parent_id, child_id FROM edges ORDER BY parent_id, child_id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Edge::new(row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // ---- item state --------------------------------------------------------

    /// Atomically replace all item rows with `states`.
    ///
    /// Rows whose id is in `keep` survive untouched unless `states` also
    /// contains that id; every other existing row is dropped.
    pub fn replace_states(&mut self, states: &[ItemState], keep: &BTreeSet<ItemId>) -> Result<()> {
        let tx = self.conn.transaction()?;

        let mut preserved = Vec::new();
        {
            let mut stmt = tx.prepare(&format!(
                "SELECT {ITEM_COLUMNS} FROM item_state WHERE id = ?1"
            ))?;
            for id in keep.iter() {
                if let Some(row) = stmt.query_row(params![id], row_to_state).optional()? {
                    preserved.push(row);
                }
            }
        }

        tx.execute("DELETE FROM item_state", [])?;
        {
            let mut stmt = tx.prepare(&format!(
                "INSERT OR REPLACE INTO item_state ({ITEM_COLUMNS}) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ))?;
            for state in preserved.iter().chain(states.iter()) {
                stmt.execute(params![
                    state.id,
                    state.stage.code(),
                    state.queue_status.code(),
                    state.due_date.map(|d| d.to_iso()),
                    state.raw_due,
                    state.is_blocking,
                    state.is_blocked,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    /// Insert or update one item's scheduling fields.
    ///
    /// Existing `is_blocking` / `is_blocked` values are left as they are.
    pub fn upsert_state(&mut self, state: &ItemState) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "INSERT INTO item_state (id, stage, queue, due_date, raw_due, is_blocking, is_blocked) \
             VALUES (?1, ?2, ?3, ?4, ?5, 0, 0) \
             ON CONFLICT(id) DO UPDATE SET \
                 stage = excluded.stage, \
                 queue = excluded.queue, \
                 due_date = excluded.due_date, \
                 raw_due = excluded.raw_due",
            params![
                state.id,
                state.stage.code(),
                state.queue_status.code(),
                state.due_date.map(|d| d.to_iso()),
                state.raw_due,
            ],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn get_state(&self, id: &str) -> Result<Option<ItemState>> {
        let state = self
            .conn
            .query_row(
                &format!("SELECT {ITEM_COLUMNS} FROM item_state WHERE id = ?1"),
                params![id],
                row_to_state,
            )
            .optional()?;
        Ok(state)
    }

    /// All item rows, ordered by id.
    pub fn all_states(&self) -> Result<Vec<ItemState>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {ITEM_COLUMNS} FROM item_state ORDER BY id"))?;
        let rows = stmt.query_map([], row_to_state)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    pub fn item_count(&self) -> Result<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM item_state", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    // ---- derived flags -----------------------------------------------------

    /// Write `is_blocking` for every listed item in one transaction.
    pub fn write_blocking_flags(&mut self, flags: &[(ItemId, bool)]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare("UPDATE item_state SET is_blocking = ?1 WHERE id = ?2")?;
            for (id, blocking) in flags.iter() {
                stmt.execute(params![blocking, id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Reset `is_blocked` everywhere, then set it on `blocked`, as one
    /// transaction. Ids without a state row are ignored.
    pub fn write_blocked_flags(&mut self, blocked: &BTreeSet<ItemId>) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("UPDATE item_state SET is_blocked = 0", [])?;
        {
            let mut stmt = tx.prepare("UPDATE item_state SET is_blocked = 1 WHERE id = ?1")?;
            for id in blocked.iter() {
                stmt.execute(params![id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

fn row_to_state(row: &Row<'_>) -> rusqlite::Result<ItemState> {
    let stage_code: i64 = row.get(1)?;
    let stage = Stage::from_code(stage_code).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            1,
            Type::Integer,
            format!("unknown stage code {stage_code}").into(),
        )
    })?;

    let due_date = match row.get::<_, Option<String>>(3)? {
        Some(text) => Some(text.parse::<DueDate>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, Type::Text, e.into())
        })?),
        None => None,
    };

    Ok(ItemState {
        id: row.get(0)?,
        stage,
        queue_status: QueueStatus::from_code(row.get(2)?),
        due_date,
        raw_due: row.get(4)?,
        is_blocking: row.get(5)?,
        is_blocked: row.get(6)?,
    })
}
