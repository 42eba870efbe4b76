// src/store/schema.rs

use rusqlite::Connection;

/// Per-item scheduling state plus the two derived flags, and the flat
/// parent → child edge set.
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS item_state (
    id          TEXT PRIMARY KEY,
    stage       INTEGER NOT NULL,
    queue       INTEGER NOT NULL,
    due_date    TEXT,
    raw_due     INTEGER NOT NULL,
    is_blocking INTEGER NOT NULL DEFAULT 0,
    is_blocked  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS edges (
    parent_id TEXT NOT NULL,
    child_id  TEXT NOT NULL,
    PRIMARY KEY (parent_id, child_id)
);

CREATE INDEX IF NOT EXISTS edges_by_parent ON edges(parent_id);
";

pub(crate) fn install_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
