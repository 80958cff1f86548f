//! Database Connection and Setup
//!
//! Manages SQLite database connection and migrations.

use log::info;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::StoreConfig;
use crate::domain::DomainResult;

/// Database state wrapper
pub struct DbState {
    conn: Arc<Mutex<Connection>>,
    db_path: PathBuf,
}

impl DbState {
    /// Shared handle to the connection; every repository locks the same one
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

/// Open the configured database and bring its schema up to date
pub fn init_db(config: &StoreConfig) -> DomainResult<DbState> {
    config.validate()?;

    let conn = if config.is_in_memory() {
        Connection::open_in_memory()?
    } else {
        Connection::open(&config.db_path)?
    };

    if config.enforce_references {
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    }

    run_migrations(&conn)?;
    info!("Database ready at {}", config.db_path.display());

    Ok(DbState {
        conn: Arc::new(Mutex::new(conn)),
        db_path: config.db_path.clone(),
    })
}

/// Check if a column exists in a table
fn column_exists(conn: &Connection, table: &str, column: &str) -> DomainResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let names = stmt.query_map([], |row| row.get::<_, String>(1))?;
    for name in names {
        if name? == column {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Add a column to an existing table unless it is already there
fn add_column_if_missing(
    conn: &Connection,
    table: &str,
    column: &str,
    declaration: &str,
) -> DomainResult<()> {
    if !column_exists(conn, table, column)? {
        conn.execute(
            &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, declaration),
            [],
        )?;
        info!("Added column {}.{}", table, column);
    }
    Ok(())
}

/// Run database migrations
fn run_migrations(conn: &Connection) -> DomainResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS items (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price REAL,
            store_id INTEGER,
            created_at INTEGER
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            color TEXT,
            store_id INTEGER,
            created_at INTEGER
        )",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS items_tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            item_id INTEGER NOT NULL REFERENCES items(id),
            tag_id INTEGER NOT NULL REFERENCES tags(id)
        )",
        [],
    )?;

    // Tables created by older versions lack some columns
    add_column_if_missing(conn, "items", "price", "REAL")?;
    add_column_if_missing(conn, "items", "store_id", "INTEGER")?;
    add_column_if_missing(conn, "items", "created_at", "INTEGER")?;
    add_column_if_missing(conn, "tags", "color", "TEXT")?;
    add_column_if_missing(conn, "tags", "store_id", "INTEGER")?;
    add_column_if_missing(conn, "tags", "created_at", "INTEGER")?;

    // Older databases spelled the item column `items_id`
    let legacy_item_column = column_exists(conn, "items_tags", "items_id")?
        && !column_exists(conn, "items_tags", "item_id")?;
    if legacy_item_column {
        conn.execute("ALTER TABLE items_tags RENAME COLUMN items_id TO item_id", [])?;
        info!("Migrated items_tags.items_id to item_id");
    }

    // Legacy link columns were nullable; a half-empty link points nowhere
    let dropped = conn.execute(
        "DELETE FROM items_tags WHERE item_id IS NULL OR tag_id IS NULL",
        [],
    )?;
    if dropped > 0 {
        info!("Dropped {} incomplete item-tag link(s)", dropped);
    }

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_items_tags_item ON items_tags(item_id)",
        [],
    )?;
    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_items_tags_tag ON items_tags(tag_id)",
        [],
    )?;

    Ok(())
}
