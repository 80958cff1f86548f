//! Helpers shared by every repository that touches `items_tags`

use log::{debug, warn};
use rusqlite::{params, Connection, OptionalExtension};

use crate::config::DeletePolicy;
use crate::domain::{DomainError, DomainResult, EntityKind, StoreId};

pub(crate) fn entity_exists(
    conn: &Connection,
    kind: EntityKind,
    id: i64,
) -> rusqlite::Result<bool> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)", kind.table());
    conn.query_row(&sql, params![id], |row| row.get::<_, i64>(0))
        .map(|found| found != 0)
}

/// Store of an item or tag: `None` if the row is missing, `Some(None)` if it has no store
pub(crate) fn owner_store(
    conn: &Connection,
    kind: EntityKind,
    id: i64,
) -> rusqlite::Result<Option<Option<StoreId>>> {
    let sql = format!("SELECT store_id FROM {} WHERE id = ?1", kind.table());
    conn.query_row(&sql, params![id], |row| row.get::<_, Option<StoreId>>(0))
        .optional()
}

pub(crate) fn count_links(conn: &Connection, kind: EntityKind, id: i64) -> rusqlite::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM items_tags WHERE {} = ?1", kind.link_column());
    conn.query_row(&sql, params![id], |row| row.get(0))
}

/// Delete an item or tag together with whatever the policy says about its links.
///
/// Runs in a single transaction; a refused or failed delete leaves everything in place.
pub(crate) fn delete_owner(
    conn: &mut Connection,
    kind: EntityKind,
    id: i64,
    policy: DeletePolicy,
) -> DomainResult<()> {
    let tx = conn.transaction()?;

    if !entity_exists(&tx, kind, id)? {
        return Err(DomainError::not_found(kind, id));
    }

    let linked = count_links(&tx, kind, id)?;
    if linked > 0 {
        match policy {
            DeletePolicy::Restrict => {
                warn!("Refusing to delete {} {}: {} link(s) remain", kind, id, linked);
                return Err(DomainError::Conflict(format!(
                    "{} {} is still linked to {} tag association(s)",
                    kind, id, linked
                )));
            }
            DeletePolicy::Cascade => {
                let sql = format!("DELETE FROM items_tags WHERE {} = ?1", kind.link_column());
                tx.execute(&sql, params![id])?;
                debug!("Removed {} link(s) of {} {}", linked, kind, id);
            }
        }
    }

    let sql = format!("DELETE FROM {} WHERE id = ?1", kind.table());
    tx.execute(&sql, params![id])?;
    tx.commit()?;
    Ok(())
}

/// Run a single-key query returning one integer column
pub(crate) fn collect_ids(conn: &Connection, sql: &str, key: i64) -> DomainResult<Vec<i64>> {
    let mut stmt = conn.prepare(sql)?;
    let ids = stmt
        .query_map(params![key], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;
    Ok(ids)
}

/// Wrap a user query for `LIKE ... ESCAPE '\'`
pub(crate) fn like_pattern(query: &str) -> String {
    let escaped = query
        .trim()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("red"), "%red%");
        assert_eq!(like_pattern(" 50%_off "), "%50\\%\\_off%");
    }
}
