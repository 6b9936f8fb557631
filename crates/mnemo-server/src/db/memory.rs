// db/memory.rs
// Memory storage and retrieval operations

use mnemo_types::{AccessMatch, DEFAULT_CATEGORY, MemoryRecord, MemoryView};
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;

/// Keys per access-tracking UPDATE, kept below SQLite's bound-variable limit
const ACCESS_BATCH: usize = 500;

/// Columns shared by the listing and search queries, in `parse_memory_view_row` order
const VIEW_COLUMNS: &str = "id, content, COALESCE(category, 'general'), COALESCE(stored_at, ''), \
                            COALESCE(access_count, 0)";

/// Parse a `VIEW_COLUMNS` row into (row id, view)
pub fn parse_memory_view_row(row: &rusqlite::Row) -> rusqlite::Result<(i64, MemoryView)> {
    Ok((
        row.get(0)?,
        MemoryView {
            content: row.get(1)?,
            category: row.get(2)?,
            stored_at: row.get(3)?,
            access_count: row.get(4)?,
        },
    ))
}

/// Insert a memory and return its row id
pub fn store_memory_sync(
    conn: &Connection,
    content: &str,
    category: &str,
    stored_at: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO memories (content, category, stored_at, access_count)
         VALUES (?1, ?2, ?3, 0)",
        params![content, category, stored_at],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recently stored memories, newest first, with access tracking.
///
/// Every returned row gets `access_count + 1` and `last_accessed = now` in the
/// same transaction as the read. The returned views hold the counts as they
/// were before the update.
pub fn recent_memories_sync(
    conn: &Connection,
    limit: i64,
    category: Option<&str>,
    access_match: AccessMatch,
    now: &str,
) -> rusqlite::Result<Vec<MemoryView>> {
    let tx = conn.unchecked_transaction()?;

    let rows = {
        let sql = format!(
            "SELECT {VIEW_COLUMNS} FROM memories
             WHERE (?1 IS NULL OR category = ?1)
             ORDER BY stored_at DESC, id DESC
             LIMIT ?2"
        );
        let mut stmt = tx.prepare(&sql)?;
        stmt.query_map(params![category, limit], parse_memory_view_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
    };

    if !rows.is_empty() {
        record_access(&tx, &rows, access_match, now)?;
    }
    tx.commit()?;

    Ok(rows.into_iter().map(|(_, view)| view).collect())
}

/// Bump access counters for the rows a listing returned.
///
/// `Content` mode touches every row whose content equals a returned one.
/// Keys are deduplicated before batching, so each matching row is bumped
/// exactly once per call however many returned views share its content.
fn record_access(
    conn: &Connection,
    rows: &[(i64, MemoryView)],
    access_match: AccessMatch,
    now: &str,
) -> rusqlite::Result<usize> {
    let (column, keys): (&str, Vec<Value>) = match access_match {
        AccessMatch::Content => {
            let contents: BTreeSet<&str> =
                rows.iter().map(|(_, view)| view.content.as_str()).collect();
            (
                "content",
                contents
                    .into_iter()
                    .map(|c| Value::Text(c.to_string()))
                    .collect(),
            )
        }
        AccessMatch::Id => ("id", rows.iter().map(|(id, _)| Value::Integer(*id)).collect()),
    };

    let mut updated = 0;
    for chunk in keys.chunks(ACCESS_BATCH) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!(
            "UPDATE memories
             SET access_count = COALESCE(access_count, 0) + 1, last_accessed = ?
             WHERE {column} IN ({placeholders})"
        );

        let mut values: Vec<Value> = Vec::with_capacity(chunk.len() + 1);
        values.push(Value::Text(now.to_string()));
        values.extend(chunk.iter().cloned());

        updated += conn.execute(&sql, rusqlite::params_from_iter(values))?;
    }
    Ok(updated)
}

/// Substring search over content, newest first. Read-only.
///
/// Plain SQLite LIKE: ASCII case-insensitive, `%` and `_` in the query are wildcards.
pub fn search_memories_sync(
    conn: &Connection,
    query: &str,
    limit: i64,
) -> rusqlite::Result<Vec<MemoryView>> {
    let sql = format!(
        "SELECT {VIEW_COLUMNS} FROM memories
         WHERE content LIKE ?1
         ORDER BY stored_at DESC, id DESC
         LIMIT ?2"
    );
    let pattern = format!("%{}%", query);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![pattern, limit], |row| {
            parse_memory_view_row(row).map(|(_, view)| view)
        })?
        .collect();
    rows
}

/// Fetch a full record by id
pub fn get_memory_sync(conn: &Connection, id: i64) -> rusqlite::Result<Option<MemoryRecord>> {
    conn.query_row(
        "SELECT id, content, COALESCE(category, ?2), COALESCE(stored_at, ''), last_accessed,
                COALESCE(access_count, 0)
         FROM memories WHERE id = ?1",
        params![id, DEFAULT_CATEGORY],
        |row| {
            Ok(MemoryRecord {
                id: row.get(0)?,
                content: row.get(1)?,
                category: row.get(2)?,
                stored_at: row.get(3)?,
                last_accessed: row.get(4)?,
                access_count: row.get(5)?,
            })
        },
    )
    .optional()
}

/// Total number of stored memories
pub fn count_memories_sync(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM memories", [], |row| row.get(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::run_migrations;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    fn ts(n: u32) -> String {
        format!("2025-03-01T10:00:{:02}.000000", n)
    }

    #[test]
    fn test_store_and_get() {
        let conn = setup();
        let id = store_memory_sync(&conn, "likes rust", "preferences", &ts(1)).unwrap();

        let record = get_memory_sync(&conn, id).unwrap().unwrap();
        assert_eq!(record.content, "likes rust");
        assert_eq!(record.category, "preferences");
        assert_eq!(record.stored_at, ts(1));
        assert_eq!(record.last_accessed, None);
        assert_eq!(record.access_count, 0);

        assert!(get_memory_sync(&conn, id + 100).unwrap().is_none());
    }

    #[test]
    fn test_store_accepts_empty_content() {
        let conn = setup();
        store_memory_sync(&conn, "", "general", &ts(1)).unwrap();
        assert_eq!(count_memories_sync(&conn).unwrap(), 1);
    }

    #[test]
    fn test_recent_orders_newest_first_and_limits() {
        let conn = setup();
        for i in 1..=4 {
            store_memory_sync(&conn, &format!("m{i}"), "general", &ts(i)).unwrap();
        }

        let views = recent_memories_sync(&conn, 2, None, AccessMatch::Content, &ts(50)).unwrap();
        let contents: Vec<_> = views.iter().map(|v| v.content.as_str()).collect();
        assert_eq!(contents, vec!["m4", "m3"]);
    }

    #[test]
    fn test_recent_ties_break_by_insert_order() {
        let conn = setup();
        store_memory_sync(&conn, "first", "general", &ts(1)).unwrap();
        store_memory_sync(&conn, "second", "general", &ts(1)).unwrap();

        let views = recent_memories_sync(&conn, 5, None, AccessMatch::Content, &ts(50)).unwrap();
        assert_eq!(views[0].content, "second");
        assert_eq!(views[1].content, "first");
    }

    #[test]
    fn test_recent_filters_by_category() {
        let conn = setup();
        store_memory_sync(&conn, "a1", "a", &ts(1)).unwrap();
        store_memory_sync(&conn, "b1", "b", &ts(2)).unwrap();
        store_memory_sync(&conn, "a2", "a", &ts(3)).unwrap();

        let views =
            recent_memories_sync(&conn, 10, Some("a"), AccessMatch::Content, &ts(50)).unwrap();
        assert_eq!(views.len(), 2);
        assert!(views.iter().all(|v| v.category == "a"));
    }

    #[test]
    fn test_recent_updates_access_after_reading() {
        let conn = setup();
        let id = store_memory_sync(&conn, "tracked", "general", &ts(1)).unwrap();

        let views = recent_memories_sync(&conn, 5, None, AccessMatch::Content, &ts(9)).unwrap();
        assert_eq!(views[0].access_count, 0);

        let record = get_memory_sync(&conn, id).unwrap().unwrap();
        assert_eq!(record.access_count, 1);
        assert_eq!(record.last_accessed.as_deref(), Some(ts(9).as_str()));

        let views = recent_memories_sync(&conn, 5, None, AccessMatch::Content, &ts(10)).unwrap();
        assert_eq!(views[0].access_count, 1);
        assert_eq!(get_memory_sync(&conn, id).unwrap().unwrap().access_count, 2);
    }

    #[test]
    fn test_content_match_touches_duplicates() {
        let conn = setup();
        let older = store_memory_sync(&conn, "same", "general", &ts(1)).unwrap();
        let newer = store_memory_sync(&conn, "same", "general", &ts(2)).unwrap();

        let views = recent_memories_sync(&conn, 1, None, AccessMatch::Content, &ts(9)).unwrap();
        assert_eq!(views.len(), 1);

        assert_eq!(get_memory_sync(&conn, older).unwrap().unwrap().access_count, 1);
        assert_eq!(get_memory_sync(&conn, newer).unwrap().unwrap().access_count, 1);
    }

    #[test]
    fn test_content_match_counts_duplicates_once_per_call() {
        let conn = setup();
        let a = store_memory_sync(&conn, "same", "general", &ts(1)).unwrap();
        let b = store_memory_sync(&conn, "same", "general", &ts(2)).unwrap();

        let views = recent_memories_sync(&conn, 5, None, AccessMatch::Content, &ts(9)).unwrap();
        assert_eq!(views.len(), 2);

        assert_eq!(get_memory_sync(&conn, a).unwrap().unwrap().access_count, 1);
        assert_eq!(get_memory_sync(&conn, b).unwrap().unwrap().access_count, 1);
    }

    #[test]
    fn test_id_match_touches_only_returned_rows() {
        let conn = setup();
        let older = store_memory_sync(&conn, "same", "general", &ts(1)).unwrap();
        let newer = store_memory_sync(&conn, "same", "general", &ts(2)).unwrap();

        recent_memories_sync(&conn, 1, None, AccessMatch::Id, &ts(9)).unwrap();

        let older = get_memory_sync(&conn, older).unwrap().unwrap();
        assert_eq!(older.access_count, 0);
        assert_eq!(older.last_accessed, None);
        assert_eq!(get_memory_sync(&conn, newer).unwrap().unwrap().access_count, 1);
    }

    #[test]
    fn test_recent_limit_zero_and_negative() {
        let conn = setup();
        for i in 1..=3 {
            store_memory_sync(&conn, &format!("m{i}"), "general", &ts(i)).unwrap();
        }

        let none = recent_memories_sync(&conn, 0, None, AccessMatch::Content, &ts(50)).unwrap();
        assert!(none.is_empty());

        let all = recent_memories_sync(&conn, -1, None, AccessMatch::Content, &ts(50)).unwrap();
        assert_eq!(all.len(), 3);
    }

    #[test]
    fn test_recent_reads_null_category_as_general() {
        let conn = setup();
        conn.execute(
            "INSERT INTO memories (content, category, stored_at) VALUES ('legacy', NULL, ?1)",
            [ts(1)],
        )
        .unwrap();

        let views = recent_memories_sync(&conn, 5, None, AccessMatch::Content, &ts(50)).unwrap();
        assert_eq!(views[0].category, "general");
    }

    #[test]
    fn test_access_tracking_spans_batches() {
        let conn = setup();
        let total = ACCESS_BATCH as u32 + 7;
        for i in 0..total {
            store_memory_sync(&conn, &format!("note {i}"), "bulk", &ts(i % 60)).unwrap();
        }

        let views = recent_memories_sync(&conn, -1, None, AccessMatch::Id, &ts(59)).unwrap();
        assert_eq!(views.len(), total as usize);

        let untouched: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM memories WHERE access_count = 0",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(untouched, 0);
    }

    #[test]
    fn test_duplicates_in_separate_batches_bumped_once() {
        let conn = setup();
        let oldest = store_memory_sync(&conn, "dup", "general", &ts(0)).unwrap();
        for i in 0..ACCESS_BATCH {
            store_memory_sync(&conn, &format!("filler {i}"), "general", &ts(1)).unwrap();
        }
        let newest = store_memory_sync(&conn, "dup", "general", &ts(2)).unwrap();

        let views = recent_memories_sync(&conn, -1, None, AccessMatch::Content, &ts(3)).unwrap();
        assert_eq!(views.len(), ACCESS_BATCH + 2);

        assert_eq!(get_memory_sync(&conn, oldest).unwrap().unwrap().access_count, 1);
        assert_eq!(get_memory_sync(&conn, newest).unwrap().unwrap().access_count, 1);

        let over_counted: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM memories WHERE access_count != 1",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(over_counted, 0);
    }

    #[test]
    fn test_search_is_substring_and_read_only() {
        let conn = setup();
        let id = store_memory_sync(&conn, "Uses PostgreSQL in prod", "infra", &ts(1)).unwrap();
        store_memory_sync(&conn, "Prefers vim", "preferences", &ts(2)).unwrap();

        let views = search_memories_sync(&conn, "postgres", 5).unwrap();
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].content, "Uses PostgreSQL in prod");

        let record = get_memory_sync(&conn, id).unwrap().unwrap();
        assert_eq!(record.access_count, 0);
        assert_eq!(record.last_accessed, None);
    }

    #[test]
    fn test_search_wildcards_and_limit() {
        let conn = setup();
        for i in 1..=3 {
            store_memory_sync(&conn, &format!("item_{i}"), "general", &ts(i)).unwrap();
        }
        store_memory_sync(&conn, "itemX", "general", &ts(4)).unwrap();

        // `_` matches any single character
        assert_eq!(search_memories_sync(&conn, "item_", 10).unwrap().len(), 4);

        let limited = search_memories_sync(&conn, "item", 2).unwrap();
        assert_eq!(limited.len(), 2);
        assert_eq!(limited[0].content, "itemX");
    }

    #[test]
    fn test_search_no_match() {
        let conn = setup();
        store_memory_sync(&conn, "something", "general", &ts(1)).unwrap();
        assert!(search_memories_sync(&conn, "nothing-like-this", 5).unwrap().is_empty());
    }
}
