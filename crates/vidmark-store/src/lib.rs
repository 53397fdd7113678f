//! Marker persistence for the vidmark service.
//!
//! [`MarkerStore`] mediates all access to the `video_markers` table. It holds
//! the connection pool as an injected handle — constructed once at startup,
//! passed in, and drained on shutdown — rather than as process-global state.
//! Each operation checks out one pooled connection for its duration; the
//! checkout is an RAII guard, so the connection is returned on every exit
//! path, including errors.
//!
//! The store is blocking (rusqlite is synchronous). Async callers wrap each
//! call in `tokio::task::spawn_blocking`.

use r2d2::PooledConnection;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Row};
use thiserror::Error;
use vidmark_db::DbPool;
use vidmark_types::{Marker, MarkerFields, NewMarker};

/// Errors that can occur during marker store operations.
///
/// The store never swallows an error: the pooled connection is released and
/// the failure is re-raised to the caller with its diagnostic text intact.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No pooled connection became available.
    #[error("connection checkout failed: {0}")]
    Checkout(#[from] r2d2::Error),

    /// A SQL statement failed — constraint violations (duplicate id, missing
    /// required field, negative seconds) surface here.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// Table accessor for markers.
///
/// Cloning is cheap; clones share the same underlying pool.
#[derive(Clone)]
pub struct MarkerStore {
    pool: DbPool,
}

impl MarkerStore {
    /// Wraps an already-initialized connection pool. The schema must exist
    /// before the first operation (see `vidmark_db::run_migrations`).
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, StoreError> {
        Ok(self.pool.get()?)
    }

    /// Inserts a new marker row. The database assigns `created`.
    ///
    /// Fails if the id already exists or a required field violates the
    /// schema constraints.
    pub fn create(&self, marker: &NewMarker) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO video_markers (id, title, url, seconds, note)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                marker.id,
                marker.title,
                marker.url,
                marker.seconds,
                marker.note
            ],
        )?;
        Ok(())
    }

    /// Returns every marker, newest first. An empty table is not an error.
    pub fn list_all(&self) -> Result<Vec<Marker>, StoreError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, title, url, seconds, note, created
             FROM video_markers
             ORDER BY created DESC",
        )?;

        let rows = stmt.query_map([], map_row_to_marker)?;
        let mut markers = Vec::new();
        for row in rows {
            markers.push(row?);
        }
        Ok(markers)
    }

    /// Replaces `title`, `url`, `seconds`, and `note` for the row matching
    /// `id`. Returns the number of rows affected; zero means no row matched,
    /// which is a successful no-op, not an error. `id` and `created` are
    /// never touched.
    pub fn update(&self, id: &str, fields: &MarkerFields) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let affected = conn.execute(
            "UPDATE video_markers
             SET title = ?1, url = ?2, seconds = ?3, note = ?4
             WHERE id = ?5",
            params![fields.title, fields.url, fields.seconds, fields.note, id],
        )?;
        Ok(affected)
    }

    /// Removes the row matching `id`. Returns the number of rows affected;
    /// zero (already absent) is a successful no-op.
    pub fn delete(&self, id: &str) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let affected = conn.execute("DELETE FROM video_markers WHERE id = ?1", [id])?;
        Ok(affected)
    }

    /// Explicit shutdown: consumes this handle and drops its pool reference.
    ///
    /// Once every clone has been consumed or dropped, outstanding checkouts
    /// are returned and the connections close.
    pub fn drain(self) {
        let state = self.pool.state();
        tracing::info!(
            connections = state.connections,
            idle = state.idle_connections,
            "draining marker store pool"
        );
        drop(self.pool);
    }
}

fn map_row_to_marker(row: &Row<'_>) -> rusqlite::Result<Marker> {
    Ok(Marker {
        id: row.get(0)?,
        title: row.get(1)?,
        url: row.get(2)?,
        seconds: row.get(3)?,
        note: row.get(4)?,
        created: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vidmark_db::{create_pool, run_migrations, DbRuntimeSettings};

    fn test_store() -> (MarkerStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("should create temp dir");
        let db_path = dir.path().join("markers.db");
        let pool = create_pool(db_path.to_str().unwrap(), DbRuntimeSettings::default())
            .expect("pool creation should succeed");
        {
            let conn = pool.get().expect("should get a connection");
            run_migrations(&conn).expect("migrations should succeed");
        }
        (MarkerStore::new(pool), dir)
    }

    fn sample(id: &str) -> NewMarker {
        NewMarker {
            id: id.to_string(),
            title: Some("Intro".to_string()),
            url: "https://youtu.be/x".to_string(),
            seconds: 75,
            note: Some("the good part".to_string()),
        }
    }

    #[test]
    fn create_then_list_round_trip() {
        let (store, _dir) = test_store();

        store.create(&sample("m1")).expect("create should succeed");

        let markers = store.list_all().expect("list should succeed");
        assert_eq!(markers.len(), 1);
        let m = &markers[0];
        assert_eq!(m.id, "m1");
        assert_eq!(m.title.as_deref(), Some("Intro"));
        assert_eq!(m.url, "https://youtu.be/x");
        assert_eq!(m.seconds, 75);
        assert_eq!(m.note.as_deref(), Some("the good part"));
        assert!(!m.created.is_empty(), "created should be server-assigned");
    }

    #[test]
    fn list_on_empty_table_is_ok() {
        let (store, _dir) = test_store();
        let markers = store.list_all().expect("empty list is not an error");
        assert!(markers.is_empty());
    }

    #[test]
    fn create_duplicate_id_fails() {
        let (store, _dir) = test_store();

        store.create(&sample("m1")).expect("first create should succeed");
        let err = store
            .create(&sample("m1"))
            .expect_err("duplicate id should fail");
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn create_negative_seconds_fails_at_database_level() {
        let (store, _dir) = test_store();

        let mut marker = sample("m1");
        marker.seconds = -5;
        let err = store
            .create(&marker)
            .expect_err("negative seconds should violate the CHECK constraint");
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn update_replaces_fields_and_preserves_identity() {
        let (store, _dir) = test_store();
        store.create(&sample("m1")).expect("create should succeed");
        let before = store.list_all().expect("list should succeed")[0].clone();

        let fields = MarkerFields {
            title: None,
            url: "https://youtu.be/y".to_string(),
            seconds: 90,
            note: None,
        };
        let affected = store.update("m1", &fields).expect("update should succeed");
        assert_eq!(affected, 1);

        let after = store.list_all().expect("list should succeed")[0].clone();
        assert_eq!(after.id, "m1");
        assert_eq!(after.created, before.created, "created must not change");
        assert_eq!(after.title, None);
        assert_eq!(after.url, "https://youtu.be/y");
        assert_eq!(after.seconds, 90);
        assert_eq!(after.note, None);
    }

    #[test]
    fn update_missing_id_is_a_noop() {
        let (store, _dir) = test_store();

        let fields = MarkerFields {
            title: None,
            url: "https://youtu.be/y".to_string(),
            seconds: 90,
            note: None,
        };
        let affected = store
            .update("no-such-id", &fields)
            .expect("zero rows affected is not an error");
        assert_eq!(affected, 0);
    }

    #[test]
    fn delete_twice_second_is_a_noop() {
        let (store, _dir) = test_store();
        store.create(&sample("m1")).expect("create should succeed");

        assert_eq!(store.delete("m1").expect("first delete"), 1);
        assert_eq!(store.delete("m1").expect("second delete is a no-op"), 0);
        assert!(store.list_all().expect("list").is_empty());
    }

    #[test]
    fn list_orders_by_created_descending() {
        let (store, _dir) = test_store();

        // Insert with explicit timestamps so the ordering is controlled.
        let conn = store.conn().expect("should get a connection");
        for (id, created) in [
            ("oldest", "2026-01-01T00:00:00.000Z"),
            ("newest", "2026-03-01T00:00:00.000Z"),
            ("middle", "2026-02-01T00:00:00.000Z"),
        ] {
            conn.execute(
                "INSERT INTO video_markers (id, url, seconds, created)
                 VALUES (?1, 'https://example.com/v', 1, ?2)",
                params![id, created],
            )
            .expect("insert should succeed");
        }
        drop(conn);

        let ids: Vec<String> = store
            .list_all()
            .expect("list should succeed")
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["newest", "middle", "oldest"]);
    }
}
