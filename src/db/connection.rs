use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

use crate::errors::ServerError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Thread-local connection slots, one per database file.
thread_local! {
    static DB_CONNS: RefCell<HashMap<PathBuf, Connection>> = RefCell::new(HashMap::new());
}

/// Handle to the session database. Cheap to clone (path only); each worker
/// thread opens its own connection on first use.
#[derive(Clone, Debug)]
pub struct Database {
    path: PathBuf,
}

impl Database {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut slots = cell.borrow_mut();
                if !slots.contains_key(&self.path) {
                    let conn = Connection::open(&self.path)
                        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
                    slots.insert(self.path.clone(), conn);
                }
                let conn = slots
                    .get_mut(&self.path)
                    .ok_or(ServerError::InternalError)?;
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

/// Apply the bundled schema. Safe to run on every start.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
    })?;

    log::info!("session database ready at {}", db.path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_is_idempotent_and_creates_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("s.sqlite3"));
        init_db(&db).unwrap();
        init_db(&db).unwrap();

        let count: i64 = db
            .with_conn(|conn| {
                conn.query_row("select count(*) from sessions", [], |r| r.get(0))
                    .map_err(|e| ServerError::DbError(e.to_string()))
            })
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn separate_paths_get_separate_connections() {
        let dir = tempfile::tempdir().unwrap();
        let a = Database::new(dir.path().join("a.sqlite3"));
        let b = Database::new(dir.path().join("b.sqlite3"));
        init_db(&a).unwrap();

        // b never had the schema applied
        let res = b.with_conn(|conn| {
            conn.query_row("select count(*) from sessions", [], |r| r.get::<_, i64>(0))
                .map_err(|e| ServerError::DbError(e.to_string()))
        });
        assert!(res.is_err());
    }
}
