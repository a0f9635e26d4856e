//! Store access and schema convergence.

use crate::error::{Error, Result};
use crate::schema::{target_schema, Schema};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use tracing::{debug, info};

/// Open (creating if needed) the store at `path` and enable foreign keys.
///
/// The parent directory must already exist.
pub fn open_store(path: &Path) -> Result<Connection> {
    let unavailable = |source| Error::StoreUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let conn = Connection::open(path).map_err(unavailable)?;
    conn.pragma_update(None, "foreign_keys", "ON").map_err(unavailable)?;
    Ok(conn)
}

/// Check that an existing store can be opened and its catalog read.
pub fn probe_store(path: &Path) -> Result<()> {
    let unavailable = |source| Error::StoreUnavailable {
        path: path.to_path_buf(),
        source,
    };
    let conn =
        Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY).map_err(unavailable)?;
    conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
        .map_err(unavailable)?;
    Ok(())
}

/// Bring the store up to [`target_schema`] without touching existing data.
pub fn ensure_schema(conn: &mut Connection) -> Result<()> {
    ensure_schema_with(conn, &target_schema())
}

/// Create every object of `schema` that is missing, then commit once.
///
/// Objects that already exist are left as they are, even if their definition
/// differs. If any statement fails nothing from this call is committed.
pub fn ensure_schema_with(conn: &mut Connection, schema: &Schema) -> Result<()> {
    let objects = schema.objects();
    let tx = conn.transaction()?;
    for object in &objects {
        debug!("ensuring {} {}", object.kind, object.name);
        tx.execute_batch(&object.definition)
            .map_err(|source| Error::StatementRejected {
                object: object.name.clone(),
                source,
            })?;
    }
    tx.commit()?;
    info!("Schema ensured ({} objects)", objects.len());
    Ok(())
}

/// Names of user tables, sorted.
pub fn table_names(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let names = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Names of explicitly created indexes on `table`, sorted.
pub fn index_names(conn: &Connection, table: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master \
         WHERE type = 'index' AND tbl_name = ?1 AND sql IS NOT NULL ORDER BY name",
    )?;
    let names = stmt
        .query_map(params![table], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(names)
}

/// Columns covered by `index`, in index order.
pub fn indexed_columns(conn: &Connection, index: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_index_info(?1) ORDER BY seqno")?;
    let columns = stmt
        .query_map(params![index], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(columns)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub table_count: i64,
    pub app_info_count: i64,
}

/// Counts reported after a bootstrap. Expects `app_info` to exist.
pub fn store_stats(conn: &Connection) -> Result<StoreStats> {
    let table_count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get(0),
    )?;
    let app_info_count = conn.query_row("SELECT COUNT(*) FROM app_info", [], |row| row.get(0))?;
    Ok(StoreStats {
        table_count,
        app_info_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnConstraint, ColumnDefinition, DataType, TableDefinition};

    fn create_test_db() -> Result<Connection> {
        let mut conn = Connection::open_in_memory()?;
        ensure_schema(&mut conn)?;
        Ok(conn)
    }

    #[test]
    fn test_in_memory_convergence() {
        let conn = create_test_db().unwrap();
        assert_eq!(table_names(&conn).unwrap(), vec!["app_info", "tasks", "users"]);
        assert_eq!(
            index_names(&conn, "tasks").unwrap(),
            vec!["idx_tasks_completed", "idx_tasks_updated_at"]
        );
    }

    #[test]
    fn test_indexed_columns() {
        let conn = create_test_db().unwrap();
        assert_eq!(
            indexed_columns(&conn, "idx_tasks_updated_at").unwrap(),
            vec!["updated_at"]
        );
    }

    #[test]
    fn test_stats_after_convergence() {
        let conn = create_test_db().unwrap();
        let stats = store_stats(&conn).unwrap();
        assert_eq!(stats.table_count, 3);
        assert_eq!(stats.app_info_count, 0);
    }

    #[test]
    fn test_rejected_statement_rolls_back() {
        let mut conn = Connection::open_in_memory().unwrap();
        // a column named like a keyword without quoting is rejected by the parser
        let schema = Schema::new()
            .add_table(
                TableDefinition::new("first")
                    .with_column(ColumnDefinition::new("id", DataType::Integer)),
            )
            .add_table(
                TableDefinition::new("second").with_column(
                    ColumnDefinition::new("select", DataType::Text)
                        .with_constraint(ColumnConstraint::NotNull),
                ),
            );

        let err = ensure_schema_with(&mut conn, &schema).unwrap_err();
        match err {
            Error::StatementRejected { object, .. } => assert_eq!(object, "second"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(table_names(&conn).unwrap().is_empty());
    }
}
