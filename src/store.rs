// src/store.rs

use std::path::Path;

use rusqlite::{params, Connection};
use tracing::info;

use crate::error::{EtlError, Result};
use crate::model::Record;

/// Open (or create) the single-file database at `path`.
pub fn open(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    let conn =
        Connection::open(path).map_err(|e| EtlError::storage(path.display().to_string(), e))?;
    info!(path = %path.display(), "sql connection initiated");
    Ok(conn)
}

/// Close `conn`, surfacing the close error instead of dropping it silently.
pub fn close(conn: Connection) -> Result<()> {
    conn.close()
        .map_err(|(_, e)| EtlError::storage("database connection", e))
}

/// Only plain identifiers reach the SQL text.
fn check_table_name(name: &str) -> Result<()> {
    let mut chars = name.chars();
    let ok = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if ok {
        Ok(())
    } else {
        Err(EtlError::storage(
            format!("table {:?}", name),
            "table name must be a plain identifier",
        ))
    }
}

/// Replace `table_name` with the contents of `table`.
///
/// The old table is dropped and recreated with `name TEXT, value_billions
/// REAL`, never merged. Everything runs in one transaction, so a failed
/// load leaves the previous table untouched.
#[tracing::instrument(level = "info", skip(conn, table), fields(rows = table.len()))]
pub fn load_table(conn: &mut Connection, table_name: &str, table: &[Record]) -> Result<usize> {
    check_table_name(table_name)?;
    let target = format!("table {}", table_name);
    let to_storage = |e: rusqlite::Error| EtlError::storage(target.clone(), e);

    let tx = conn.transaction().map_err(to_storage)?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {t};
         CREATE TABLE {t} (name TEXT, value_billions REAL);",
        t = table_name
    ))
    .map_err(to_storage)?;

    let mut count = 0;
    {
        let mut stmt = tx
            .prepare(&format!(
                "INSERT INTO {} (name, value_billions) VALUES (?1, ?2)",
                table_name
            ))
            .map_err(to_storage)?;
        for rec in table {
            count += stmt
                .execute(params![rec.name, rec.value_billions])
                .map_err(to_storage)?;
        }
    }
    tx.commit().map_err(to_storage)?;

    info!(rows = count, "loaded {}", table_name);
    Ok(count)
}
