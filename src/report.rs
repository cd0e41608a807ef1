// src/report.rs

use std::fmt;

use rusqlite::{types::Value, Connection};
use tracing::info;

use crate::error::{EtlError, Result};

/// Column names and every row a query returned, in result order.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Execute `sql` and collect the full result set.
#[tracing::instrument(level = "info", skip(conn))]
pub fn query(conn: &Connection, sql: &str) -> Result<QueryOutput> {
    let to_query = |source| EtlError::Query {
        query: sql.to_string(),
        source,
    };

    let mut stmt = conn.prepare(sql).map_err(to_query)?;
    let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let width = columns.len();

    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|i| row.get::<_, Value>(i))
                .collect::<rusqlite::Result<Vec<_>>>()
        })
        .map_err(to_query)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .map_err(to_query)?;

    info!(rows = rows.len(), "query returned");
    Ok(QueryOutput { columns, rows })
}

/// Print `sql`, run it, then print the result table to stdout.
pub fn run_query(conn: &Connection, sql: &str) -> Result<QueryOutput> {
    println!("{}", sql);
    let output = query(conn, sql)?;
    println!("{}", output);
    Ok(output)
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => format!("{:?}", f),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

impl fmt::Display for QueryOutput {
    /// Right-aligned columns behind a row index, one line per row.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            write!(f, "Empty result\nColumns: [{}]", self.columns.join(", "))?;
            return Ok(());
        }

        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(render).collect())
            .collect();

        let index_width = (self.rows.len() - 1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(name.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:>w$}", "", w = index_width)?;
        for (name, w) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", name, w = *w)?;
        }

        for (idx, row) in cells.iter().enumerate() {
            write!(f, "\n{:>w$}", idx, w = index_width)?;
            for (cell, w) in row.iter().zip(&widths) {
                write!(f, "  {:>w$}", cell, w = *w)?;
            }
        }
        Ok(())
    }
}
