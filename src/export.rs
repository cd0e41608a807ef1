// src/export.rs

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::info;

use crate::error::{EtlError, Result};
use crate::model::{Record, Table};

/// Header of the exported file. The first column is the unlabeled row index.
pub const CSV_HEADER: [&str; 3] = ["", "name", "value_billions"];

/// Write `table` to `path`, replacing whatever was there.
#[tracing::instrument(level = "info", skip(table, path), fields(path = %path.as_ref().display()))]
pub fn write_csv(table: &[Record], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let target = path.display().to_string();

    let mut wtr = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| EtlError::storage(&target, e))?;

    wtr.write_record(CSV_HEADER)
        .map_err(|e| EtlError::storage(&target, e))?;
    for (idx, rec) in table.iter().enumerate() {
        wtr.serialize((idx, &rec.name, rec.value_billions))
            .map_err(|e| EtlError::storage(&target, e))?;
    }
    wtr.flush().map_err(|e| EtlError::storage(&target, e))?;

    info!(rows = table.len(), "wrote csv");
    Ok(())
}

/// Read a file written by [`write_csv`] back into a table, dropping the
/// index column.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Table> {
    let path = path.as_ref();
    let target = path.display().to_string();

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| EtlError::storage(&target, e))?;

    let headers = rdr.headers().map_err(|e| EtlError::storage(&target, e))?;
    if headers.iter().ne(CSV_HEADER) {
        return Err(EtlError::storage(
            &target,
            format!("unexpected header {:?}", headers),
        ));
    }
    // named fields after the index column
    let fields: StringRecord = headers.iter().skip(1).collect();

    rdr.records()
        .map(|row| {
            let row = row.map_err(|e| EtlError::storage(&target, e))?;
            let without_index: StringRecord = row.iter().skip(1).collect();
            without_index
                .deserialize::<Record>(Some(&fields))
                .map_err(|e| EtlError::storage(&target, e))
        })
        .collect()
}
