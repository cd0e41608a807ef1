// src/process/mod.rs

pub mod convert;
pub mod utils;

use tracing::info;

use crate::error::Result;
use crate::model::{RawRecord, Table};

pub use convert::{convert_record, parse_millions};

/// Turn scraped rows into the final table, keeping page order.
/// The first value that fails to parse aborts the whole transform.
#[tracing::instrument(level = "info", skip(raw), fields(rows = raw.len()))]
pub fn transform(raw: Vec<RawRecord>) -> Result<Table> {
    let table = raw
        .into_iter()
        .map(convert_record)
        .collect::<Result<Table>>()?;
    info!(rows = table.len(), "transformed to billions");
    Ok(table)
}
