// src/model.rs

use serde::Deserialize;

/// One scraped row, before any cleaning. `raw_value` is the cell text as it
/// appears on the page (thousands separators included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    pub name: String,
    pub raw_value: String,
}

/// One cleaned row. `value_billions` is finite, non-negative and rounded to
/// two decimal places.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub name: String,
    pub value_billions: f64,
}

/// Records in source page order. Duplicate names are kept.
pub type Table = Vec<Record>;
