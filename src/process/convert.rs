// src/process/convert.rs

use crate::error::{EtlError, Result};
use crate::model::{RawRecord, Record};
use crate::process::utils;

/// Parse a scraped value in millions into billions.
pub fn parse_millions(raw: &RawRecord) -> Result<f64> {
    let cleaned = utils::clean_number(&raw.raw_value);
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(EtlError::Parse {
            name: raw.name.clone(),
            raw: raw.raw_value.clone(),
        }),
    }
}

/// Convert one raw row into its final form. The raw column does not survive.
pub fn convert_record(raw: RawRecord) -> Result<Record> {
    let millions = parse_millions(&raw)?;
    Ok(Record {
        name: raw.name,
        value_billions: utils::millions_to_billions(millions),
    })
}
