// src/extract.rs

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::error::{EtlError, Result};
use crate::model::RawRecord;

/// Marks a missing value in the source table.
pub const MISSING_SENTINEL: char = '—';

/// Where the data lives on the page. This is a positional assumption about
/// the current page layout and breaks as soon as the page gains or loses a
/// table body ahead of the target one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    /// 0-based index among all `tbody` elements in document order, counted
    /// after parsing: a table written without `<tbody>` still has one.
    pub tbody_index: usize,
    /// Data cell holding the entity link.
    pub name_cell: usize,
    /// Data cell holding the number.
    pub value_cell: usize,
}

impl Default for TableLayout {
    fn default() -> Self {
        Self {
            tbody_index: 2,
            name_cell: 0,
            value_cell: 2,
        }
    }
}

impl TableLayout {
    fn min_cells(&self) -> usize {
        self.name_cell.max(self.value_cell) + 1
    }
}

/// Parse `html` and pull `(name, raw value)` pairs out of the table body
/// picked by `layout`.
///
/// Rows without data cells are headers and are skipped. A row is kept only
/// when its name cell has a link and its value cell has no
/// [`MISSING_SENTINEL`].
#[tracing::instrument(level = "info", skip(html), fields(bytes = html.len()))]
pub fn extract_table(html: &str, layout: &TableLayout) -> Result<Vec<RawRecord>> {
    let document = Html::parse_document(html);
    let tbody_sel = Selector::parse("tbody").expect("selector should parse");
    let tr_sel = Selector::parse("tr").expect("selector should parse");
    let td_sel = Selector::parse("td").expect("selector should parse");
    let a_sel = Selector::parse("a").expect("selector should parse");

    // 1) locate the target table body
    let bodies: Vec<ElementRef> = document.select(&tbody_sel).collect();
    let body = bodies.get(layout.tbody_index).ok_or_else(|| {
        EtlError::Structure(format!(
            "expected at least {} table bodies, found {}",
            layout.tbody_index + 1,
            bodies.len()
        ))
    })?;

    // 2) walk its rows in document order
    let min_cells = layout.min_cells();
    let mut records = Vec::new();
    let (mut no_link, mut missing) = (0usize, 0usize);

    for (idx, row) in body.select(&tr_sel).enumerate() {
        let cells: Vec<ElementRef> = row.select(&td_sel).collect();
        if cells.is_empty() {
            continue;
        }
        // footers and aggregates have no link; they may also span columns
        let Some(link) = cells
            .get(layout.name_cell)
            .and_then(|cell| cell.select(&a_sel).next())
        else {
            debug!(row = idx, "skipping row: no link");
            no_link += 1;
            continue;
        };

        if cells.len() < min_cells {
            return Err(EtlError::Structure(format!(
                "row {} has {} data cells, expected at least {}",
                idx,
                cells.len(),
                min_cells
            )));
        }

        let value_cell = cells[layout.value_cell];
        if value_cell.text().any(|t| t.contains(MISSING_SENTINEL)) {
            debug!(row = idx, "skipping row: missing value");
            missing += 1;
            continue;
        }

        records.push(RawRecord {
            name: link.text().collect::<String>().trim().to_string(),
            raw_value: leading_text(value_cell),
        });
    }

    info!(
        rows = records.len(),
        no_link, missing, "extracted table body {}", layout.tbody_index
    );
    Ok(records)
}

/// First non-blank text node of `cell`, trimmed. Footnote markers that
/// follow the number are left out.
fn leading_text(cell: ElementRef) -> String {
    cell.text()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .unwrap_or_default()
        .to_string()
}
