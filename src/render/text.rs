//! Non-interactive outputs for `coinview print`: an aligned text table and CSV.

use itertools::Itertools;

use crate::market_data::types::MarketEntry;
use crate::render::table::{TableBody, TableRow, COLUMN_COUNT, HEADERS};

// Columns from Price onwards are numeric and right-aligned
const FIRST_NUMERIC_COLUMN: usize = 3;

/// Render the table body as fixed-width text, one line per row plus header and rule.
pub fn to_text(body: &TableBody) -> String {
    let mut widths: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();
    for row in body.entries() {
        for (i, cell) in row.cells().iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(&render_line(&HEADERS, &widths));
    out.push('\n');
    out.push_str(&widths.iter().map(|w| "-".repeat(*w)).join("-+-"));
    out.push('\n');

    for row in &body.rows {
        match row {
            TableRow::Placeholder { message, .. } => {
                let total: usize = widths.iter().sum::<usize>() + 3 * (COLUMN_COUNT - 1);
                out.push_str(&format!("{:^width$}", message, width = total));
            }
            TableRow::Entry(entry) => out.push_str(&render_line(&entry.cells(), &widths)),
        }
        out.push('\n');
    }
    out
}

fn render_line(cells: &[&str], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i >= FIRST_NUMERIC_COLUMN {
                format!("{:>width$}", cell, width = width)
            } else {
                format!("{:<width$}", cell, width = width)
            }
        })
        .join(" | ")
}

/// Raw values as CSV, one record per displayed entry. Missing numbers are empty fields.
pub fn to_csv(entries: &[MarketEntry]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    if entries.is_empty() {
        writer.write_record([
            "id",
            "name",
            "symbol",
            "image",
            "current_price",
            "total_volume",
            "market_cap",
            "price_change_percentage_24h",
        ])?;
    }
    for entry in entries {
        writer.serialize(entry)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
