//! Pure mapping from market rows to a table body. Every back-end (terminal, text, CSV)
//! draws from this representation so they agree on content.

use crate::format::{format_money, format_number, format_percent};
use crate::market_data::types::MarketEntry;

pub const HEADERS: [&str; 7] = ["Coin", "Symbol", "Id", "Price", "24h %", "Volume", "Mkt Cap"];
pub const COLUMN_COUNT: usize = HEADERS.len();
pub const NO_RESULTS: &str = "No results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    // A missing change counts as non-negative
    pub fn of(change: Option<f64>) -> Self {
        if change.unwrap_or(0.0) >= 0.0 { Trend::Up } else { Trend::Down }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Trend::Up => "up",
            Trend::Down => "down",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub image: String,
    pub name: String,
    pub symbol: String,
    pub id: String,
    pub price: String,
    pub change: String,
    pub trend: Trend,
    pub volume: String,
    pub market_cap: String,
}

impl EntryRow {
    /// Cell text in column order. The image reference has no text cell.
    pub fn cells(&self) -> [&str; COLUMN_COUNT] {
        [
            &self.name,
            &self.symbol,
            &self.id,
            &self.price,
            &self.change,
            &self.volume,
            &self.market_cap,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableRow {
    /// Single row spanning every column.
    Placeholder { message: &'static str, span: usize },
    Entry(EntryRow),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableBody {
    pub rows: Vec<TableRow>,
}

impl TableBody {
    pub fn is_placeholder(&self) -> bool {
        matches!(self.rows.as_slice(), [TableRow::Placeholder { .. }])
    }

    pub fn entries(&self) -> impl Iterator<Item = &EntryRow> {
        self.rows.iter().filter_map(|row| match row {
            TableRow::Entry(e) => Some(e),
            TableRow::Placeholder { .. } => None,
        })
    }
}

pub fn render_rows(entries: &[MarketEntry]) -> TableBody {
    if entries.is_empty() {
        return TableBody {
            rows: vec![TableRow::Placeholder { message: NO_RESULTS, span: COLUMN_COUNT }],
        };
    }
    TableBody { rows: entries.iter().map(|e| TableRow::Entry(entry_row(e))).collect() }
}

fn entry_row(e: &MarketEntry) -> EntryRow {
    EntryRow {
        image: e.image.clone(),
        name: e.name.clone(),
        symbol: e.symbol.to_uppercase(),
        id: e.id.clone(),
        price: format_money(e.current_price),
        change: format_percent(e.price_change_percentage_24h),
        trend: Trend::of(e.price_change_percentage_24h),
        volume: format_money(e.total_volume),
        market_cap: format_number(e.market_cap),
    }
}
