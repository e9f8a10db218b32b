use std::cmp::Reverse;

use ordered_float::OrderedFloat;
use tracing::{debug, instrument, trace};

use crate::market_data::types::MarketEntry;
use crate::view::types::{SortDirection, SortField, SortState};

/// Holds the last fetched set and the rows currently shown.
///
/// `displayed` is only ever derived from `full`: replaced by a copy, a filtered
/// subsequence, or reordered in place by a sort. Sorting works on whatever is
/// displayed now, so a later search re-derives from `full` and drops the order.
#[derive(Debug, Default, Clone)]
pub struct ViewModel {
    full: Vec<MarketEntry>,
    displayed: Vec<MarketEntry>,
    sort: SortState,
}

impl ViewModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn full_set(&self) -> &[MarketEntry] {
        &self.full
    }

    pub fn displayed(&self) -> &[MarketEntry] {
        &self.displayed
    }

    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Replace the held set wholesale. Any active search is not re-applied.
    #[instrument(skip_all, fields(rows = entries.len()))]
    pub fn set_full_set(&mut self, entries: Vec<MarketEntry>) {
        self.displayed = entries.clone();
        self.full = entries;
        debug!("replaced full set");
    }

    /// Drop everything; used when a fetch fails.
    pub fn clear(&mut self) {
        self.full.clear();
        self.displayed.clear();
        debug!("cleared full set");
    }

    #[instrument(skip(self))]
    pub fn apply_search(&mut self, query: &str) {
        let q = query.trim().to_lowercase();
        self.displayed = if q.is_empty() {
            self.full.clone()
        } else {
            self.full
                .iter()
                .filter(|e| matches_query(e, &q))
                .cloned()
                .collect()
        };
        trace!(shown = self.displayed.len(), total = self.full.len(), "applied search");
    }

    /// Flip the market-cap direction and stably reorder the displayed rows.
    pub fn toggle_sort_by_market_cap(&mut self) -> SortDirection {
        self.sort.cap_ascending = !self.sort.cap_ascending;
        if self.sort.cap_ascending {
            self.displayed.sort_by_key(|e| OrderedFloat(e.market_cap));
        } else {
            self.displayed.sort_by_key(|e| Reverse(OrderedFloat(e.market_cap)));
        }
        let dir = SortDirection::from_ascending(self.sort.cap_ascending);
        debug!(field = SortField::MarketCap.label(), dir = dir.short(), "sorted");
        dir
    }

    /// Flip the 24h-change direction and stably reorder. A missing change sorts as
    /// negative infinity: first when ascending, last when descending.
    pub fn toggle_sort_by_percent_change(&mut self) -> SortDirection {
        self.sort.percent_ascending = !self.sort.percent_ascending;
        if self.sort.percent_ascending {
            self.displayed.sort_by_key(percent_key);
        } else {
            self.displayed.sort_by_key(|e| Reverse(percent_key(e)));
        }
        let dir = SortDirection::from_ascending(self.sort.percent_ascending);
        debug!(field = SortField::PercentChange.label(), dir = dir.short(), "sorted");
        dir
    }

    pub fn toggle_sort(&mut self, field: SortField) -> SortDirection {
        match field {
            SortField::MarketCap => self.toggle_sort_by_market_cap(),
            SortField::PercentChange => self.toggle_sort_by_percent_change(),
        }
    }
}

// `q` is already trimmed and lower-cased
fn matches_query(entry: &MarketEntry, q: &str) -> bool {
    entry.name.to_lowercase().contains(q) || entry.symbol.to_lowercase().contains(q)
}

fn percent_key(entry: &MarketEntry) -> OrderedFloat<f64> {
    OrderedFloat(entry.price_change_percentage_24h.unwrap_or(f64::NEG_INFINITY))
}
