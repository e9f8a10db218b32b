use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::market_data::types::{FetchError, MarketEntry};
use crate::market_data::MarketDataSource;
use crate::view::{SortField, ViewModel};

pub const STATUS_LOADING: &str = "Loading …";
pub const STATUS_CLEARED: &str = "Cleared search.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Terminal result of one fetch, delivered back to the UI task.
#[derive(Debug)]
pub enum FetchOutcome {
    Loaded(Vec<MarketEntry>),
    Failed(FetchError),
}

impl From<Result<Vec<MarketEntry>, FetchError>> for FetchOutcome {
    fn from(res: Result<Vec<MarketEntry>, FetchError>) -> Self {
        match res {
            Ok(rows) => FetchOutcome::Loaded(rows),
            Err(e) => FetchOutcome::Failed(e),
        }
    }
}

/// Session state: the view model plus the search text and status line.
///
/// Reloads run as spawned tasks and report through the outcome channel. Outcomes are
/// applied in arrival order with no coordination, so the last one to complete wins.
pub struct Controller {
    view: ViewModel,
    search_input: String,
    status: String,
    mode: InputMode,
    source: Arc<dyn MarketDataSource>,
    outcome_tx: mpsc::UnboundedSender<FetchOutcome>,
}

impl Controller {
    pub fn new(source: Arc<dyn MarketDataSource>) -> (Self, mpsc::UnboundedReceiver<FetchOutcome>) {
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();
        let controller = Self {
            view: ViewModel::new(),
            search_input: String::new(),
            status: String::new(),
            mode: InputMode::Normal,
            source,
            outcome_tx,
        };
        (controller, outcome_rx)
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn input_mode(&self) -> InputMode {
        self.mode
    }

    pub fn set_input_mode(&mut self, mode: InputMode) {
        self.mode = mode;
    }

    /// Start a fetch in the background; the outcome arrives on the receiver from `new`.
    pub fn reload(&mut self) {
        self.status = STATUS_LOADING.to_string();
        let source = Arc::clone(&self.source);
        let tx = self.outcome_tx.clone();
        debug!("spawning fetch");
        tokio::spawn(async move {
            let outcome = FetchOutcome::from(source.fetch_markets().await);
            if tx.send(outcome).is_err() {
                debug!("controller gone; dropping fetch outcome");
            }
        });
    }

    /// Fetch and apply in place. Used by non-interactive mode.
    pub async fn load(&mut self) {
        self.status = STATUS_LOADING.to_string();
        let outcome = FetchOutcome::from(self.source.fetch_markets().await);
        self.apply_outcome(outcome);
    }

    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Loaded(rows) => {
                self.view.set_full_set(rows);
                self.status = format!("Loaded {} rows.", self.view.displayed().len());
                info!(rows = self.view.full_set().len(), "market data loaded");
            }
            FetchOutcome::Failed(err) => {
                self.view.clear();
                self.status = format!("Failed to load: {}", err);
                error!(error = %err, "market data load failed");
            }
        }
    }

    pub fn set_search(&mut self, text: &str) {
        self.search_input = text.to_string();
        self.view.apply_search(&self.search_input);
    }

    pub fn push_search_char(&mut self, c: char) {
        self.search_input.push(c);
        self.view.apply_search(&self.search_input);
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.view.apply_search(&self.search_input);
        }
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.view.apply_search("");
        self.status = STATUS_CLEARED.to_string();
    }

    pub fn sort(&mut self, field: SortField) {
        let dir = self.view.toggle_sort(field);
        self.status = format!("Sorted by {} ({}).", field.label(), dir.short());
    }
}
