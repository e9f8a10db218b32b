//! Interactive terminal loop: crossterm key events in, ratatui frames out.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;
use tracing::info;

use crate::controller::{Controller, FetchOutcome, InputMode};
use crate::render::tui;
use crate::view::SortField;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

type Term = Terminal<CrosstermBackend<Stdout>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run until the user quits. Must be called inside a tokio runtime; reloads are spawned on it.
pub fn run(app: &mut Controller, outcomes: &mut mpsc::UnboundedReceiver<FetchOutcome>) -> anyhow::Result<()> {
    let mut terminal = setup_terminal()?;
    install_panic_hook();

    let res = run_loop(&mut terminal, app, outcomes);
    restore_terminal()?;
    terminal.show_cursor()?;
    res
}

fn run_loop(
    terminal: &mut Term,
    app: &mut Controller,
    outcomes: &mut mpsc::UnboundedReceiver<FetchOutcome>,
) -> anyhow::Result<()> {
    app.reload();

    loop {
        while let Ok(outcome) = outcomes.try_recv() {
            app.apply_outcome(outcome);
        }

        terminal.draw(|frame| tui::draw(frame, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(app, key) == Flow::Quit {
                    info!("quit requested");
                    return Ok(());
                }
            }
        }
    }
}

pub fn handle_key(app: &mut Controller, key: KeyEvent) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Flow::Quit;
    }

    match app.input_mode() {
        InputMode::Editing => match key.code {
            KeyCode::Enter | KeyCode::Esc => app.set_input_mode(InputMode::Normal),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) => app.push_search_char(c),
            _ => {}
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('/') => app.set_input_mode(InputMode::Editing),
            KeyCode::Char('c') => app.clear_search(),
            KeyCode::Char('m') => app.sort(SortField::MarketCap),
            KeyCode::Char('p') => app.sort(SortField::PercentChange),
            KeyCode::Char('r') => app.reload(),
            _ => {}
        },
    }
    Flow::Continue
}

fn setup_terminal() -> anyhow::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal() -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

// Leave the alternate screen before the panic message prints
fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::types::{FetchError, MarketEntry};
    use crate::market_data::MarketDataSource;
    use std::sync::Arc;

    struct NeverCalled;

    #[async_trait::async_trait]
    impl MarketDataSource for NeverCalled {
        async fn fetch_markets(&self) -> Result<Vec<MarketEntry>, FetchError> {
            Err(FetchError::transport("not used"))
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn loaded_app() -> Controller {
        let (mut app, _rx) = Controller::new(Arc::new(NeverCalled));
        let coin = |id: &str, name: &str, cap: f64| MarketEntry {
            id: id.to_string(),
            name: name.to_string(),
            symbol: id.to_string(),
            image: String::new(),
            current_price: None,
            total_volume: None,
            market_cap: cap,
            price_change_percentage_24h: None,
        };
        app.apply_outcome(FetchOutcome::Loaded(vec![
            coin("btc", "Bitcoin", 2.0),
            coin("eth", "Ethereum", 1.0),
        ]));
        app
    }

    #[test]
    fn test_typing_filters_live() {
        let mut app = loaded_app();
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('/'))), Flow::Continue);
        assert_eq!(app.input_mode(), InputMode::Editing);

        for c in "eth".chars() {
            assert_eq!(handle_key(&mut app, press(KeyCode::Char(c))), Flow::Continue);
        }
        assert_eq!(app.view().displayed().len(), 1);

        handle_key(&mut app, press(KeyCode::Enter));
        assert_eq!(app.input_mode(), InputMode::Normal);
        assert_eq!(app.search_input(), "eth");
    }

    #[test]
    fn test_normal_mode_keys() {
        let mut app = loaded_app();
        handle_key(&mut app, press(KeyCode::Char('m')));
        assert_eq!(app.view().displayed()[0].id, "eth");
        handle_key(&mut app, press(KeyCode::Char('p')));
        assert!(app.status().starts_with("Sorted by 24h %"));
        handle_key(&mut app, press(KeyCode::Char('c')));
        assert_eq!(app.status(), "Cleared search.");
        assert_eq!(handle_key(&mut app, press(KeyCode::Char('q'))), Flow::Quit);
    }

    #[test]
    fn test_ctrl_c_quits_while_editing() {
        let mut app = loaded_app();
        app.set_input_mode(InputMode::Editing);
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut app, key), Flow::Quit);
    }
}
