use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use coinview_rs::app;
use coinview_rs::config::{Overrides, Settings};
use coinview_rs::controller::Controller;
use coinview_rs::market_data::adapters::coingecko::CoinGeckoAdapter;
use coinview_rs::render::{render_rows, text};
use coinview_rs::telemetry::{self, LogSink};
use coinview_rs::view::SortField;
use tracing::info;

#[derive(Parser)]
#[command(name = "coinview", version, about = "Top cryptocurrency markets as a searchable, sortable table")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive table (default)
    Tui,
    /// Fetch once and print the table to stdout
    Print {
        /// Filter by name or symbol, applied before sorting
        #[arg(long)]
        search: Option<String>,
        /// Sort toggle to apply; repeat to toggle again (cap, cap = descending)
        #[arg(long, value_enum)]
        sort: Vec<SortArg>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Cap,
    Pct,
}

impl From<SortArg> for SortField {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Cap => SortField::MarketCap,
            SortArg::Pct => SortField::PercentChange,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load(&cli.overrides)?;
    let command = cli.command.unwrap_or(Command::Tui);

    let sink = match (&command, settings.log_file.as_deref()) {
        (_, Some(path)) => LogSink::File(path),
        (Command::Print { .. }, None) => LogSink::Stderr,
        (Command::Tui, None) => LogSink::Discard,
    };
    telemetry::init_tracing(&settings.log_filter, sink)?;
    telemetry::init_metrics();

    info!(endpoint = %settings.endpoint, per_page = settings.per_page, "coinview starting");

    let source = Arc::new(CoinGeckoAdapter::from_settings(&settings)?);
    let (mut controller, mut outcomes) = Controller::new(source);

    match command {
        Command::Tui => app::run(&mut controller, &mut outcomes)?,
        Command::Print { search, sort, format } => {
            controller.load().await;
            if let Some(query) = search {
                controller.set_search(&query);
            }
            for field in sort {
                controller.sort(field.into());
            }

            let rows = controller.view().displayed();
            match format {
                OutputFormat::Table => print!("{}", text::to_text(&render_rows(rows))),
                OutputFormat::Csv => print!("{}", text::to_csv(rows)?),
            }
            eprintln!("{}", controller.status());
        }
    }

    Ok(())
}
