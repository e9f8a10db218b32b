use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Where log lines go. The TUI owns the terminal, so it either logs to a file or nowhere.
pub enum LogSink<'a> {
    Stderr,
    File(&'a Path),
    Discard,
}

pub fn init_tracing(default_filter: &str, sink: LogSink<'_>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .compact();

    match sink {
        LogSink::Stderr => builder.with_writer(std::io::stderr).init(),
        LogSink::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init()
        }
        LogSink::Discard => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

#[cfg(feature = "metrics-exporter")]
pub fn init_metrics() {
    use metrics_exporter_prometheus::PrometheusBuilder;

    if let Err(e) = PrometheusBuilder::new()
        .with_http_listener(([0, 0, 0, 0], 9000))
        .install()
    {
        tracing::warn!(error = %e, "prometheus exporter not started");
        return;
    }

    tracing::info!("Prometheus exporter listening on http://0.0.0.0:9000/metrics");
    metrics::gauge!("coinview_up").set(1.0);
}

#[cfg(not(feature = "metrics-exporter"))]
pub fn init_metrics() { /* no-op */ }

// ── Fetch metrics ────────────────────────────────────────────────

pub fn record_fetch(outcome: &'static str, latency_ms: f64) {
    metrics::counter!("coinview_fetch_total", "outcome" => outcome).increment(1);
    metrics::histogram!("coinview_fetch_latency_ms", "outcome" => outcome).record(latency_ms);
}
