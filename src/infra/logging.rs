pub fn init() {
    // Initialize tracing subscriber once, honoring RUST_LOG if set.
    // Logs go to stderr: in stdio mode stdout carries the MCP protocol.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log a metrics-like line and feed the `metrics` facade.
///
/// Names ending in `_total` are counters, everything else is a histogram.
/// No exporter is installed, so the facade calls are no-ops unless a
/// recorder is registered by the embedding process.
pub fn log_metric(tool: &'static str, metric: &'static str, value: f64) {
    tracing::info!(tool = tool, metric = metric, value = value, "metric");
    if metric.ends_with("_total") {
        metrics::counter!(metric, "tool" => tool).increment(value as u64);
    } else {
        metrics::histogram!(metric, "tool" => tool).record(value);
    }
}
