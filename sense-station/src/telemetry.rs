use std::io::Write;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt};

use crate::error::StationError;

/// Install the global bunyan-formatted subscriber. Logs go to stdout, or to
/// a daily rolling file when `log_dir` is given. Keep the returned guard
/// alive until shutdown or buffered lines are lost.
pub fn init(name: &str, log_dir: Option<&Path>) -> Result<WorkerGuard, StationError> {
    let sink: Box<dyn Write + Send> = match log_dir {
        Some(dir) => Box::new(tracing_appender::rolling::daily(dir, format!("{name}.log"))),
        None => Box::new(std::io::stdout()),
    };
    let (writer, guard) = tracing_appender::non_blocking(sink);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name.to_string(), writer));

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| StationError::Telemetry(e.to_string()))?;
    Ok(guard)
}
