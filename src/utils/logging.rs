use std::path::Path;

use color_eyre::eyre::{Context, Result};
use lazy_static::lazy_static;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::PROJECT_NAME;

lazy_static! {
    pub static ref LOG_ENV: String = format!("{}_LOGLEVEL", PROJECT_NAME.clone());
    pub static ref LOG_FILE: String = format!("{}.log", env!("CARGO_PKG_NAME"));
}

/// Log to `<data_dir>/oc_component_ui.log`.
///
/// The terminal belongs to the UI, so nothing is written to stdout or stderr.
/// The level comes from `RUST_LOG`, then `OC_COMPONENT_UI_LOGLEVEL`, and
/// defaults to `info`.
pub fn init(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Error creating data directory {}", data_dir.display()))?;
    let log_path = data_dir.join(LOG_FILE.as_str());
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("Error creating log file {}", log_path.display()))?;

    let env_filter = EnvFilter::builder().with_default_directive(tracing::Level::INFO.into());
    let env_filter = env_filter
        .try_from_env()
        .or_else(|_| env_filter.with_env_var(LOG_ENV.as_str()).from_env())?;

    let file_subscriber = fmt::layer()
        .with_file(true)
        .with_line_number(true)
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_filter(env_filter);
    tracing_subscriber::registry()
        .with(file_subscriber)
        .with(ErrorLayer::default())
        .try_init()?;
    Ok(())
}
