use crate::config::Config;
use crate::reporting::summary::RunSummary;
use log::{debug, error, info, warn};

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Off // Only show structured logs in verbose mode
    };

    let initialized = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_module_path(false)
        .format_target(false)
        .try_init();

    if initialized.is_ok() {
        debug!("Logger initialized with level: {level:?}");
    }
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: probe_url={}, concurrency={}, timeout={}s",
        config.probe_url(),
        config.concurrency_limit(),
        config.timeout_duration().as_secs()
    );
    info!(
        "Retry: attempts={}, aggregate_reasons={}",
        config.max_attempts(),
        config.aggregate_reasons()
    );
    match config.structure_pattern {
        Some(ref pattern) => info!("Structure check: pattern={pattern}"),
        None => info!("Structure check: enabled={}", config.structure_check_enabled()),
    }
}

/// Log where candidates came from
pub fn log_candidates_loaded(count: usize, source: &str) {
    info!("Loaded {count} User-Agent(s) from {source}");
}

/// Log validation start
pub fn log_run_start(total: usize, concurrency: usize, attempts: u32) {
    info!(
        "Starting validation of {total} User-Agents (concurrency={concurrency}, attempts={attempts})"
    );
}

/// Log validation completion
pub fn log_run_complete(summary: &RunSummary) {
    let millis = summary.elapsed().as_millis();
    if summary.all_active() {
        info!(
            "✅ Validation complete: {}/{} User-Agents active ({}ms)",
            summary.active_count(),
            summary.total(),
            millis
        );
    } else {
        warn!(
            "❌ Validation complete: {}/{} User-Agents active, {} failed ({}ms)",
            summary.active_count(),
            summary.total(),
            summary.failed_count(),
            millis
        );
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
