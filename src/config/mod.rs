//! Configuration management
//!
//! This module handles loading and managing configuration from
//! TOML files and CLI arguments.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::core::constants::{defaults, limits, output_formats, probe, timeouts};
use crate::core::error::{Result, UaCheckError};

/// Named concurrency presets, also offered by the interactive prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPreset {
    Medium,
    Fast,
}

impl SpeedPreset {
    pub fn concurrency(self) -> usize {
        match self {
            SpeedPreset::Medium => defaults::MEDIUM_CONCURRENCY,
            SpeedPreset::Fast => defaults::FAST_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Endpoint every candidate is sent to
    pub probe_url: Option<String>,

    /// Maximum number of candidates probed at once
    pub concurrency: Option<usize>,

    /// Speed preset, only used when `concurrency` is unset
    pub speed: Option<SpeedPreset>,

    /// Attempts per candidate before declaring it failed
    pub max_retries: Option<u32>,

    /// Per-attempt timeout in seconds
    pub timeout: Option<u64>,

    /// Reject candidates that do not look like a User-Agent before probing
    pub check_structure: Option<bool>,

    /// Custom structural pattern (regex); implies `check_structure`
    pub structure_pattern: Option<String>,

    /// Report every attempt's failure reason instead of only the last one
    pub aggregate_reasons: Option<bool>,

    /// Output format (text, json, minimal)
    pub output_format: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            probe_url: Some(probe::DEFAULT_URL.to_string()),
            concurrency: None, // Resolved from `speed`, then the medium preset
            speed: None,
            max_retries: Some(defaults::MAX_RETRIES),
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            check_structure: Some(false),
            structure_pattern: None,
            aggregate_reasons: Some(false),
            output_format: Some(output_formats::DEFAULT.to_string()),
            verbose: Some(false),
        }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults for missing keys
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            UaCheckError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| {
            UaCheckError::Config(format!(
                "Invalid TOML in config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Try to find and load a config file in standard locations
    pub fn load_from_standard_locations() -> Self {
        if let Ok(config) = Self::load_from_file(defaults::CONFIG_FILE_NAME) {
            return config;
        }

        for i in 1..=defaults::CONFIG_SEARCH_DEPTH {
            let path = format!("{}{}", "../".repeat(i), defaults::CONFIG_FILE_NAME);
            if let Ok(config) = Self::load_from_file(&path) {
                return config;
            }
        }

        Self::default()
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        // Probe
        if let Some(ref probe_url) = cli_config.probe_url {
            self.probe_url = Some(probe_url.clone());
        }
        if let Some(timeout) = cli_config.timeout {
            self.timeout = Some(timeout);
        }

        // Concurrency & retry
        if let Some(concurrency) = cli_config.concurrency {
            self.concurrency = Some(concurrency);
        }
        if let Some(speed) = cli_config.speed {
            self.speed = Some(speed);
            // An explicit preset on the command line beats a file-level limit
            if cli_config.concurrency.is_none() {
                self.concurrency = None;
            }
        }
        if let Some(max_retries) = cli_config.max_retries {
            self.max_retries = Some(max_retries);
        }
        if cli_config.aggregate_reasons {
            self.aggregate_reasons = Some(true);
        }

        // Structural check
        if cli_config.check_structure {
            self.check_structure = Some(true);
        }
        if let Some(ref pattern) = cli_config.structure_pattern {
            self.structure_pattern = Some(pattern.clone());
        }

        // Output & format
        if cli_config.verbose {
            self.verbose = Some(true);
        }
        if let Some(ref output_format) = cli_config.output_format {
            self.output_format = Some(output_format.clone());
        }
    }

    /// Endpoint the probe targets
    pub fn probe_url(&self) -> &str {
        self.probe_url.as_deref().unwrap_or(probe::DEFAULT_URL)
    }

    /// Number of admission slots: explicit limit, then preset, then default
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency
            .or_else(|| self.speed.map(SpeedPreset::concurrency))
            .unwrap_or(defaults::CONCURRENCY)
    }

    /// Attempts per candidate, never below one
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.unwrap_or(defaults::MAX_RETRIES).max(1)
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn aggregate_reasons(&self) -> bool {
        self.aggregate_reasons.unwrap_or(false)
    }

    /// Whether the structural pre-check runs at all
    pub fn structure_check_enabled(&self) -> bool {
        self.check_structure.unwrap_or(false) || self.structure_pattern.is_some()
    }

    /// Compile the custom structure pattern, if one is configured
    pub fn compile_structure_pattern(&self) -> Result<Option<Regex>> {
        self.structure_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(UaCheckError::from)
    }

    pub fn output_format(&self) -> &str {
        self.output_format
            .as_deref()
            .unwrap_or(output_formats::DEFAULT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate probe URL
        if let Some(ref url) = self.probe_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(UaCheckError::Config(format!(
                "Probe URL '{url}' must start with http:// or https://."
            )));
        }

        // Validate timeout
        if let Some(timeout) = self.timeout {
            if timeout < timeouts::MIN_TIMEOUT_SECONDS {
                return Err(UaCheckError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(UaCheckError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>1 hour). Consider using a smaller value."
                )));
            }
        }

        // Validate concurrency
        if let Some(concurrency) = self.concurrency {
            if concurrency == 0 {
                return Err(UaCheckError::Config(
                    "Concurrency cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if concurrency > limits::MAX_CONCURRENCY {
                return Err(UaCheckError::Config(format!(
                    "Concurrency of {concurrency} is extremely high and may get the probe endpoint to block you. Consider using a smaller value."
                )));
            }
        }

        // Validate retries
        if let Some(retries) = self.max_retries {
            if retries == 0 {
                return Err(UaCheckError::Config(
                    "Retries cannot be 0. Every candidate needs at least one attempt.".to_string(),
                ));
            }
            if retries > limits::MAX_RETRIES {
                return Err(UaCheckError::Config(format!(
                    "Retries of {retries} is very high and may cause long delays. Consider using a smaller value."
                )));
            }
        }

        // Validate output format
        if let Some(ref format) = self.output_format
            && !output_formats::ALL.contains(&format.as_str())
        {
            return Err(UaCheckError::Config(format!(
                "Invalid output format '{format}'. Expected one of: {}.",
                output_formats::ALL.join(", ")
            )));
        }

        // Validate structure pattern by trying to compile it
        self.compile_structure_pattern()?;

        Ok(())
    }
}

/// Configuration options that can come from CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    // Probe
    pub probe_url: Option<String>, // --probe-url
    pub timeout: Option<u64>,      // --timeout

    // Concurrency & retry
    pub concurrency: Option<usize>, // --concurrency
    pub speed: Option<SpeedPreset>, // --speed
    pub max_retries: Option<u32>,   // --retries
    pub aggregate_reasons: bool,    // --aggregate-reasons

    // Structural check
    pub check_structure: bool,             // --check-structure
    pub structure_pattern: Option<String>, // --structure-pattern

    // Output & format
    pub quiet: bool,                   // --quiet
    pub verbose: bool,                 // --verbose
    pub output_format: Option<String>, // --format
    pub no_progress: bool,             // --no-progress

    // Configuration
    pub config_file: Option<String>, // --config
    pub no_config: bool,             // --no-config
}
