// Command-line interface definitions and parsing for uacheck

use crate::config::{CliConfig, SpeedPreset};
use crate::core::constants::output_formats;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// File with one User-Agent per line ("-" for stdin)
    pub file: Option<String>,

    // Input
    /// User-Agents to check, comma-separated
    #[arg(
        short = 'a',
        long,
        value_name = "LIST",
        conflicts_with = "file",
        help_heading = "Input"
    )]
    pub agents: Option<String>,

    // Probe
    /// Endpoint each User-Agent is sent to
    #[arg(long, value_name = "URL", help_heading = "Probe")]
    pub probe_url: Option<String>,

    /// Per-attempt timeout in seconds (default: 5)
    #[arg(short = 't', long, value_name = "SECONDS", help_heading = "Probe")]
    pub timeout: Option<u64>,

    // Concurrency & Retry
    /// User-Agents checked at once (default: 10)
    #[arg(long, value_name = "COUNT", help_heading = "Concurrency & Retry")]
    pub concurrency: Option<usize>,

    /// Concurrency preset: medium (10) or fast (50)
    #[arg(long, value_enum, value_name = "SPEED", help_heading = "Concurrency & Retry")]
    pub speed: Option<SpeedPreset>,

    /// Attempts per User-Agent before it is reported failed (default: 3)
    #[arg(long, value_name = "COUNT", help_heading = "Concurrency & Retry")]
    pub retries: Option<u32>,

    /// Report every attempt's failure reason, not just the last
    #[arg(long, help_heading = "Concurrency & Retry")]
    pub aggregate_reasons: bool,

    // Structure Check
    /// Reject malformed User-Agents before sending any request
    #[arg(long, help_heading = "Structure Check")]
    pub check_structure: bool,

    /// Custom pattern for the structure check (regex)
    #[arg(long, value_name = "REGEX", help_heading = "Structure Check")]
    pub structure_pattern: Option<String>,

    // Output & Verbosity
    /// Suppress progress output
    #[arg(short = 'q', long, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long, help_heading = "Output & Verbosity")]
    pub verbose: bool,

    /// Output format (default: text)
    #[arg(long, value_name = "FORMAT", value_parser = output_formats::ALL, help_heading = "Output & Verbosity")]
    pub format: Option<String>,

    /// Disable progress bars
    #[arg(long, help_heading = "Output & Verbosity")]
    pub no_progress: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Map parsed arguments onto the overrides applied to the loaded [`Config`](crate::config::Config)
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        probe_url: cli.probe_url.clone(),
        timeout: cli.timeout,
        concurrency: cli.concurrency,
        speed: cli.speed,
        max_retries: cli.retries,
        aggregate_reasons: cli.aggregate_reasons,
        check_structure: cli.check_structure,
        structure_pattern: cli.structure_pattern.clone(),
        quiet: cli.quiet,
        verbose: cli.verbose,
        output_format: cli.format.clone(),
        no_progress: cli.no_progress,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_to_config_default() {
        let cli = Cli::parse_from(["uacheck"]);
        let config = cli_to_config(&cli);

        assert!(cli.file.is_none());
        assert!(cli.agents.is_none());
        assert_eq!(config.timeout, None);
        assert_eq!(config.concurrency, None);
        assert_eq!(config.speed, None);
        assert_eq!(config.max_retries, None);
        assert_eq!(config.output_format, None);
        assert!(!config.check_structure);
        assert!(!config.aggregate_reasons);
        assert!(!config.quiet);
        assert!(!config.no_config);
    }

    #[test]
    fn test_cli_to_config_all_options() {
        let cli = Cli::parse_from([
            "uacheck",
            "agents.txt",
            "--probe-url",
            "http://localhost:9000/ua",
            "-t",
            "8",
            "--concurrency",
            "4",
            "--speed",
            "fast",
            "--retries",
            "2",
            "--aggregate-reasons",
            "--check-structure",
            "--structure-pattern",
            "^Mozilla/",
            "-q",
            "-v",
            "--format",
            "json",
            "--no-progress",
            "--config",
            "custom.toml",
            "--no-config",
        ]);
        let config = cli_to_config(&cli);

        assert_eq!(cli.file.as_deref(), Some("agents.txt"));
        assert_eq!(config.probe_url.as_deref(), Some("http://localhost:9000/ua"));
        assert_eq!(config.timeout, Some(8));
        assert_eq!(config.concurrency, Some(4));
        assert_eq!(config.speed, Some(SpeedPreset::Fast));
        assert_eq!(config.max_retries, Some(2));
        assert!(config.aggregate_reasons);
        assert!(config.check_structure);
        assert_eq!(config.structure_pattern.as_deref(), Some("^Mozilla/"));
        assert!(config.quiet);
        assert!(config.verbose);
        assert_eq!(config.output_format.as_deref(), Some("json"));
        assert!(config.no_progress);
        assert_eq!(config.config_file.as_deref(), Some("custom.toml"));
        assert!(config.no_config);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["uacheck", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_cli_agents_conflicts_with_file() {
        assert!(Cli::try_parse_from(["uacheck", "agents.txt", "--agents", "curl/8.0"]).is_err());
    }

    #[test]
    fn test_cli_completion_subcommand() {
        let cli = Cli::parse_from(["uacheck", "completion-generate", "bash"]);
        assert!(matches!(
            cli.command,
            Some(Commands::CompletionGenerate {
                shell: clap_complete::Shell::Bash
            })
        ));
    }
}
