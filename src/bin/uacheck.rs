use clap::{CommandFactory, Parser};
use uacheck::config::{CliConfig, Config};
use uacheck::core::constants::output_formats;
use uacheck::core::{Candidate, Result, UaCheckError};
use uacheck::discovery::{CandidateLoader, LoadCandidates};
use uacheck::reporting::logging;
use uacheck::ui::completion::print_completions;
use uacheck::ui::output;
use uacheck::ui::{
    CandidatePrompt, Cli, Commands, ProgressReporter, ProgressSink, SilentProgress, cli_to_config,
};
use uacheck::validation::{Engine, RunReport, ValidateUserAgents};

use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run_uacheck_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
pub fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        None => None,
    }
}

/// Main validation flow extracted from main() for testing
pub async fn run_uacheck_logic(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli);
    let mut config = load_and_merge_config(&cli_config)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);

    let interactive = cli.file.is_none() && cli.agents.is_none() && atty::is(atty::Stream::Stdin);
    let (candidates, source) = gather_candidates(cli, interactive)?;
    logging::log_candidates_loaded(candidates.len(), &source);

    if candidates.is_empty() {
        logging::log_error("Nothing to check", None);
        return Err(UaCheckError::NoCandidates);
    }

    if interactive && config.concurrency.is_none() && config.speed.is_none() {
        config.speed = Some(CandidatePrompt::new().ask_speed()?);
    }

    if output_settings.should_show_config_info() {
        logging::log_config_info(&config);
        output::display_config_info(&config, candidates.len());
    }

    let report = validate_candidates(candidates, &config, &output_settings).await?;

    output::display_results(&report, &output_settings.output_format)?;

    Ok(determine_exit_code(&report))
}

/// Load configuration from file or standard locations and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file)?
    } else {
        Config::load_from_standard_locations()
    };

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output formatting and display
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub output_format: String,
    pub show_progress: bool,
}

impl OutputSettings {
    pub fn should_show_config_info(&self) -> bool {
        !self.quiet && self.output_format == output_formats::TEXT
    }

    pub fn should_show_progress(&self) -> bool {
        self.show_progress && self.output_format == output_formats::TEXT
    }
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    let quiet = cli_config.quiet;
    OutputSettings {
        quiet,
        verbose: config.verbose.unwrap_or(false),
        output_format: config.output_format().to_string(),
        show_progress: !quiet && !cli_config.no_progress,
    }
}

/// Read candidates from `--agents`, a file, an interactive prompt, or stdin.
/// Returns them with a short description of where they came from.
pub fn gather_candidates(cli: &Cli, interactive: bool) -> Result<(Vec<Candidate>, String)> {
    let loader = CandidateLoader::default();

    if let Some(ref list) = cli.agents {
        return Ok((loader.parse_list(list)?, "--agents".to_string()));
    }

    if let Some(ref file) = cli.file {
        let candidates = loader.load_file(Path::new(file)).inspect_err(|e| {
            logging::log_error(&format!("Could not read User-Agents from '{file}'"), Some(e));
        })?;
        return Ok((candidates, file.clone()));
    }

    if interactive {
        return Ok((CandidatePrompt::new().ask_candidates()?, "prompt".to_string()));
    }

    let stdin = std::io::stdin();
    Ok((loader.load_reader(stdin.lock())?, "stdin".to_string()))
}

/// Build the sink the engine reports progress to
pub fn create_progress_sink(output_settings: &OutputSettings, total: usize) -> Arc<dyn ProgressSink> {
    if output_settings.should_show_progress() {
        let mut reporter = ProgressReporter::new(true);
        reporter.start_validation(total);
        Arc::new(reporter)
    } else {
        Arc::new(SilentProgress)
    }
}

/// Run the engine over every candidate
pub async fn validate_candidates(
    candidates: Vec<Candidate>,
    config: &Config,
    output_settings: &OutputSettings,
) -> Result<RunReport> {
    let engine = Engine::from_config(config)?;
    let progress = create_progress_sink(output_settings, candidates.len());

    logging::log_run_start(
        candidates.len(),
        engine.gate().capacity(),
        engine.policy().max_attempts(),
    );

    let report = engine.validate(candidates, progress).await?;

    logging::log_run_complete(&report.summary);
    Ok(report)
}

/// 0 when every candidate is active, 1 otherwise
pub fn determine_exit_code(report: &RunReport) -> i32 {
    if report.summary.all_active() { 0 } else { 1 }
}
