//! Output formatting and display logic for uacheck

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::config::Config;
use crate::core::constants::{display, output_formats};
use crate::core::error::{Result, UaCheckError};
use crate::core::types::{Candidate, FailureKind, FailureReason};
use crate::reporting::summary::{RunSummary, failure_breakdown};
use crate::ui::color::{Colors, colorize, label_value};
use crate::validation::engine::RunReport;

/// Display configuration information in a user-friendly format
pub fn display_config_info(config: &Config, candidate_count: usize) {
    println!("{}", label_value("Probe endpoint", config.probe_url()));
    println!(
        "{}",
        label_value("Concurrency", &config.concurrency_limit().to_string())
    );
    println!(
        "{}",
        label_value("Attempts per User-Agent", &config.max_attempts().to_string())
    );
    println!(
        "{}",
        label_value(
            "Timeout (seconds)",
            &config.timeout_duration().as_secs().to_string()
        )
    );
    if config.structure_check_enabled() {
        let pattern = config.structure_pattern.as_deref().unwrap_or("built-in");
        println!("{}", label_value("Structure check", pattern));
    }
    println!(
        "\n{} {}",
        colorize(display::SEARCH_EMOJI, Colors::BRIGHT_CYAN),
        colorize(
            &format!("Checking {candidate_count} User-Agent(s)... Please wait."),
            Colors::BOLD
        )
    );
}

/// Print a finished run in the requested format
pub fn display_results(report: &RunReport, output_format: &str) -> Result<()> {
    let rendered = match output_format {
        output_formats::JSON => render_json(report, Utc::now())?,
        output_formats::MINIMAL => render_minimal(report),
        _ => render_text(report),
    };
    print!("{rendered}");
    Ok(())
}

fn kind_emoji(kind: FailureKind) -> &'static str {
    match kind {
        FailureKind::Transport => display::NETWORK_ERROR_EMOJI,
        FailureKind::Status => display::STATUS_ERROR_EMOJI,
        FailureKind::Structure => display::STRUCTURE_ERROR_EMOJI,
        FailureKind::Construction | FailureKind::Internal => display::OTHER_EMOJI,
    }
}

/// Human-oriented report: active list, failures grouped by kind, summary line.
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        display::SUCCESS_EMOJI,
        colorize("Review completed.", Colors::BRIGHT_GREEN)
    );
    let _ = writeln!(out, "{}", display::SEPARATOR);

    let _ = writeln!(
        out,
        "{} {}",
        display::ACTIVE_EMOJI,
        colorize("Active User-Agents:", Colors::BOLD)
    );
    if report.active.is_empty() {
        let _ = writeln!(
            out,
            "{}",
            colorize("No active User-Agents found!", Colors::YELLOW)
        );
    } else {
        for candidate in &report.active {
            let _ = writeln!(out, "{}", colorize(candidate.as_str(), Colors::GREEN));
            let _ = writeln!(out, "{}", display::SEPARATOR);
        }
    }
    let _ = writeln!(out, "{}", display::SEPARATOR);

    if report.failed.is_empty() {
        let _ = writeln!(
            out,
            "{} {}",
            display::CELEBRATE_EMOJI,
            colorize("All User-Agents are working correctly!", Colors::BRIGHT_GREEN)
        );
    } else {
        let _ = writeln!(
            out,
            "{} {}\n",
            display::ERROR_EMOJI,
            colorize(
                &format!("{} inactive User-Agent(s) found:", report.failed.len()),
                Colors::BRIGHT_RED
            )
        );
        for (kind, count) in failure_breakdown(&report.failed) {
            let _ = writeln!(
                out,
                "{} {}",
                kind_emoji(kind),
                colorize(&format!("{} ({count})", kind.label()), Colors::BOLD)
            );
            for entry in report.failed.iter().filter(|f| f.kind() == kind) {
                let _ = writeln!(out, "User-Agent: {}", entry.candidate);
                let _ = writeln!(
                    out,
                    "Reason: {}",
                    colorize(&entry.reason.to_string(), Colors::RED)
                );
                let _ = writeln!(out, "{}", display::SEPARATOR);
            }
        }
    }

    let _ = writeln!(out, "\n{}", render_summary_line(&report.summary));
    out
}

fn render_summary_line(summary: &RunSummary) -> String {
    let color = if summary.all_active() {
        Colors::BRIGHT_GREEN
    } else {
        Colors::BRIGHT_YELLOW
    };
    colorize(&format!("📊 {summary}"), color)
}

/// One tab-separated line per candidate, active ones first.
pub fn render_minimal(report: &RunReport) -> String {
    let mut out = String::new();
    for candidate in &report.active {
        let _ = writeln!(out, "OK\t{candidate}");
    }
    for entry in &report.failed {
        let _ = writeln!(out, "FAIL\t{}\t{}", entry.reason, entry.candidate);
    }
    out
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    user_agent: &'a Candidate,
    reason: &'a FailureReason,
    kind: FailureKind,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    summary: &'a RunSummary,
    success_rate: f64,
    active: &'a [Candidate],
    failed: Vec<JsonFailure<'a>>,
    breakdown: BTreeMap<FailureKind, usize>,
    generated_at: String,
}

/// Machine-readable report.
pub fn render_json(report: &RunReport, generated_at: DateTime<Utc>) -> Result<String> {
    let failed = report
        .failed
        .iter()
        .map(|entry| JsonFailure {
            user_agent: &entry.candidate,
            reason: &entry.reason,
            kind: entry.kind(),
        })
        .collect();

    let json = JsonReport {
        summary: &report.summary,
        success_rate: (report.summary.success_rate() * 10.0).round() / 10.0,
        active: &report.active,
        failed,
        breakdown: failure_breakdown(&report.failed).into_iter().collect(),
        generated_at: generated_at.to_rfc3339(),
    };

    let mut rendered = serde_json::to_string_pretty(&json)
        .map_err(|e| UaCheckError::Internal(format!("could not serialize report: {e}")))?;
    rendered.push('\n');
    Ok(rendered)
}
