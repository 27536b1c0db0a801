//! uacheck - validate User-Agent strings against a live probe endpoint
//!
//! Each candidate is sent as the `User-Agent` header of a GET request and
//! classified as active (HTTP 200) or failed with a reason. Candidates are
//! evaluated concurrently behind a bounded admission gate, retried a fixed
//! number of times, and collected into a [`RunReport`](validation::RunReport).
//!
//! ```no_run
//! use std::sync::Arc;
//! use uacheck::config::Config;
//! use uacheck::core::Candidate;
//! use uacheck::ui::SilentProgress;
//! use uacheck::validation::{Engine, ValidateUserAgents};
//!
//! # async fn run() -> uacheck::core::Result<()> {
//! let engine = Engine::from_config(&Config::default())?;
//! let candidates = vec![Candidate::new("curl/8.4.0")?];
//! let report = engine.validate(candidates, Arc::new(SilentProgress)).await?;
//! println!("{}", report.summary);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod discovery;
pub mod reporting;
pub mod ui;
pub mod validation;

pub use crate::core::{Candidate, FailedCandidate, FailureReason, Outcome, Result, UaCheckError};
pub use crate::reporting::RunSummary;
pub use crate::validation::{Engine, RunReport, ValidateUserAgents};
