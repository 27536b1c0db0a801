//! Candidate discovery
//!
//! This module turns the operator's input (files, stdin, comma-separated
//! lists) into the ordered candidate sequence the engine consumes.

pub mod loader;

// Re-export commonly used items
pub use loader::{CandidateLoader, LoadCandidates, STDIN_PATH};
