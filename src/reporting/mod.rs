//! Run summary and structured logging

pub mod logging;
pub mod summary;

// Re-export commonly used items
pub use summary::{RunSummary, failure_breakdown};
