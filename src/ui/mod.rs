//! User interface and interaction
//!
//! CLI parsing, interactive entry, progress rendering, result output
//! and shell completion generation.

pub mod cli;
pub mod color;
pub mod completion;
pub mod output;
pub mod progress;
pub mod prompt;

// Re-export commonly used items
pub use cli::{Cli, Commands, cli_to_config};
pub use completion::print_completions;
pub use progress::{ProgressReporter, ProgressSink, ProgressTick, SilentProgress};
pub use prompt::CandidatePrompt;
