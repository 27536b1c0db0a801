//! User-Agent evaluation
//!
//! Single-attempt probing, retry policy, the admission gate bounding
//! concurrency, and the engine that fans candidates out and collects
//! their outcomes.

pub mod collector;
pub mod engine;
pub mod gate;
pub mod probe;
pub mod retry;
pub mod structure;

// Re-export commonly used items
pub use collector::{OutcomeSender, ResultCollector};
pub use engine::{Engine, RunReport, ValidateUserAgents};
pub use gate::{AdmissionGate, AdmissionPermit};
pub use probe::{HttpProbe, Probe, ProbeResult};
pub use retry::{ReasonMode, RetryPolicy};
pub use structure::{DEFAULT_STRUCTURE_PATTERN, StructureCheck};
