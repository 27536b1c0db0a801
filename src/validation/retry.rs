use log::debug;

use crate::config::Config;
use crate::core::error::Result;
use crate::core::types::{Candidate, FailureReason, Outcome};
use crate::validation::probe::Probe;
use crate::validation::structure::StructureCheck;

/// Which failure reason a candidate reports after running out of attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReasonMode {
    /// Keep only the final attempt's reason
    #[default]
    LastOnly,
    /// Keep every attempt's reason, oldest first
    Aggregate,
}

/// Runs a [`Probe`] up to `max_attempts` times, stopping at the first success.
///
/// Attempts are retried immediately. When a [`StructureCheck`] is set it
/// runs once before any network traffic, and a rejection is final.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    reason_mode: ReasonMode,
    structure: Option<StructureCheck>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(crate::core::constants::defaults::MAX_RETRIES)
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            reason_mode: ReasonMode::LastOnly,
            structure: None,
        }
    }

    pub fn with_reason_mode(mut self, reason_mode: ReasonMode) -> Self {
        self.reason_mode = reason_mode;
        self
    }

    pub fn with_structure_check(mut self, check: StructureCheck) -> Self {
        self.structure = Some(check);
        self
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let reason_mode = if config.aggregate_reasons() {
            ReasonMode::Aggregate
        } else {
            ReasonMode::LastOnly
        };
        let mut policy = Self::new(config.max_attempts()).with_reason_mode(reason_mode);
        if let Some(check) = StructureCheck::from_config(config)? {
            policy = policy.with_structure_check(check);
        }
        Ok(policy)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn reason_mode(&self) -> ReasonMode {
        self.reason_mode
    }

    pub fn has_structure_check(&self) -> bool {
        self.structure.is_some()
    }

    /// Evaluate one candidate to exactly one outcome.
    pub async fn evaluate<P: Probe + ?Sized>(&self, probe: &P, candidate: &Candidate) -> Outcome {
        if let Some(ref check) = self.structure
            && !check.accepts(candidate)
        {
            debug!("✗ {candidate} rejected by structure check");
            return Outcome::failed(candidate.clone(), FailureReason::InvalidStructure);
        }

        let mut reasons = Vec::new();
        for attempt in 1..=self.max_attempts {
            match probe.probe(candidate).await {
                Ok(()) => {
                    debug!("✓ {candidate} (attempt {attempt}/{})", self.max_attempts);
                    return Outcome::Active(candidate.clone());
                }
                Err(reason) => {
                    debug!(
                        "✗ {candidate} (attempt {attempt}/{}): {reason}",
                        self.max_attempts
                    );
                    reasons.push(reason);
                }
            }
        }

        let reason = match self.reason_mode {
            ReasonMode::Aggregate => FailureReason::Aggregated(reasons),
            ReasonMode::LastOnly => reasons
                .pop()
                .unwrap_or_else(|| FailureReason::Internal("no attempt was made".to_string())),
        };
        Outcome::failed(candidate.clone(), reason)
    }
}
