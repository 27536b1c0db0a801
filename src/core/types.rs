use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

use crate::core::constants::error_messages;
use crate::core::error::{Result, UaCheckError};

/// One User-Agent string under evaluation.
///
/// Candidates are immutable once created and cheap to clone, so every
/// evaluation task can own a handle to the same string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Candidate(Arc<str>);

impl Candidate {
    /// Create a candidate, rejecting empty or whitespace-only values.
    ///
    /// # Examples
    /// ```
    /// use uacheck::core::types::Candidate;
    ///
    /// let candidate = Candidate::new("Mozilla/5.0 (X11; Linux x86_64)").unwrap();
    /// assert_eq!(candidate.as_str(), "Mozilla/5.0 (X11; Linux x86_64)");
    /// assert!(Candidate::new("   ").is_err());
    /// ```
    pub fn new(value: impl AsRef<str>) -> Result<Self> {
        let value = value.as_ref();
        if value.trim().is_empty() {
            return Err(UaCheckError::InvalidCandidate(
                "User-Agent cannot be empty".to_string(),
            ));
        }
        Ok(Self(Arc::from(value)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Candidate {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Candidate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Coarse classification of a failure, used for grouping and counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Construction,
    Transport,
    Status,
    Structure,
    Internal,
}

impl FailureKind {
    /// All kinds in display order
    pub const ALL: [FailureKind; 5] = [
        FailureKind::Transport,
        FailureKind::Status,
        FailureKind::Construction,
        FailureKind::Structure,
        FailureKind::Internal,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::Construction => "Request Construction Errors",
            FailureKind::Transport => "Network/Connection Errors",
            FailureKind::Status => "Non-200 Responses",
            FailureKind::Structure => "Structural Rejections",
            FailureKind::Internal => "Internal Errors",
        }
    }
}

/// Why a candidate was classified as failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The request could not be built (e.g. the value is not a legal header)
    Construction(String),
    /// Network-level error: DNS, refused connection, timeout
    Transport(String),
    /// The endpoint answered with something other than 200
    Status(u16),
    /// Rejected by the structural pre-check; no request was sent
    InvalidStructure,
    /// The evaluation task faulted
    Internal(String),
    /// Every attempt's reason, oldest first (opt-in reporting mode)
    Aggregated(Vec<FailureReason>),
}

impl FailureReason {
    pub fn kind(&self) -> FailureKind {
        match self {
            FailureReason::Construction(_) => FailureKind::Construction,
            FailureReason::Transport(_) => FailureKind::Transport,
            FailureReason::Status(_) => FailureKind::Status,
            FailureReason::InvalidStructure => FailureKind::Structure,
            FailureReason::Internal(_) => FailureKind::Internal,
            FailureReason::Aggregated(reasons) => reasons
                .last()
                .map(FailureReason::kind)
                .unwrap_or(FailureKind::Internal),
        }
    }

    /// Status code carried by this reason, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FailureReason::Status(code) => Some(*code),
            FailureReason::Aggregated(reasons) => reasons.last().and_then(|r| r.status_code()),
            _ => None,
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Construction(detail) => write!(f, "Error creating request: {detail}"),
            FailureReason::Transport(detail) => write!(f, "Request failed: {detail}"),
            FailureReason::Status(code) => write!(f, "Received status code: {code}"),
            FailureReason::InvalidStructure => f.write_str(error_messages::INVALID_STRUCTURE),
            FailureReason::Internal(detail) => write!(f, "internal error: {detail}"),
            FailureReason::Aggregated(reasons) => {
                for (i, reason) in reasons.iter().enumerate() {
                    if i > 0 {
                        f.write_str("; ")?;
                    }
                    write!(f, "attempt {}: {reason}", i + 1)?;
                }
                Ok(())
            }
        }
    }
}

impl Serialize for FailureReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A candidate together with the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCandidate {
    #[serde(rename = "user_agent")]
    pub candidate: Candidate,
    pub reason: FailureReason,
}

impl FailedCandidate {
    pub fn new(candidate: Candidate, reason: FailureReason) -> Self {
        Self { candidate, reason }
    }

    pub fn kind(&self) -> FailureKind {
        self.reason.kind()
    }
}

impl fmt::Display for FailedCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.candidate, self.reason)
    }
}

/// Classification produced exactly once per candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Active(Candidate),
    Failed(FailedCandidate),
}

impl Outcome {
    pub fn failed(candidate: Candidate, reason: FailureReason) -> Self {
        Outcome::Failed(FailedCandidate::new(candidate, reason))
    }

    pub fn candidate(&self) -> &Candidate {
        match self {
            Outcome::Active(candidate) => candidate,
            Outcome::Failed(failed) => &failed.candidate,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Outcome::Active(_))
    }
}

/// Signal that one candidate's evaluation has concluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressUnit;
