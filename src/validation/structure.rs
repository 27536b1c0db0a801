//! Optional structural pre-check for User-Agent strings

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Config;
use crate::core::error::Result;
use crate::core::types::Candidate;

/// `product/version` followed by optional comments or further tokens,
/// e.g. `Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101 Firefox/121.0`.
pub const DEFAULT_STRUCTURE_PATTERN: &str =
    r"^[A-Za-z][A-Za-z0-9._+-]*/[A-Za-z0-9][A-Za-z0-9._+-]*(?:\s+\S.*)?$";

static DEFAULT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DEFAULT_STRUCTURE_PATTERN).expect("built-in structure pattern is valid")
});

#[derive(Debug, Clone)]
pub struct StructureCheck {
    pattern: Regex,
}

impl StructureCheck {
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_PATTERN.clone())
    }

    /// Build the check the configuration asks for, or `None` when disabled.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        if !config.structure_check_enabled() {
            return Ok(None);
        }
        Ok(Some(match config.compile_structure_pattern()? {
            Some(pattern) => Self::new(pattern),
            None => Self::builtin(),
        }))
    }

    pub fn accepts(&self, candidate: &Candidate) -> bool {
        self.pattern.is_match(candidate.as_str())
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }
}
