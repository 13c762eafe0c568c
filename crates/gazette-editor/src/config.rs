//! Editor configuration

use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the editorial pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Rewrite casual phrasing and fix formatting
    pub refine: bool,

    /// Reframe weak summary openings, headlines and action prefixes
    pub enhance: bool,

    /// Check the record against the source text
    pub review: bool,

    /// Ask the model to verify claims when a provider is available
    pub fact_check: bool,

    /// Seconds to wait for the fact-check reply
    pub fact_check_timeout_secs: u64,

    /// Speculative passages kept in the review
    pub max_speculative_examples: usize,

    /// Unsupported technical terms kept in the review
    pub max_terminology_issues: usize,

    /// Characters of context on either side of a speculative word
    pub context_chars: usize,

    /// Confidence never drops below this
    pub min_confidence: f64,

    /// Confidence lost per issue found
    pub confidence_penalty: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            refine: true,
            enhance: true,
            review: true,
            fact_check: true,
            fact_check_timeout_secs: 30,
            max_speculative_examples: 10,
            max_terminology_issues: 5,
            context_chars: 50,
            min_confidence: 0.5,
            confidence_penalty: 0.1,
        }
    }
}

impl EditorConfig {
    /// Refine only, skip the review
    pub fn permissive() -> Self {
        Self {
            review: false,
            ..Self::default()
        }
    }

    /// Review with more evidence and a steeper penalty
    pub fn strict() -> Self {
        Self {
            max_speculative_examples: 25,
            max_terminology_issues: 15,
            context_chars: 80,
            min_confidence: 0.3,
            confidence_penalty: 0.2,
            ..Self::default()
        }
    }

    /// Turn everything off
    pub fn disabled() -> Self {
        Self {
            refine: false,
            enhance: false,
            review: false,
            fact_check: false,
            ..Self::default()
        }
    }

    /// Fact-check timeout as a duration
    pub fn fact_check_timeout(&self) -> Duration {
        Duration::from_secs(self.fact_check_timeout_secs)
    }

    /// Check that scores stay in 0.0-1.0
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.fact_check && self.fact_check_timeout_secs == 0 {
            return Err(EditorError::Config(
                "fact_check_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_confidence) {
            return Err(EditorError::Config(format!(
                "min_confidence must be within 0.0-1.0, got {}",
                self.min_confidence
            )));
        }
        if !(0.0..=1.0).contains(&self.confidence_penalty) {
            return Err(EditorError::Config(format!(
                "confidence_penalty must be within 0.0-1.0, got {}",
                self.confidence_penalty
            )));
        }
        Ok(())
    }
}
