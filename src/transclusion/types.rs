//! Type definitions for image transclusion

use serde::{Deserialize, Serialize};

/// Direction of a document conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Disk-backed references become data URIs
    Inline,
    /// Data URIs become disk-backed references
    DeInline,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Inline => write!(f, "inline"),
            Direction::DeInline => write!(f, "de-inline"),
        }
    }
}

/// Result of converting a single image reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// `src` was rewritten
    Converted { replacement: String },
    /// `src` was kept as-is
    Failed { error: String },
}

/// Error information for an image that could not be converted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageFailure {
    /// The original `src`, left unchanged in the output.
    /// Data URIs are shortened to their header.
    pub src: String,
    pub error: String,
}

/// Result of a document conversion with success and failure tracking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransclusionResult {
    pub html: String,
    pub successes: usize,
    pub failures: Vec<ImageFailure>,
}

impl TransclusionResult {
    /// Number of candidate images, converted or not
    #[must_use]
    pub fn total(&self) -> usize {
        self.successes + self.failures.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Share of candidates left unconverted, `0.0` when there were none
    #[must_use]
    pub fn failure_rate(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.failures.len() as f64 / total as f64,
        }
    }
}
