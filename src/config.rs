//! Configuration types for parsing and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ParserConfig`] - how the transcript parser treats truncated exports
//! - [`AnalysisConfig`] - report sizes and the optional stopword list
//!
//! # Example
//!
//! ```rust
//! use chatlens::config::{MismatchPolicy, ParserConfig};
//! use chatlens::parser::TranscriptParser;
//!
//! let config = ParserConfig::new().with_mismatch(MismatchPolicy::Strict);
//! let parser = TranscriptParser::with_config(config);
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// What to do when header and segment counts disagree.
///
/// A mismatch means the export was cut off; pairing headers with segments
/// past that point can attribute text to the wrong timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Keep the shorter of the two counts and drop the rest (default).
    #[default]
    Truncate,
    /// Refuse the transcript with [`ChatlensError::SegmentMismatch`](crate::ChatlensError::SegmentMismatch).
    Strict,
}

/// Configuration for transcript parsing.
///
/// # Example
///
/// ```rust
/// use chatlens::config::{MismatchPolicy, ParserConfig};
///
/// let config = ParserConfig::strict();
/// assert_eq!(config.mismatch, MismatchPolicy::Strict);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Handling of header/segment count mismatches (default: truncate)
    pub mismatch: MismatchPolicy,
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that rejects truncated exports.
    pub fn strict() -> Self {
        Self {
            mismatch: MismatchPolicy::Strict,
        }
    }

    /// Sets the mismatch policy.
    #[must_use]
    pub fn with_mismatch(mut self, policy: MismatchPolicy) -> Self {
        self.mismatch = policy;
        self
    }
}

/// Configuration for the aggregation reports.
///
/// # Example
///
/// ```rust
/// use chatlens::config::AnalysisConfig;
///
/// let config = AnalysisConfig::new()
///     .with_top_words(10)
///     .with_stopwords_path("stop_hinglish.txt");
/// assert_eq!(config.top_words, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of entries in the most-common-words table (default: 20)
    pub top_words: usize,

    /// Number of members in the busiest-members ranking (default: 5)
    pub top_members: usize,

    /// Stopword list, one lowercase word per line (default: none)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopwords_path: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_words: 20,
            top_members: 5,
            stopwords_path: None,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the size of the most-common-words table.
    #[must_use]
    pub fn with_top_words(mut self, n: usize) -> Self {
        self.top_words = n;
        self
    }

    /// Sets the size of the busiest-members ranking.
    #[must_use]
    pub fn with_top_members(mut self, n: usize) -> Self {
        self.top_members = n;
        self
    }

    /// Sets the stopword list location.
    #[must_use]
    pub fn with_stopwords_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.stopwords_path = Some(path.into());
        self
    }
}
