//! Command-line interface definition using clap.
//!
//! This module defines [`Args`] and how its flags map onto the library's
//! configuration types:
//!
//! ```rust
//! use chatlens::cli::Args;
//! use clap::Parser;
//!
//! let args = Args::parse_from(["chatlens", "words", "chat.txt", "--user", "Alice", "--top", "5"]);
//! assert_eq!(args.analysis_config().top_words, 5);
//! assert!(args.filter_config().unwrap().has_user_filter());
//! ```

use std::path::PathBuf;

use clap::Parser;

use crate::config::{AnalysisConfig, MismatchPolicy, ParserConfig};
use crate::core::filter::{FilterConfig, OVERALL, UserSelection};
use crate::error::Result;
use crate::format::OutputFormat;
use crate::report::ReportKind;

/// Analyse WhatsApp chat exports: activity, members, words and emojis.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatlens")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatlens summary \"WhatsApp Chat with Family.txt\"
    chatlens all chat.txt --format json
    chatlens words chat.txt --user Alice --stopwords stop_hinglish.txt
    chatlens heatmap chat.txt --after 2024-01-01 --format csv")]
pub struct Args {
    /// Report to produce
    #[arg(value_enum)]
    pub report: ReportKind,

    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Member to analyse, or "Overall" for everyone
    #[arg(short, long, value_name = "NAME", default_value = OVERALL)]
    pub user: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Only messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Only messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Stopword list, one word per line
    #[arg(long, value_name = "PATH")]
    pub stopwords: Option<PathBuf>,

    /// Number of entries in the word ranking
    #[arg(long, value_name = "N", default_value_t = 20)]
    pub top: usize,

    /// Reject truncated exports instead of dropping unmatched headers
    #[arg(long)]
    pub strict: bool,
}

impl Args {
    pub fn parser_config(&self) -> ParserConfig {
        let policy = if self.strict {
            MismatchPolicy::Strict
        } else {
            MismatchPolicy::Truncate
        };
        ParserConfig::new().with_mismatch(policy)
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        let config = AnalysisConfig::new().with_top_words(self.top);
        match &self.stopwords {
            Some(path) => config.with_stopwords_path(path),
            None => config,
        }
    }

    /// Builds the record filter from `--user`, `--after` and `--before`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatlensError::InvalidDate`](crate::ChatlensError::InvalidDate)
    /// for a malformed date.
    pub fn filter_config(&self) -> Result<FilterConfig> {
        let Ok(selection) = self.user.parse::<UserSelection>();
        let mut filter = FilterConfig::new().with_selection(selection);
        if let Some(after) = &self.after {
            filter = filter.with_date_from(after)?;
        }
        if let Some(before) = &self.before {
            filter = filter.with_date_to(before)?;
        }
        Ok(filter)
    }
}
