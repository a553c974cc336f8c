//! Building blocks of the transcript parser.
//!
//! - [`header`] - header shape detection and splitting
//! - [`timestamp`] - stamp normalization and template sniffing
//! - [`sender`] - sender/body split
//! - [`validate`] - plausibility pre-check for raw text
//!
//! [`TranscriptParser`](crate::parser::TranscriptParser) wires these together.

pub mod header;
pub mod sender;
pub mod timestamp;
pub mod validate;

pub use header::{HeaderPattern, SplitTranscript, split_transcript};
pub use sender::split_sender;
pub use timestamp::{TimestampTemplate, normalize_header};
pub use validate::validate_export;
