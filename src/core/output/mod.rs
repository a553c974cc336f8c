//! Report serialisation.
//!
//! Every report table is a slice of `serde` rows, so one generic writer per
//! format covers them all:
//! - [`to_csv`] - semicolon-delimited CSV, header from the field names - requires `csv-output` feature
//! - [`heatmap_to_csv`] - the weekday × hour-bucket grid as CSV - requires `csv-output` feature
//! - [`to_json`] - pretty-printed JSON of any report - requires `json-output` feature
//!
//! Writers return strings; where the text goes is up to the caller.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatlens::Result<()> {
//! use chatlens::core::CountRow;
//! use chatlens::core::output::{to_csv, to_json};
//!
//! let rows = vec![CountRow::new("Alice", 3), CountRow::new("Bob", 1)];
//!
//! assert_eq!(to_csv(&rows)?, "label;count\nAlice;3\nBob;1\n");
//! assert!(to_json(&rows)?.contains("\"label\": \"Alice\""));
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{heatmap_to_csv, to_csv};
#[cfg(feature = "json-output")]
pub use json_writer::to_json;
