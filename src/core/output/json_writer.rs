//! JSON output writer.

use serde::Serialize;

use crate::error::Result;

/// Converts any report to a pretty-printed JSON string.
///
/// # Format
/// ```json
/// [
///   {
///     "label": "Alice",
///     "count": 3
///   }
/// ]
/// ```
pub fn to_json<T: Serialize + ?Sized>(report: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
