//! Sender/body split for one message segment.

use std::sync::LazyLock;

use regex::Regex;

use crate::record::Author;

/// Shortest run of characters followed by a colon and whitespace.
static SENDER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A(.+?):\s(.*)\z")
        .unwrap_or_else(|e| unreachable!("invalid sender pattern: {e}"))
});

/// Splits a segment into its author and trimmed body.
///
/// The first colon followed by whitespace separates sender from body. A
/// segment without one (joins, leaves, subject changes) becomes an
/// [`Author::System`] event whose body is the whole trimmed segment. A
/// prefix that is blank after trimming does not name anyone and is treated
/// the same way.
///
/// # Example
///
/// ```
/// use chatlens::parsing::sender::split_sender;
/// use chatlens::record::Author;
///
/// let (author, body) = split_sender("Alice: Hello there\n");
/// assert_eq!(author, Author::member("Alice"));
/// assert_eq!(body, "Hello there");
///
/// let (author, body) = split_sender("Alice joined using this group's invite link\n");
/// assert_eq!(author, Author::System);
/// assert_eq!(body, "Alice joined using this group's invite link");
/// ```
pub fn split_sender(segment: &str) -> (Author, &str) {
    if let Some(caps) = SENDER_PREFIX.captures(segment) {
        let name = caps.get(1).map_or("", |m| m.as_str().trim());
        let body = caps.get(2).map_or("", |m| m.as_str().trim());
        if !name.is_empty() {
            return (Author::member(name), body);
        }
    }
    (Author::System, segment.trim())
}
