//! Content scans: word frequency, word-cloud text, emojis and links.
//!
//! Word and emoji statistics only look at authored text. System events and
//! `<Media omitted>` placeholders never contribute a token.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::{Arc, LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use super::{CountRow, ranked_counts};
use crate::error::Result;
use crate::record::MessageRecord;

static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{Extended_Pictographic}")
        .unwrap_or_else(|e| unreachable!("invalid emoji pattern: {e}"))
});

static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\b(?:https?://|www\.)[^\s<>"]+"#)
        .unwrap_or_else(|e| unreachable!("invalid url pattern: {e}"))
});

/// A flat set of lowercase words excluded from word statistics.
///
/// Loaded once and shared; clones point at the same set.
///
/// # Example
///
/// ```
/// use chatlens::core::content::Stopwords;
///
/// let stop = Stopwords::parse("the\nAND\n\n  hai \n");
/// assert!(stop.contains("and"));
/// assert!(stop.contains("hai"));
/// assert_eq!(stop.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Stopwords {
    words: Arc<HashSet<String>>,
}

impl Stopwords {
    /// An empty list; every word counts.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses one word per line. Words are trimmed and lowercased, blank
    /// lines skipped.
    pub fn parse(text: &str) -> Self {
        Self::from_words(text.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Self {
            words: Arc::new(words),
        }
    }

    /// Reads a stopword file.
    ///
    /// A missing file yields an empty list with a warning; word statistics
    /// just get noisier.
    ///
    /// # Errors
    ///
    /// Any I/O error other than "not found".
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(text) => {
                let stop = Self::parse(&text);
                debug!(path = %path.display(), words = stop.len(), "loaded stopwords");
                Ok(stop)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(path = %path.display(), "stopword list not found, using none");
                Ok(Self::empty())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn content_words<'a>(
    records: &'a [&MessageRecord],
    stopwords: &'a Stopwords,
) -> impl Iterator<Item = Vec<String>> + 'a {
    records.iter().filter(|r| r.has_content()).map(move |r| {
        r.body
            .to_lowercase()
            .split_whitespace()
            .filter(|w| !stopwords.contains(w))
            .map(str::to_string)
            .collect()
    })
}

/// The `n` most frequent lowercase words, most frequent first.
///
/// Words with equal counts keep the order they first appeared in.
pub fn most_common_words(records: &[&MessageRecord], stopwords: &Stopwords, n: usize) -> Vec<CountRow> {
    ranked_counts(content_words(records, stopwords).flatten())
        .into_iter()
        .take(n)
        .map(|(word, count)| CountRow::new(word, count))
        .collect()
}

/// Space-joined, lowercased, stopword-free text of every authored message.
///
/// This is the input a word-cloud renderer consumes.
pub fn word_cloud_corpus(records: &[&MessageRecord], stopwords: &Stopwords) -> String {
    content_words(records, stopwords)
        .filter(|words| !words.is_empty())
        .map(|words| words.join(" "))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Emoji characters in authored messages, most frequent first.
pub fn emoji_counts(records: &[&MessageRecord]) -> Vec<CountRow> {
    let emojis = records
        .iter()
        .filter(|r| r.has_content())
        .flat_map(|r| EMOJI.find_iter(&r.body).map(|m| m.as_str()));

    ranked_counts(emojis)
        .into_iter()
        .map(|(emoji, count)| CountRow::new(emoji, count))
        .collect()
}

/// Finds `http(s)://` and `www.` links in a piece of text.
///
/// Trailing sentence punctuation is not part of the link.
///
/// ```
/// use chatlens::core::content::extract_urls;
///
/// let urls = extract_urls("see https://example.com/a?b=1, or www.rust-lang.org.");
/// assert_eq!(urls, vec!["https://example.com/a?b=1", "www.rust-lang.org"]);
/// ```
pub fn extract_urls(text: &str) -> Vec<&str> {
    URL.find_iter(text)
        .map(|m| m.as_str().trim_end_matches(['.', ',', ';', ':', '!', '?', ')', '\'']))
        .collect()
}
