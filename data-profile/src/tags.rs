use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Cap on visible entries, enforced by the aggregate before `add`.
pub const MAX_TAGS: usize = 10;

/// Latin or Cyrillic letters, digits, `,.`, spaces and hyphens,
/// up to 30 characters.
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9A-Za-zА-яЁё,. -]{1,30}$").unwrap());

/// Result of committing an in-place tag edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagCommit {
    /// The trimmed value replaced the placeholder at the given index.
    Committed,
    /// The input was empty, the entry was removed instead.
    Removed,
    /// The input failed validation, the list is unchanged.
    Rejected,
}

/// An ordered list of short text labels with in-place editing.
///
/// Insertion order is preserved and duplicates are permitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagList(Vec<String>);

impl TagList {
    /// Append an empty placeholder entry, enabling in-place editing.
    pub fn add(&mut self) {
        self.0.push(String::new());
    }

    /// Replace the entry at `index` with the trimmed input.
    ///
    /// An empty input is equivalent to [`TagList::remove`]. Input
    /// outside the allowed character set (or longer than 30 chars)
    /// is rejected and the list stays unchanged.
    pub fn commit(&mut self, index: usize, raw: &str) -> TagCommit {
        if index >= self.0.len() {
            return TagCommit::Rejected;
        }
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.remove(index);
            return TagCommit::Removed;
        }
        if !TAG_PATTERN.is_match(trimmed) {
            log::warn!("rejected tag input: {:?}", trimmed);
            return TagCommit::Rejected;
        }
        self.0[index] = trimmed.to_owned();
        TagCommit::Committed
    }

    /// Remove the entry at `index`; no-op when out of bounds.
    pub fn remove(&mut self, index: usize) {
        if index < self.0.len() {
            self.0.remove(index);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
