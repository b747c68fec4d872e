//! Highlighting of search matches in table cells.
//!
//! SWAPI does the actual searching. This only finds which characters of a
//! displayed value correspond to the query, so the table can emphasise them.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Matcher {
    pub fn new() -> Self {
        Self {
            inner: SkimMatcherV2::default().ignore_case(),
        }
    }

    /// Char positions in `text` matched by `pattern`, in ascending order.
    ///
    /// Empty when the pattern is blank or does not match.
    pub fn indices(&self, text: &str, pattern: &str) -> Vec<usize> {
        let pattern = pattern.trim();
        if pattern.is_empty() {
            return Vec::new();
        }
        self.inner
            .fuzzy_indices(text, pattern)
            .map(|(_, indices)| indices)
            .unwrap_or_default()
    }
}
