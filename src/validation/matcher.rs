//! Lexical text matching
//!
//! Shared matching options for the scorer and the hallucination detector.
//! The defaults (case-insensitive substring) reproduce the loose heuristic
//! the pipeline was designed around; whole-word mode and case sensitivity
//! exist so edge cases can be probed deterministically.

use serde::{Deserialize, Serialize};

/// How a feature name is matched against creative text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMode {
    /// Feature name may occur anywhere, including inside a larger word
    Substring,
    /// Feature name must be delimited by non-alphanumeric characters
    WholeWord,
}

/// Matching options, configurable per installation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchOptions {
    pub case_sensitive: bool,
    pub match_mode: MatchMode,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            match_mode: MatchMode::Substring,
        }
    }
}

/// Applies [`MatchOptions`] to haystack/needle pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct TextMatcher {
    options: MatchOptions,
}

impl TextMatcher {
    pub fn new(options: MatchOptions) -> Self {
        Self { options }
    }

    /// True if `needle` occurs in `haystack` under the configured mode
    pub fn matches(&self, haystack: &str, needle: &str) -> bool {
        if self.options.case_sensitive {
            self.matches_folded(haystack, needle)
        } else {
            self.matches_folded(&haystack.to_lowercase(), &needle.to_lowercase())
        }
    }

    fn matches_folded(&self, haystack: &str, needle: &str) -> bool {
        match self.options.match_mode {
            MatchMode::Substring => haystack.contains(needle),
            MatchMode::WholeWord => contains_whole_word(haystack, needle),
        }
    }
}

/// Whole-word occurrence: the characters adjacent to the match, if any, must
/// not be alphanumeric. Multi-word needles are treated as a single phrase.
fn contains_whole_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    haystack.match_indices(needle).any(|(start, matched)| {
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric());
        let after_ok = haystack[start + matched.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        before_ok && after_ok
    })
}
