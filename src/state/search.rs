//! Search over the displayed text.
//!
//! Search is independent of header segmentation: it runs over whatever text is
//! currently displayed (the full transcript or a single final-only block) and
//! reports matches in character offsets into that text.
//!
//! - Plain mode finds every occurrence, overlapping ones included.
//! - Regex mode finds successive non-overlapping matches; zero-width matches
//!   advance the scan by one character.

use crate::model::CharMap;
use regex::RegexBuilder;
use serde::Serialize;
use std::borrow::Cow;
use tracing::debug;

// ===== MatchPosition =====

/// A search hit. Offsets are character indices into the displayed text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchPosition {
    /// First character of the match.
    pub start: usize,
    /// End of the match (exclusive).
    pub end: usize,
    /// Matched text, as it appears in the source.
    pub text: String,
}

// ===== SearchQuery =====

/// Query text plus the flags that affect matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    /// Query text.
    pub text: String,
    /// Match case exactly.
    pub case_sensitive: bool,
    /// Treat `text` as a regex.
    pub regex: bool,
}

impl SearchQuery {
    /// Case-insensitive plain-text query.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            case_sensitive: false,
            regex: false,
        }
    }

    /// Set case sensitivity.
    pub fn case_sensitive(mut self, yes: bool) -> Self {
        self.case_sensitive = yes;
        self
    }

    /// Set regex mode.
    pub fn regex(mut self, yes: bool) -> Self {
        self.regex = yes;
        self
    }
}

/// Matches for one query plus the regex compile error, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchOutcome {
    /// Matches sorted by start.
    pub matches: Vec<MatchPosition>,
    /// Regex compile error, if any.
    pub error: Option<String>,
}

// ===== Search Execution =====

/// Run `query` over `text`.
///
/// An empty query yields no matches and no error. In regex mode a query that
/// fails to compile yields no matches and the compiler message in `error`.
pub fn execute_search(text: &str, query: &SearchQuery) -> SearchOutcome {
    if query.text.is_empty() {
        return SearchOutcome::default();
    }

    let outcome = if query.regex {
        match find_regex_matches(text, &query.text, query.case_sensitive) {
            Ok(matches) => SearchOutcome {
                matches,
                error: None,
            },
            Err(err) => SearchOutcome {
                matches: Vec::new(),
                error: Some(err.to_string()),
            },
        }
    } else {
        SearchOutcome {
            matches: find_literal_matches(text, &query.text, query.case_sensitive),
            error: None,
        }
    };

    debug!(
        matches = outcome.matches.len(),
        regex = query.regex,
        failed = outcome.error.is_some(),
        "Executed search"
    );
    outcome
}

/// Fold a character to lower case, one char in, one char out.
///
/// Keeps folded and original text aligned character by character.
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

fn fold(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// Find every occurrence of `needle`, overlapping ones included.
fn find_literal_matches(text: &str, needle: &str, case_sensitive: bool) -> Vec<MatchPosition> {
    let (haystack, needle): (Cow<'_, str>, Cow<'_, str>) = if case_sensitive {
        (Cow::Borrowed(text), Cow::Borrowed(needle))
    } else {
        (Cow::Owned(fold(text)), Cow::Owned(fold(needle)))
    };
    let original = CharMap::new(text);
    let folded = CharMap::new(&haystack);
    let needle_chars = needle.chars().count();

    let mut matches = Vec::new();
    let mut start = 0;
    while start < haystack.len() {
        let Some(pos) = haystack[start..].find(needle.as_ref()) else {
            break;
        };
        let found = start + pos;
        let char_start = folded.byte_to_char(found);
        let char_end = char_start + needle_chars;
        matches.push(MatchPosition {
            start: char_start,
            end: char_end,
            text: text[original.char_to_byte(char_start)..original.char_to_byte(char_end)]
                .to_string(),
        });
        // One character past the found start, so overlapping hits are kept.
        start = folded.next_boundary(found);
    }
    matches
}

/// Find successive regex matches.
fn find_regex_matches(
    text: &str,
    pattern: &str,
    case_sensitive: bool,
) -> Result<Vec<MatchPosition>, regex::Error> {
    let regex = RegexBuilder::new(pattern)
        .case_insensitive(!case_sensitive)
        .build()?;
    let map = CharMap::new(text);

    let mut matches = Vec::new();
    let mut pos = 0;
    while pos <= text.len() {
        let Some(m) = regex.find_at(text, pos) else {
            break;
        };
        matches.push(MatchPosition {
            start: map.byte_to_char(m.start()),
            end: map.byte_to_char(m.end()),
            text: m.as_str().to_string(),
        });
        if m.start() == m.end() {
            if m.end() >= text.len() {
                break;
            }
            pos = map.next_boundary(m.end());
        } else {
            pos = m.end();
        }
    }
    Ok(matches)
}

// ===== SearchState =====

/// Search box state: query input, flags, and the current match list.
///
/// The match list is recomputed by [`SearchState::refresh`] whenever the query,
/// a flag, or the displayed text changes; every refresh resets the current
/// match to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    /// Raw query text as typed.
    pub query: String,
    /// Input cursor, as a character index into `query`.
    pub cursor: usize,
    /// Whether the search box has keyboard focus.
    pub focused: bool,
    /// Match case exactly.
    pub case_sensitive: bool,
    /// Treat the query as a regex.
    pub regex: bool,
    matches: Vec<MatchPosition>,
    current_match: usize,
    error: Option<String>,
}

impl SearchState {
    /// Empty search with the given default flags.
    pub fn new(case_sensitive: bool, regex: bool) -> Self {
        Self {
            case_sensitive,
            regex,
            ..Self::default()
        }
    }

    /// The query as it affects matching.
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            text: self.query.clone(),
            case_sensitive: self.case_sensitive,
            regex: self.regex,
        }
    }

    /// Recompute matches over `text` and reset the current match.
    pub fn refresh(&mut self, text: &str) {
        let outcome = execute_search(text, &self.to_query());
        self.matches = outcome.matches;
        self.error = outcome.error;
        self.current_match = 0;
    }

    /// Matches from the last refresh.
    pub fn matches(&self) -> &[MatchPosition] {
        &self.matches
    }

    /// Number of matches.
    pub fn match_count(&self) -> usize {
        self.matches.len()
    }

    /// Index of the current match. 0 when there are none.
    pub fn current_match(&self) -> usize {
        self.current_match
    }

    /// The current match, if there are any matches.
    pub fn current(&self) -> Option<&MatchPosition> {
        self.matches.get(self.current_match)
    }

    /// Regex compile error from the last refresh.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Matches and error as one value.
    pub fn outcome(&self) -> SearchOutcome {
        SearchOutcome {
            matches: self.matches.clone(),
            error: self.error.clone(),
        }
    }

    pub(crate) fn set_current_match(&mut self, index: usize) {
        self.current_match = index;
    }
}

// ===== Tests =====

#[cfg(test)]
#[path = "search_tests.rs"]
mod tests;
