// WHY: explicit scanner instead of a regex so match offsets are exact code-point
// positions with no dependence on a regex engine's leftmost-first semantics

use super::normalization::{core_chars, is_noise};
use super::source_text::SourceText;

/// A phrase compiled into "core char, noise*, core char, noise*, ..." form
///
/// The pattern is deterministic: core characters are never noise, so at every
/// step either the next core character matches or the attempt fails. No
/// backtracking is needed and a match never starts or ends on noise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyPattern {
    core: Vec<char>,
}

impl FuzzyPattern {
    /// Compile a normalized phrase; None when no core characters remain
    pub fn compile(phrase: &str) -> Option<Self> {
        let core = core_chars(phrase);
        if core.is_empty() {
            None
        } else {
            Some(Self { core })
        }
    }

    /// Number of literal characters the pattern must see
    pub fn core_len(&self) -> usize {
        self.core.len()
    }

    /// Try to match starting exactly at `start`; returns the exclusive end
    pub fn match_at(&self, chars: &[char], start: usize) -> Option<usize> {
        let (first, rest) = self.core.split_first()?;
        if start >= chars.len() || !chars_eq_ignore_case(chars[start], *first) {
            return None;
        }

        let mut pos = start + 1;
        for &expected in rest {
            while pos < chars.len() && is_noise(chars[pos]) {
                pos += 1;
            }
            if pos < chars.len() && chars_eq_ignore_case(chars[pos], expected) {
                pos += 1;
            } else {
                return None;
            }
        }

        Some(pos)
    }

    /// All leftmost, non-overlapping occurrences as half-open code-point spans
    pub fn find_all(&self, source: &SourceText<'_>) -> Vec<(usize, usize)> {
        let chars = source.chars();
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos < chars.len() {
            match self.match_at(chars, pos) {
                Some(end) => {
                    matches.push((pos, end));
                    pos = end;
                }
                None => pos += 1,
            }
        }

        matches
    }

}

/// Case-insensitive comparison of single code points
///
/// Uppercasing is checked as well so letters with several lowercase forms
/// (final sigma `ς` and `σ` against `Σ`) still meet.
fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
}
