// WHY: standalone phrase canonicalization, kept apart from matching so the
// fuzzy pattern and the ordering weights are computed from the same phrase form

/// Characters treated as transcription noise between the letters of a phrase:
/// whitespace (including line breaks), ASCII hyphen, soft hyphen, the Unicode
/// hyphens and the `¬` line-end hyphen found in early-modern transcriptions.
pub fn is_noise(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '-' | '\u{00AD}' | '\u{2010}' | '\u{2011}' | '\u{00AC}')
}

/// Canonicalizes candidate phrases before they are compiled into patterns
#[derive(Debug, Clone)]
pub struct PhraseNormalizer {
    /// Phrases with fewer code points than this (after normalization) are skipped
    pub min_chars: usize,
    /// Punctuation stripped from the end of a phrase
    pub trailing_punctuation: Vec<char>,
}

impl Default for PhraseNormalizer {
    fn default() -> Self {
        Self {
            min_chars: 2,
            trailing_punctuation: vec![',', '.'],
        }
    }
}

impl PhraseNormalizer {
    pub fn new(min_chars: usize, trailing_punctuation: Vec<char>) -> Self {
        Self { min_chars, trailing_punctuation }
    }

    /// Normalize a phrase, returning None when it is too short to match safely
    pub fn normalize(&self, phrase: &str) -> Option<String> {
        let mut buffer = String::with_capacity(phrase.len());
        if self.normalize_into(phrase, &mut buffer) {
            Some(buffer)
        } else {
            None
        }
    }

    /// Normalize into a supplied buffer; returns false when the phrase is skipped
    pub fn normalize_into(&self, phrase: &str, buffer: &mut String) -> bool {
        buffer.clear();
        buffer.reserve(phrase.len());

        let mut prev_was_space = false;
        for ch in phrase.trim().chars() {
            if ch.is_whitespace() {
                if !prev_was_space {
                    buffer.push(' ');
                    prev_was_space = true;
                }
            } else {
                buffer.push(ch);
                prev_was_space = false;
            }
        }

        // "Jo. Dee ,." -> "Jo. Dee"
        loop {
            let trimmed_len = buffer
                .trim_end_matches(|c: char| self.trailing_punctuation.contains(&c))
                .trim_end()
                .len();
            if trimmed_len == buffer.len() {
                break;
            }
            buffer.truncate(trimmed_len);
        }

        buffer.chars().count() >= self.min_chars
    }
}

/// The literal characters a phrase must match, with all noise removed
pub fn core_chars(phrase: &str) -> Vec<char> {
    phrase.chars().filter(|&ch| !is_noise(ch)).collect()
}
