// WHY: every offset the engine hands out is a code-point index; slicing needs bytes.
// Indexes the text once so both conversions are O(1) afterwards.

/// 0-based byte position in source text
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct BytePos(pub usize);

/// 0-based character (code point) position in source text
#[repr(transparent)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug)]
pub struct CharPos(pub usize);

impl From<BytePos> for usize {
    fn from(pos: BytePos) -> Self {
        pos.0
    }
}

impl From<CharPos> for usize {
    fn from(pos: CharPos) -> Self {
        pos.0
    }
}

/// Immutable source text with a code-point index
#[derive(Debug, Clone)]
pub struct SourceText<'a> {
    text: &'a str,
    chars: Vec<char>,
    /// byte_offsets[i] is the byte offset of char i; one trailing entry for text.len()
    byte_offsets: Vec<usize>,
}

impl<'a> SourceText<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut byte_offsets = Vec::with_capacity(text.len() + 1);

        for (byte_idx, ch) in text.char_indices() {
            chars.push(ch);
            byte_offsets.push(byte_idx);
        }
        byte_offsets.push(text.len());

        Self { text, chars, byte_offsets }
    }

    pub fn as_str(&self) -> &'a str {
        self.text
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Length in code points
    pub fn char_len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Byte offset of a code-point position, clamped to the end of the text
    pub fn byte_pos(&self, pos: CharPos) -> BytePos {
        let idx = pos.0.min(self.chars.len());
        BytePos(self.byte_offsets[idx])
    }

    /// Borrow the text between two code-point positions (half-open, clamped)
    pub fn slice(&self, start: CharPos, end: CharPos) -> &'a str {
        let start_byte = self.byte_pos(start).0;
        let end_byte = self.byte_pos(end).0.max(start_byte);
        &self.text[start_byte..end_byte]
    }

    /// Code-point position of a byte offset that lies on a char boundary
    pub fn char_pos(&self, byte: BytePos) -> Option<CharPos> {
        self.byte_offsets.binary_search(&byte.0).ok().map(CharPos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_offsets() {
        let source = SourceText::new("Euclidis Elementa");
        assert_eq!(source.char_len(), 17);
        assert_eq!(source.slice(CharPos(0), CharPos(8)), "Euclidis");
        assert_eq!(source.byte_pos(CharPos(9)), BytePos(9));
    }

    #[test]
    fn test_multibyte_offsets() {
        // 'æ' and 'ſ' are two bytes each in UTF-8
        let source = SourceText::new("Præfatio ſecunda");
        assert_eq!(source.char_len(), 16);
        assert_eq!(source.slice(CharPos(0), CharPos(8)), "Præfatio");
        assert_eq!(source.slice(CharPos(9), CharPos(16)), "ſecunda");
        assert_eq!(source.byte_pos(CharPos(3)), BytePos(4));
        assert_eq!(source.char_pos(BytePos(4)), Some(CharPos(3)));
        assert_eq!(source.char_pos(BytePos(3)), None);
    }

    #[test]
    fn test_clamped_slice() {
        let source = SourceText::new("abc");
        assert_eq!(source.slice(CharPos(1), CharPos(99)), "bc");
        assert_eq!(source.slice(CharPos(2), CharPos(1)), "");
        assert_eq!(source.byte_pos(CharPos(99)), BytePos(3));
    }

    #[test]
    fn test_empty_text() {
        let source = SourceText::new("");
        assert!(source.is_empty());
        assert_eq!(source.slice(CharPos(0), CharPos(0)), "");
    }
}
