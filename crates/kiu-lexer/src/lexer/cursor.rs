use std::borrow::Cow;

use kiu_common::Span;

/// Low-level byte reader over an in-memory source buffer.
///
/// The read point only moves forward. Peeking is plain indexing, and
/// extracting a lexeme is slicing between two recorded offsets.
pub struct Cursor<'src> {
    source: &'src [u8],
    /// Byte offset of the *next* byte to be consumed.
    offset: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src [u8]) -> Self {
        Self { source, offset: 0 }
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Peek at the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.source.get(self.offset).copied()
    }

    /// Up to `n` upcoming bytes; fewer near the end of input.
    pub fn peek_n(&self, n: usize) -> &'src [u8] {
        let end = self.offset.saturating_add(n).min(self.source.len());
        &self.source[self.offset.min(end)..end]
    }

    /// Consume and return the next byte.
    pub fn advance(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.offset += 1;
        Some(b)
    }

    /// Consume the next byte if it matches `expected`.
    pub fn eat(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.offset += 1;
            true
        } else {
            false
        }
    }

    /// Consume bytes while `predicate` returns true.
    pub fn eat_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while let Some(b) = self.peek() {
            if predicate(b) {
                self.offset += 1;
            } else {
                break;
            }
        }
    }

    /// True if there are no more bytes.
    pub fn is_eof(&self) -> bool {
        self.offset >= self.source.len()
    }

    /// Raw bytes between offsets `start` and `end`.
    pub fn slice(&self, start: usize, end: usize) -> &'src [u8] {
        &self.source[start..end]
    }

    /// Raw bytes from `start` to the current offset.
    pub fn slice_from(&self, start: usize) -> &'src [u8] {
        self.slice(start, self.offset)
    }

    /// Text between offsets `start` and `end`, with invalid UTF-8 replaced.
    pub fn extract(&self, start: usize, end: usize) -> Cow<'src, str> {
        String::from_utf8_lossy(self.slice(start, end))
    }

    /// Text from `start` to the current offset.
    pub fn extract_from(&self, start: usize) -> Cow<'src, str> {
        self.extract(start, self.offset)
    }

    /// Build a Span from a start offset to the current offset.
    pub fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.offset)
    }
}
