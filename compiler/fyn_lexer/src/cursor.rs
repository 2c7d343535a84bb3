//! Character cursor with line/column tracking.
//!
//! The cursor walks a `&str` by byte offset and keeps the [`Position`] of the
//! current character up to date. Bulk skips go through [`Cursor::advance_to`],
//! which uses `memchr` to find newlines instead of decoding every character
//! twice.

use fyn_ir::Position;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
    loc: Position,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Cursor {
            src,
            pos: 0,
            loc: Position::START,
        }
    }

    /// Character at the cursor, `None` at end of input.
    #[inline]
    pub(crate) fn current(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    /// Character after the current one.
    #[inline]
    pub(crate) fn peek(&self) -> Option<char> {
        let mut chars = self.src[self.pos..].chars();
        chars.next();
        chars.next()
    }

    #[inline]
    pub(crate) fn is_eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Byte offset of the current character.
    #[inline]
    pub(crate) fn pos(&self) -> usize {
        self.pos
    }

    /// Line/column of the current character.
    #[inline]
    pub(crate) fn loc(&self) -> Position {
        self.loc
    }

    pub(crate) fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    /// Consume one character.
    #[inline]
    pub(crate) fn bump(&mut self) -> Option<char> {
        let c = self.current()?;
        self.pos += c.len_utf8();
        self.loc = self.loc.advance(c);
        Some(c)
    }

    /// Consume characters while `pred` holds.
    pub(crate) fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.current() {
            if !pred(c) {
                break;
            }
            self.bump();
        }
    }

    /// Jump forward to byte offset `end`, updating line and column.
    ///
    /// `end` must lie on a character boundary at or after the cursor.
    pub(crate) fn advance_to(&mut self, end: usize) {
        debug_assert!(end >= self.pos && self.src.is_char_boundary(end));
        let skipped = &self.src[self.pos..end];
        let bytes = skipped.as_bytes();
        let newlines = memchr::memchr_iter(b'\n', bytes).count();
        let newlines = u32::try_from(newlines).unwrap_or(u32::MAX);
        if let Some(last) = memchr::memrchr(b'\n', bytes) {
            let tail = u32::try_from(skipped[last + 1..].chars().count()).unwrap_or(u32::MAX);
            self.loc = Position::new(self.loc.line.saturating_add(newlines), 1 + tail);
        } else {
            let width = u32::try_from(skipped.chars().count()).unwrap_or(u32::MAX);
            self.loc = Position::new(self.loc.line, self.loc.col.saturating_add(width));
        }
        self.pos = end;
    }

    /// Source text from `start` up to the cursor.
    #[inline]
    pub(crate) fn slice_from(&self, start: usize) -> &'a str {
        &self.src[start..self.pos]
    }
}

#[cfg(test)]
mod tests;
