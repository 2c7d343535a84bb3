//! Line and column lookup for spans.
//!
//! The emitter resolves every label through a [`LineOffsetTable`] built
//! once per source text, so rendering many diagnostics against one program
//! stays O(log L) per label.

use fyn_ir::{Position, Span};

/// Pre-computed byte offsets of every line start.
///
/// ```
/// use fyn_diagnostic::span_utils::LineOffsetTable;
///
/// let source = "1 2\n+ p";
/// let table = LineOffsetTable::build(source);
///
/// assert_eq!(table.line_from_offset(4), 2);
/// assert_eq!(table.line_text(source, 2), "+ p");
/// ```
#[derive(Clone, Debug, Default)]
pub struct LineOffsetTable {
    /// `offsets[i]` is the byte offset where line `i + 1` starts.
    offsets: Vec<u32>,
}

impl LineOffsetTable {
    /// Build a line offset table from source text.
    pub fn build(source: &str) -> Self {
        let mut offsets = vec![0u32];
        offsets.extend(
            newline_offsets(source).map(|i| u32::try_from(i + 1).unwrap_or(u32::MAX)),
        );
        LineOffsetTable { offsets }
    }

    /// 1-based line number containing `offset`.
    #[inline]
    pub fn line_from_offset(&self, offset: u32) -> u32 {
        let line_idx = match self.offsets.binary_search(&offset) {
            Ok(exact) => exact,
            Err(insert) => insert.saturating_sub(1),
        };
        u32::try_from(line_idx).unwrap_or(u32::MAX - 1) + 1
    }

    /// 1-based line/column of `offset`. Columns count characters.
    pub fn position(&self, source: &str, offset: u32) -> Position {
        let line = self.line_from_offset(offset);
        let line_start = self.line_start_offset(line).unwrap_or(0) as usize;
        let offset = (offset as usize).min(source.len());
        let col = source
            .get(line_start..offset)
            .map_or(0, |text| text.chars().count());
        Position::new(line, u32::try_from(col).unwrap_or(u32::MAX - 1) + 1)
    }

    /// Position of the first byte of `span`.
    pub fn span_start(&self, source: &str, span: Span) -> Position {
        self.position(source, span.start)
    }

    /// Byte offset of a line start (1-based line number).
    pub fn line_start_offset(&self, line: u32) -> Option<u32> {
        if line == 0 {
            return None;
        }
        self.offsets.get((line - 1) as usize).copied()
    }

    /// Text of a line without its newline. Empty when out of range.
    pub fn line_text<'s>(&self, source: &'s str, line: u32) -> &'s str {
        let Some(start) = self.line_start_offset(line) else {
            return "";
        };
        let end = self
            .line_start_offset(line + 1)
            .map_or(source.len(), |next| next as usize);
        source
            .get(start as usize..end)
            .unwrap_or("")
            .trim_end_matches(['\n', '\r'])
    }

    pub fn line_count(&self) -> usize {
        self.offsets.len()
    }
}

fn newline_offsets(source: &str) -> impl Iterator<Item = usize> + '_ {
    source
        .bytes()
        .enumerate()
        .filter_map(|(i, b)| (b == b'\n').then_some(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_from_offset_multiple_lines() {
        let table = LineOffsetTable::build("line1\nline2\nline3");
        assert_eq!(table.line_from_offset(0), 1);
        assert_eq!(table.line_from_offset(5), 1);
        assert_eq!(table.line_from_offset(6), 2);
        assert_eq!(table.line_from_offset(12), 3);
        assert_eq!(table.line_count(), 3);
    }

    #[test]
    fn test_position_counts_characters() {
        let source = "é1\n  ab";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.position(source, 2), Position::new(1, 2));
        assert_eq!(table.position(source, 6), Position::new(2, 3));
        assert_eq!(
            table.span_start(source, Span::new(7, 8)),
            Position::new(2, 4)
        );
    }

    #[test]
    fn test_line_text() {
        let source = "abc\r\ndef\n";
        let table = LineOffsetTable::build(source);
        assert_eq!(table.line_text(source, 1), "abc");
        assert_eq!(table.line_text(source, 2), "def");
        assert_eq!(table.line_text(source, 3), "");
        assert_eq!(table.line_text(source, 9), "");
    }
}
