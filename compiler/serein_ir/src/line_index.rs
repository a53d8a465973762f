//! Offset to row/line-text mapping for diagnostics.
//!
//! Every token and every node only stores a byte `Span`. Rows and the text
//! of the offending line are recovered on demand through a `LineIndex`
//! built once per source.

use super::Span;

/// Start offsets of every line in a source text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineIndex {
    line_starts: Vec<u32>,
    len: u32,
}

/// A resolved position: 1-based row and column plus the line's text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceLocation {
    pub row: u32,
    pub column: u32,
    pub line_text: String,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut line_starts = Vec::with_capacity(source.len() / 32 + 1);
        line_starts.push(0);
        for (offset, _) in source.match_indices('\n') {
            line_starts.push(u32::try_from(offset + 1).unwrap_or(u32::MAX));
        }
        LineIndex {
            line_starts,
            len: u32::try_from(source.len()).unwrap_or(u32::MAX),
        }
    }

    /// Number of lines (an empty source has one empty line).
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// 1-based row containing `offset`.
    pub fn row_of(&self, offset: u32) -> u32 {
        let idx = self.line_starts.partition_point(|&start| start <= offset);
        u32::try_from(idx.max(1)).unwrap_or(u32::MAX)
    }

    /// Byte range of a 1-based row, without its line terminator.
    pub fn line_span(&self, source: &str, row: u32) -> Span {
        let idx = (row.max(1) - 1) as usize;
        let Some(&start) = self.line_starts.get(idx) else {
            return Span::point(self.len);
        };
        let mut end = self
            .line_starts
            .get(idx + 1)
            .map_or(self.len, |&next| next.saturating_sub(1));
        if end > start && source.as_bytes().get(end as usize - 1) == Some(&b'\r') {
            end -= 1;
        }
        Span::new(start, end)
    }

    /// Text of a 1-based row, without its line terminator.
    pub fn line_text<'a>(&self, source: &'a str, row: u32) -> &'a str {
        self.line_span(source, row).text(source)
    }

    /// Resolve the start of `span` to a row, column and line text.
    pub fn locate(&self, source: &str, span: Span) -> SourceLocation {
        let row = self.row_of(span.start);
        let line = self.line_span(source, row);
        let column = source
            .get(line.start as usize..(span.start.min(line.end.max(line.start))) as usize)
            .map_or(0, |prefix| prefix.chars().count());
        SourceLocation {
            row,
            column: u32::try_from(column + 1).unwrap_or(u32::MAX),
            line_text: self.line_text(source, row).to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows() {
        let src = "a = 1;\nb = 2;\r\nreturn b;";
        let idx = LineIndex::new(src);
        assert_eq!(idx.line_count(), 3);
        assert_eq!(idx.row_of(0), 1);
        assert_eq!(idx.row_of(6), 1);
        assert_eq!(idx.row_of(7), 2);
        assert_eq!(idx.row_of(16), 3);
    }

    #[test]
    fn test_line_text_strips_terminators() {
        let src = "a = 1;\nb = 2;\r\nreturn b;";
        let idx = LineIndex::new(src);
        assert_eq!(idx.line_text(src, 1), "a = 1;");
        assert_eq!(idx.line_text(src, 2), "b = 2;");
        assert_eq!(idx.line_text(src, 3), "return b;");
        assert_eq!(idx.line_text(src, 9), "");
    }

    #[test]
    fn test_locate() {
        let src = "x = 1;\n  y = oops;";
        let idx = LineIndex::new(src);
        let loc = idx.locate(src, Span::new(13, 17));
        assert_eq!(loc.row, 2);
        assert_eq!(loc.column, 7);
        assert_eq!(loc.line_text, "  y = oops;");
    }
}
