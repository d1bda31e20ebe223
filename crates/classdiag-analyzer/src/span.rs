//! Byte ranges into a source set document.

use std::ops::Range;

/// A half-open byte range `start..end` into the document text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Builds a one-byte span at a 1-based `line` and `column`, clamped to
    /// the end of `src`.
    ///
    /// # Examples
    ///
    /// ```
    /// use classdiag_analyzer::Span;
    ///
    /// let src = "{\n  \"packages\": x\n}";
    /// let span = Span::at_line_column(src, 2, 15);
    /// assert_eq!(&src[span.start()..span.end()], "x");
    /// ```
    pub fn at_line_column(src: &str, line: usize, column: usize) -> Self {
        let line_start: usize = src
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let start = (line_start + column.saturating_sub(1)).min(src.len());
        let end = (start + 1).min(src.len());
        Self::new(start..end)
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
