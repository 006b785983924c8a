use serde::Serialize;

/// Half-open byte range `start..start + length` into the source text.
///
/// Holds no reference to the text, so nodes carrying one can outlive the
/// buffer they were parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Position {
    pub start: usize,
    pub length: usize,
}

impl Position {
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }

    /// Builds a position from a `start..end` pair. `end` before `start`
    /// collapses to an empty span at `start`.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        Self {
            start,
            length: end.saturating_sub(start),
        }
    }

    pub fn empty_at(offset: usize) -> Self {
        Self::new(offset, 0)
    }

    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// The spanned text, or `None` if the span is out of bounds or splits a
    /// character.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end())
    }

    /// 1-based line and column of `start`. Columns count characters.
    pub fn line_col(&self, text: &str) -> (usize, usize) {
        let mut line = 1;
        let mut column = 1;
        for (offset, ch) in text.char_indices() {
            if offset >= self.start {
                break;
            }
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end())
    }
}
