//! Source location for diagnostics.

use std::fmt;

/// Position of a token in the source.
///
/// Only the line is tracked. `column` is reserved and always 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location {
    /// 1-based line number.
    pub line: u32,
    /// Reserved, currently always 0.
    pub column: u32,
}

impl Location {
    /// Location at the start of `line`.
    #[inline]
    pub fn new(line: u32) -> Self {
        Self { line, column: 0 }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)
    }
}
