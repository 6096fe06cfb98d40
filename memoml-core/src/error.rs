//! Errors raised while scanning or parsing.
//!
//! Every error is fatal: the first one aborts the document and no partial
//! tree is returned.

use thiserror::Error;

use crate::parser::State;
use crate::token::TokenKind;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All the ways a MemoML document can fail to parse.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input handed to the entry point is not text.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// A `"` was opened and never closed.
    #[error("unterminated string on line {line}")]
    UnterminatedString { line: u32 },

    /// A character that cannot start any token.
    #[error("unexpected character {found:?} on line {line}")]
    UnexpectedCharacter { found: char, line: u32 },

    /// Number-like text that does not decode, such as a bare `.`.
    #[error("malformed number {lexeme:?} on line {line}")]
    MalformedNumber { lexeme: String, line: u32 },

    /// A token the parser cannot accept in its current state.
    #[error("unexpected token {kind}{} in state {state}{}", show_lexeme(.lexeme), show_line(.line))]
    UnexpectedToken {
        kind: TokenKind,
        lexeme: Option<String>,
        state: State,
        line: Option<u32>,
    },

    /// A `{` would nest scopes deeper than the configured limit.
    #[error("scope nesting exceeds maximum depth of {max_depth}{}", show_line(.line))]
    TooDeep { max_depth: usize, line: Option<u32> },

    /// The finished tree was requested before the parser saw `EOF`.
    #[error("incomplete document: parser is in state {state}")]
    IncompleteDocument { state: State },
}

impl Error {
    /// Source line the error refers to, when known.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::UnterminatedString { line }
            | Self::UnexpectedCharacter { line, .. }
            | Self::MalformedNumber { line, .. } => Some(*line),
            Self::UnexpectedToken { line, .. } | Self::TooDeep { line, .. } => *line,
            Self::InvalidInput { .. } | Self::IncompleteDocument { .. } => None,
        }
    }

    /// Check if this is a lexical or structural syntax error.
    pub fn is_syntax(&self) -> bool {
        !matches!(self, Self::InvalidInput { .. } | Self::IncompleteDocument { .. })
    }
}

fn show_lexeme(lexeme: &Option<String>) -> String {
    match lexeme {
        Some(l) if !l.is_empty() => format!(" {:?}", l),
        _ => String::new(),
    }
}

fn show_line(line: &Option<u32>) -> String {
    match line {
        Some(line) => format!(" on line {}", line),
        None => String::new(),
    }
}
