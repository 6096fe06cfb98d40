//! Tokens - the output of the scanner and the input of the parser.
//!
//! One token is emitted per lexical unit, in source order, and is never
//! mutated afterwards. The stream always ends with exactly one `Eof`.
//!
//! Token shape by kind:
//! ```text
//! LeftBrace / RightBrace / Semicolon   lexeme = value = the punctuation
//! Identifier                           lexeme = value = the identifier text
//! String                               lexeme = "", value = text between quotes
//! Number                               lexeme = matched text, value = f64
//! True / False / Null                  lexeme = keyword, value = decoded literal
//! Eof                                  no lexeme, no value
//! ```

use std::borrow::Cow;
use std::fmt;

use crate::span::Location;
use crate::value::Value;

/// Closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input.
    Eof,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `;`
    Semicolon,
    /// `[A-Za-z_][A-Za-z0-9_]*` that is not a keyword.
    Identifier,
    /// `"..."`
    String,
    /// `3`, `2.5`, `.75`
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

impl TokenKind {
    /// Upper-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Eof => "EOF",
            Self::LeftBrace => "LEFT_BRACE",
            Self::RightBrace => "RIGHT_BRACE",
            Self::Semicolon => "SEMICOLON",
            Self::Identifier => "IDENTIFIER",
            Self::String => "STRING",
            Self::Number => "NUMBER",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Null => "NULL",
        }
    }

    /// Check if tokens of this kind carry a literal value for a node.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::String | Self::Number | Self::True | Self::False | Self::Null
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single lexical unit.
///
/// The lifetime `'a` refers to the source text - lexemes and string values
/// are zero-copy slices of the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub lexeme: Option<&'a str>,
    pub value: Option<Value<'a>>,
    pub location: Option<Location>,
}

impl<'a> Token<'a> {
    /// Token with no lexeme, value or location.
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            lexeme: None,
            value: None,
            location: None,
        }
    }

    /// Punctuation token whose lexeme and value are both `text`.
    pub fn punct(kind: TokenKind, text: &'a str) -> Self {
        Self {
            kind,
            lexeme: Some(text),
            value: Some(Value::String(Cow::Borrowed(text))),
            location: None,
        }
    }

    pub fn identifier(text: &'a str) -> Self {
        Self::punct(TokenKind::Identifier, text)
    }

    /// String literal. The lexeme is empty, the value is the unquoted text.
    pub fn string(text: &'a str) -> Self {
        Self {
            kind: TokenKind::String,
            lexeme: Some(""),
            value: Some(Value::String(Cow::Borrowed(text))),
            location: None,
        }
    }

    pub fn number(lexeme: &'a str, value: f64) -> Self {
        Self {
            kind: TokenKind::Number,
            lexeme: Some(lexeme),
            value: Some(Value::Number(value)),
            location: None,
        }
    }

    /// Literal token built from an already-decoded value.
    ///
    /// Useful for feeding a parser directly; the lexeme is left unset.
    pub fn literal(value: Value<'a>) -> Self {
        let kind = match &value {
            Value::String(_) => TokenKind::String,
            Value::Number(_) => TokenKind::Number,
            Value::Bool(true) => TokenKind::True,
            Value::Bool(false) => TokenKind::False,
            Value::Null => TokenKind::Null,
        };
        Self {
            kind,
            lexeme: None,
            value: Some(value),
            location: None,
        }
    }

    /// Attach a source location.
    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Line of this token, if known.
    pub fn line(&self) -> Option<u32> {
        self.location.map(|loc| loc.line)
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.lexeme, &self.value) {
            (Some(lexeme), _) if !lexeme.is_empty() => write!(f, "{} {:?}", self.kind, lexeme),
            (_, Some(value)) => write!(f, "{} {}", self.kind, value),
            _ => write!(f, "{}", self.kind),
        }
    }
}
