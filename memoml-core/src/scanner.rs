//! Character-level scanner.
//!
//! Single pass over the whole source with one-byte dispatch. Every token is
//! handed to the caller's callback as soon as it is complete; nothing is
//! buffered ahead. The stream always ends with exactly one `Eof` token.
//!
//! All structural characters are ASCII, so the scanner walks bytes and only
//! decodes a `char` when it has to report one. Multi-byte UTF-8 is allowed
//! inside strings and comments.

use log::trace;
use memchr::{memchr, memchr_iter};
use phf::phf_map;

use crate::error::{Error, Result};
use crate::span::Location;
use crate::token::{Token, TokenKind};
use crate::value::Value;

/// Reserved words. Anything else matching the identifier rule is an
/// `Identifier`.
static KEYWORDS: phf::Map<&'static str, TokenKind> = phf_map! {
    "true" => TokenKind::True,
    "false" => TokenKind::False,
    "null" => TokenKind::Null,
};

/// Scanner over one complete source string.
///
/// Each call to [`Scanner::scan`] restarts from the beginning of the source
/// with the line counter reset to 1.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    /// Start of the token being scanned.
    start: usize,
    /// Current scan position.
    pos: usize,
    line: u32,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            start: 0,
            pos: 0,
            line: 1,
        }
    }

    /// Scan the whole source, calling `on_token` for each token in order.
    ///
    /// The callback may return an error to abort the scan; that error is
    /// returned unchanged. Lexical errors stop the scan at the offending
    /// character, after all preceding tokens were emitted.
    pub fn scan<F>(&mut self, mut on_token: F) -> Result<()>
    where
        F: FnMut(Token<'a>) -> Result<()>,
    {
        self.start = 0;
        self.pos = 0;
        self.line = 1;

        while !self.eof() {
            self.start = self.pos;
            if let Some(token) = self.scan_token()? {
                trace!("scanned {} at line {}", token, self.line);
                on_token(token)?;
            }
        }

        trace!("scanned EOF at line {}", self.line);
        on_token(Token::new(TokenKind::Eof).at(self.location()))
    }

    /// Scan the whole source into a vector.
    pub fn tokenize(&mut self) -> Result<Vec<Token<'a>>> {
        let mut tokens = Vec::new();
        self.scan(|token| {
            tokens.push(token);
            Ok(())
        })?;
        Ok(tokens)
    }

    /// Current line (1-based).
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    #[inline]
    fn eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    #[inline]
    fn peek_next(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos + 1).copied()
    }

    #[inline]
    fn location(&self) -> Location {
        Location::new(self.line)
    }

    #[inline]
    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.pos]
    }

    /// Scan one lexical unit starting at `self.pos`.
    ///
    /// Returns `None` for whitespace and comments.
    fn scan_token(&mut self) -> Result<Option<Token<'a>>> {
        let Some(b) = self.peek() else {
            return Ok(None);
        };

        match b {
            b'{' => Ok(Some(self.punct(TokenKind::LeftBrace))),
            b'}' => Ok(Some(self.punct(TokenKind::RightBrace))),
            b';' => Ok(Some(self.punct(TokenKind::Semicolon))),
            b'#' => {
                self.skip_comment();
                Ok(None)
            }
            b' ' | b'\r' | b'\t' => {
                self.pos += 1;
                Ok(None)
            }
            b'\n' => {
                self.pos += 1;
                self.line += 1;
                Ok(None)
            }
            b'"' => self.string().map(Some),
            b'0'..=b'9' | b'.' => self.number().map(Some),
            b'-' if self.starts_number_after_sign() => self.number().map(Some),
            b'a'..=b'z' | b'A'..=b'Z' | b'_' => Ok(Some(self.identifier())),
            _ => Err(self.unexpected_character()),
        }
    }

    fn punct(&mut self, kind: TokenKind) -> Token<'a> {
        self.pos += 1;
        Token::punct(kind, self.lexeme()).at(self.location())
    }

    /// Skip from `#` up to, not including, the end of the line.
    ///
    /// The newline is left for the main loop so the line counter is
    /// advanced in exactly one place.
    fn skip_comment(&mut self) {
        let rest = &self.source.as_bytes()[self.pos..];
        self.pos += memchr(b'\n', rest).unwrap_or(rest.len());
    }

    fn string(&mut self) -> Result<Token<'a>> {
        let location = self.location();
        let body_start = self.pos + 1;
        let rest = &self.source.as_bytes()[body_start..];

        match memchr(b'"', rest) {
            Some(len) => {
                let body_end = body_start + len;
                self.line += memchr_iter(b'\n', &rest[..len]).count() as u32;
                self.pos = body_end + 1;
                Ok(Token::string(&self.source[body_start..body_end]).at(location))
            }
            None => {
                self.line += memchr_iter(b'\n', rest).count() as u32;
                self.pos = self.source.len();
                Err(Error::UnterminatedString { line: self.line })
            }
        }
    }

    /// `-` only opens a number when a digit or `.digit` follows it.
    fn starts_number_after_sign(&self) -> bool {
        let bytes = self.source.as_bytes();
        match self.peek_next() {
            Some(b'0'..=b'9') => true,
            Some(b'.') => matches!(bytes.get(self.pos + 2), Some(b'0'..=b'9')),
            _ => false,
        }
    }

    /// `-?[0-9]*(\.[0-9]+)?`
    ///
    /// A `.` only starts a fraction when a digit follows it. When nothing
    /// but the leading `.` matched, the `.` is consumed and rejected.
    fn number(&mut self) -> Result<Token<'a>> {
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        let digits_start = self.pos;

        self.skip_digits();
        if self.peek() == Some(b'.') && self.peek_next().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
            self.skip_digits();
        }

        if self.pos == digits_start {
            // Only reachable through a `.` with no digit after it.
            self.pos += 1;
            return Err(self.malformed_number());
        }

        let lexeme = self.lexeme();
        match Value::parse_number(lexeme) {
            Some(value) => Ok(Token::number(lexeme, value).at(self.location())),
            None => Err(self.malformed_number()),
        }
    }

    fn skip_digits(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn identifier(&mut self) -> Token<'a> {
        while self
            .peek()
            .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_')
        {
            self.pos += 1;
        }

        let text = self.lexeme();
        let token = match KEYWORDS.get(text).copied() {
            Some(kind) => {
                let value = match kind {
                    TokenKind::True => Value::Bool(true),
                    TokenKind::False => Value::Bool(false),
                    _ => Value::Null,
                };
                Token {
                    kind,
                    lexeme: Some(text),
                    value: Some(value),
                    location: None,
                }
            }
            None => Token::identifier(text),
        };
        token.at(self.location())
    }

    fn malformed_number(&self) -> Error {
        Error::MalformedNumber {
            lexeme: self.lexeme().to_string(),
            line: self.line,
        }
    }

    fn unexpected_character(&self) -> Error {
        let found = self.source[self.pos..].chars().next().unwrap_or('\0');
        Error::UnexpectedCharacter {
            found,
            line: self.line,
        }
    }
}
