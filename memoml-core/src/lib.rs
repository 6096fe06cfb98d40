//! MemoML Core Parser
//!
//! Recognizer and tree-builder for MemoML, a small configuration language of
//! nested, ordered, key-repeatable scopes:
//!
//! ```text
//! # comment
//! name "demo";
//! debug;                      # no literal: value defaults to true
//! server "primary" {
//!     port 8080;
//!     host "localhost";
//!     host "127.0.0.1";       # keys may repeat
//! }
//! ```
//!
//! # Architecture
//!
//! - **scanner.rs** - Character-level scanner, emits tokens via callback
//! - **parser.rs** - Token-driven state machine with an explicit scope stack
//!   and optional step trace
//! - **tree.rs** - Owned recursive `Node` tree
//! - **token.rs** - Token kinds and token values
//! - **value.rs** - Decoded literal values
//! - **span.rs** - Source locations
//! - **error.rs** - Error type shared by all stages

pub mod error;
pub mod parser;
pub mod scanner;
pub mod span;
pub mod token;
pub mod tree;
pub mod value;

pub use error::{Error, Result};
pub use parser::{ParseOptions, Parser, State, Step};
pub use scanner::Scanner;
pub use span::Location;
pub use token::{Token, TokenKind};
pub use tree::{Node, SCHEMA_NAME, SCHEMA_VERSION};
pub use value::Value;

/// Parse a complete document with default options.
///
/// Returns the synthetic root node; top-level entries are its children.
pub fn parse(text: &str) -> Result<Node<'_>> {
    parse_with(text, &ParseOptions::default())
}

/// Parse a complete document with the given options.
///
/// Only `max_depth` affects the result here. Use [`parse_traced`] to get the
/// recorded steps back.
pub fn parse_with<'a>(text: &'a str, options: &ParseOptions) -> Result<Node<'a>> {
    let mut parser = Parser::with_options(options.clone());
    Scanner::new(text).scan(|token| parser.feed(token))?;
    parser.finish()
}

/// Parse a document, recording every `(state, token)` step the parser
/// takes.
///
/// ```
/// let (root, steps) = memoml_core::parse_traced("flag;").unwrap();
/// assert_eq!(root.children().len(), 1);
/// assert_eq!(steps.len(), 3); // IDENTIFIER, SEMICOLON, EOF
/// ```
pub fn parse_traced(text: &str) -> Result<(Node<'_>, Vec<Step<'_>>)> {
    let mut parser = Parser::with_options(ParseOptions::default().with_trace(true));
    Scanner::new(text).scan(|token| parser.feed(token))?;
    parser.finish_with_trace()
}

/// Parse a document from raw bytes.
///
/// Fails with [`Error::InvalidInput`] when the bytes are not UTF-8 text.
pub fn parse_bytes(input: &[u8]) -> Result<Node<'_>> {
    let text = std::str::from_utf8(input).map_err(|e| Error::InvalidInput {
        reason: e.to_string(),
    })?;
    parse(text)
}
