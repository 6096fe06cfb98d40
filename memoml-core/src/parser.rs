//! Token-driven tree builder.
//!
//! The parser is an explicit state machine fed one token at a time. Open
//! scopes live on an explicit stack (never the call stack), so nesting depth
//! is bounded only by memory or by [`ParseOptions::max_depth`].
//!
//! ```text
//! state   token                        action                          next
//! KEY     IDENTIFIER                   stage key                       VALUE
//! KEY     RIGHT_BRACE  (depth > 1)     pop scope into its parent       KEY
//! KEY     EOF          (depth = 1)     -                               EOF
//! VALUE   literal                      stage value                     SCOPE
//! VALUE   SEMICOLON | LEFT_BRACE       stage `true`, re-dispatch       (SCOPE rules)
//! SCOPE   SEMICOLON                    append staged node to scope     KEY
//! SCOPE   LEFT_BRACE                   push staged node as new scope   KEY
//! EOF     anything                     error                           -
//! ```

use std::borrow::Cow;
use std::fmt;
use std::mem;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::token::{Token, TokenKind};
use crate::tree::Node;
use crate::value::Value;

/// Parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Expecting an entry key, a scope close, or end of input.
    Key,
    /// A key was read; expecting a literal, `;` or `{`.
    Value,
    /// Key and literal were read; expecting `;` or `{`.
    Scope,
    /// Terminal. The tree is complete.
    Eof,
}

impl State {
    pub fn name(self) -> &'static str {
        match self {
            Self::Key => "KEY",
            Self::Value => "VALUE",
            Self::Scope => "SCOPE",
            Self::Eof => "EOF",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Parser configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Record every `(state, token)` pair consumed.
    pub trace: bool,
    /// Maximum number of nested open scopes below the root. `None` is
    /// unbounded.
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }
}

/// One recorded parser step: the state the parser was in and the token it
/// consumed from there.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<'a> {
    pub state: State,
    pub token: Token<'a>,
}

/// Incremental tree builder.
///
/// One parser builds exactly one document. Feed tokens with
/// [`Parser::feed`] until `EOF`, then take the tree with
/// [`Parser::finish`].
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    state: State,
    /// Open scopes. `stack[0]` is the document root and is never popped.
    stack: Vec<Node<'a>>,
    /// Entry being assembled from KEY/VALUE/SCOPE.
    next: Node<'a>,
    options: ParseOptions,
    steps: Option<Vec<Step<'a>>>,
}

impl<'a> Parser<'a> {
    pub fn new() -> Self {
        Self::with_options(ParseOptions::default())
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self {
            state: State::Key,
            stack: vec![Node::root()],
            next: staging(),
            steps: options.trace.then(Vec::new),
            options,
        }
    }

    /// Current state.
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Number of scopes currently open, counting the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Recorded steps, if tracing is enabled.
    pub fn trace(&self) -> Option<&[Step<'a>]> {
        self.steps.as_deref()
    }

    /// Consume one token.
    ///
    /// On error the parser is left in an unspecified state and must be
    /// discarded.
    pub fn feed(&mut self, token: Token<'a>) -> Result<()> {
        trace!("{}: {}", self.state, token);
        if let Some(steps) = &mut self.steps {
            steps.push(Step {
                state: self.state,
                token: token.clone(),
            });
        }

        match self.state {
            State::Key => self.on_key(token),
            State::Value => self.on_value(token),
            State::Scope => self.on_scope(token),
            State::Eof => Err(self.unexpected(&token)),
        }
    }

    /// Feed every token of `tokens` in order, stopping at the first error.
    pub fn feed_all<I>(&mut self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = Token<'a>>,
    {
        tokens.into_iter().try_for_each(|token| self.feed(token))
    }

    /// The finished tree. Fails until `EOF` has been consumed.
    pub fn root(&self) -> Result<&Node<'a>> {
        match (self.state, self.stack.first()) {
            (State::Eof, Some(root)) => Ok(root),
            _ => Err(Error::IncompleteDocument { state: self.state }),
        }
    }

    /// Take the finished tree. Fails until `EOF` has been consumed.
    pub fn finish(mut self) -> Result<Node<'a>> {
        if self.state != State::Eof {
            return Err(Error::IncompleteDocument { state: self.state });
        }
        self.stack
            .pop()
            .ok_or(Error::IncompleteDocument { state: self.state })
    }

    /// Take the finished tree together with the recorded steps. The steps
    /// are empty unless tracing was enabled.
    pub fn finish_with_trace(mut self) -> Result<(Node<'a>, Vec<Step<'a>>)> {
        let steps = self.steps.take().unwrap_or_default();
        Ok((self.finish()?, steps))
    }

    fn on_key(&mut self, token: Token<'a>) -> Result<()> {
        match token.kind {
            TokenKind::Identifier => {
                let key = identifier_text(&token).ok_or_else(|| self.unexpected(&token))?;
                self.next.key = key;
                self.state = State::Value;
                Ok(())
            }
            TokenKind::RightBrace if self.stack.len() > 1 => {
                let closed = self.stack.pop().ok_or_else(|| self.unexpected(&token))?;
                debug!("closed scope {:?} at depth {}", closed.key, self.stack.len());
                self.top().push_child(closed);
                self.next = staging();
                Ok(())
            }
            // Open scopes at end of input would be silently dropped.
            TokenKind::Eof if self.stack.len() == 1 => {
                debug!("document complete");
                self.state = State::Eof;
                Ok(())
            }
            _ => Err(self.unexpected(&token)),
        }
    }

    fn on_value(&mut self, token: Token<'a>) -> Result<()> {
        match token.kind {
            kind if kind.is_literal() => {
                let value = literal_value(&token).ok_or_else(|| self.unexpected(&token))?;
                self.next.value = Some(value);
                self.state = State::Scope;
                Ok(())
            }
            TokenKind::Semicolon | TokenKind::LeftBrace => {
                self.next.value = Some(Value::Bool(true));
                self.on_scope(token)
            }
            _ => Err(self.unexpected(&token)),
        }
    }

    fn on_scope(&mut self, token: Token<'a>) -> Result<()> {
        match token.kind {
            TokenKind::Semicolon => {
                let node = mem::replace(&mut self.next, staging());
                self.top().push_child(node);
                self.state = State::Key;
                Ok(())
            }
            TokenKind::LeftBrace => {
                if let Some(max_depth) = self.options.max_depth {
                    if self.stack.len() > max_depth {
                        return Err(Error::TooDeep {
                            max_depth,
                            line: token.line(),
                        });
                    }
                }
                let node = mem::replace(&mut self.next, staging());
                debug!("opened scope {:?} at depth {}", node.key, self.stack.len());
                self.stack.push(node);
                self.state = State::Key;
                Ok(())
            }
            _ => Err(self.unexpected(&token)),
        }
    }

    fn top(&mut self) -> &mut Node<'a> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn unexpected(&self, token: &Token<'a>) -> Error {
        let lexeme = token
            .lexeme
            .map(str::to_string)
            .or_else(|| token.value.as_ref().map(|v| v.to_string()));
        Error::UnexpectedToken {
            kind: token.kind,
            lexeme,
            state: self.state,
            line: token.line(),
        }
    }
}

impl Default for Parser<'_> {
    fn default() -> Self {
        Self::new()
    }
}

fn staging<'a>() -> Node<'a> {
    Node::new("")
}

/// Key text of an identifier token: its value, falling back to its lexeme.
fn identifier_text<'a>(token: &Token<'a>) -> Option<Cow<'a, str>> {
    let text = match (&token.value, token.lexeme) {
        (Some(Value::String(s)), _) => s.clone(),
        (_, Some(lexeme)) => Cow::Borrowed(lexeme),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

/// Decoded value of a literal token. Keyword tokens built without a value
/// decode from their kind.
fn literal_value<'a>(token: &Token<'a>) -> Option<Value<'a>> {
    match (token.kind, &token.value) {
        (TokenKind::String, Some(v @ Value::String(_)))
        | (TokenKind::Number, Some(v @ Value::Number(_))) => Some(v.clone()),
        (TokenKind::True, None | Some(Value::Bool(true))) => Some(Value::Bool(true)),
        (TokenKind::False, None | Some(Value::Bool(false))) => Some(Value::Bool(false)),
        (TokenKind::Null, None | Some(Value::Null)) => Some(Value::Null),
        _ => None,
    }
}

// ============================================================================
// Tests
// ============================================================================
