//! Decoded literal values.
//!
//! MemoML uses syntactic typing: the token kind decides the type, the
//! scanner never sniffs the contents of a string.

use std::borrow::Cow;
use std::fmt;

/// A decoded literal carried by a token or stored on a node.
///
/// The lifetime `'a` refers to the source text - strings are borrowed
/// slices of the original input until [`Value::into_owned`] is called.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Quoted string: `"hello"` (no escapes).
    String(Cow<'a, str>),

    /// Number: `3`, `2.5`, `.75`, `-4`.
    Number(f64),

    /// Boolean: `true` or `false` (lowercase only).
    Bool(bool),

    /// `null`
    Null,
}

impl<'a> Value<'a> {
    /// Check if this is the null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Try to get as boolean.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get as number.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Try to get as string.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Detach from the source buffer.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
            Value::Number(n) => Value::Number(n),
            Value::Bool(b) => Value::Bool(b),
            Value::Null => Value::Null,
        }
    }

    /// Decode a numeric literal.
    ///
    /// Accepts `-?[0-9]*(\.[0-9]+)?` with at least one digit. No exponent,
    /// no underscores, no base prefixes. Returns None for anything else,
    /// including a bare `.` or a trailing `.` with no fraction digits.
    pub fn parse_number(text: &str) -> Option<f64> {
        let bytes = text.as_bytes();
        let rest = bytes.strip_prefix(b"-").unwrap_or(bytes);

        let int_len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
        let frac = &rest[int_len..];
        let frac_len = match frac.split_first() {
            None => 0,
            Some((&b'.', digits)) => {
                let n = digits.iter().take_while(|b| b.is_ascii_digit()).count();
                if n == 0 || n != digits.len() {
                    return None;
                }
                n
            }
            Some(_) => return None,
        };

        if int_len == 0 && frac_len == 0 {
            return None;
        }

        text.parse().ok()
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{:?}", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<bool> for Value<'_> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value<'_> {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(s: &'a str) -> Self {
        Value::String(Cow::Borrowed(s))
    }
}

impl From<String> for Value<'_> {
    fn from(s: String) -> Self {
        Value::String(Cow::Owned(s))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Value<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Null => serializer.serialize_unit(),
        }
    }
}
