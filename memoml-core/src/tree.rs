//! Tree representation for MemoML documents.
//!
//! Each node owns its children directly; there are no parent pointers, so
//! the tree is a plain recursive value that can be moved, cloned and
//! compared. Drop, clone, comparison and `into_owned` walk the tree with a
//! worklist, so nesting depth is not limited by the call stack.
//!
//! # Example
//!
//! ```
//! let root = memoml_core::parse("server { port 8080; tls; }").unwrap();
//!
//! let server = root.get("server").unwrap();
//! assert!(server.is_scope());
//! assert_eq!(server.get("port").and_then(|n| n.value_number()), Some(8080.0));
//! assert_eq!(server.get("tls").and_then(|n| n.value_bool()), Some(true));
//! ```

use std::borrow::Cow;
use std::mem;
use std::slice;
use std::vec;

use crate::value::Value;

/// Key of the synthetic document root.
pub const SCHEMA_NAME: &str = "MemoML";

/// Value of the synthetic document root.
pub const SCHEMA_VERSION: &str = "1.0";

/// One key-value(-scope) entry.
///
/// `children` stays `None` until the first child is added, so a node with
/// an empty `{}` scope is indistinguishable from a plain entry.
#[derive(Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Node<'a> {
    pub key: Cow<'a, str>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub value: Option<Value<'a>>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub children: Option<Vec<Node<'a>>>,
}

impl<'a> Node<'a> {
    /// Node with a key and nothing else.
    pub fn new(key: impl Into<Cow<'a, str>>) -> Self {
        Self {
            key: key.into(),
            value: None,
            children: None,
        }
    }

    /// The synthetic document root carrying the schema name and version.
    pub fn root() -> Self {
        Self {
            key: Cow::Borrowed(SCHEMA_NAME),
            value: Some(Value::String(Cow::Borrowed(SCHEMA_VERSION))),
            children: None,
        }
    }

    /// Builder-style value setter.
    pub fn with_value(mut self, value: impl Into<Value<'a>>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Builder-style child appender.
    pub fn with_child(mut self, child: Node<'a>) -> Self {
        self.push_child(child);
        self
    }

    /// Append a child, creating the children list on first use.
    pub fn push_child(&mut self, child: Node<'a>) {
        self.children.get_or_insert_with(Vec::new).push(child);
    }

    /// Children in document order (empty if there are none).
    pub fn children(&self) -> &[Node<'a>] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Check if this node has at least one child.
    pub fn is_scope(&self) -> bool {
        !self.children().is_empty()
    }

    /// First child with the given key.
    pub fn get(&self, key: &str) -> Option<&Node<'a>> {
        self.children().iter().find(|n| n.key == key)
    }

    /// All children with the given key, in order. Keys may repeat.
    pub fn get_all<'n>(&'n self, key: &'n str) -> impl Iterator<Item = &'n Node<'a>> + 'n {
        self.children().iter().filter(move |n| n.key == key)
    }

    pub fn value_str(&self) -> Option<&str> {
        self.value.as_ref().and_then(Value::as_str)
    }

    pub fn value_number(&self) -> Option<f64> {
        self.value.as_ref().and_then(Value::as_number)
    }

    pub fn value_bool(&self) -> Option<bool> {
        self.value.as_ref().and_then(Value::as_bool)
    }

    /// Total number of nodes below this one.
    pub fn descendant_count(&self) -> usize {
        let mut count = 0;
        let mut pending: Vec<&Node<'a>> = self.children().iter().collect();
        while let Some(node) = pending.pop() {
            count += 1;
            pending.extend(node.children());
        }
        count
    }

    /// Detach the whole tree from the source buffer.
    pub fn into_owned(mut self) -> Node<'static> {
        let mut open: Vec<(Node<'static>, vec::IntoIter<Node<'a>>)> = Vec::new();
        let mut current = self.detach();
        loop {
            match current.1.next() {
                Some(mut child) => {
                    open.push(current);
                    current = child.detach();
                }
                None => match open.pop() {
                    Some(mut parent) => {
                        parent.0.push_child(current.0);
                        current = parent;
                    }
                    None => return current.0,
                },
            }
        }
    }

    /// Move key and value out as an owned, childless node, handing back the
    /// children still to be converted.
    fn detach(&mut self) -> (Node<'static>, vec::IntoIter<Node<'a>>) {
        let children = self.children.take();
        let node = Node {
            key: Cow::Owned(mem::take(&mut self.key).into_owned()),
            value: self.value.take().map(Value::into_owned),
            children: children.as_ref().map(|c| Vec::with_capacity(c.len())),
        };
        (node, children.unwrap_or_default().into_iter())
    }

    /// Copy of this node without its children, plus the children to copy.
    fn shallow_clone(&self) -> (Node<'a>, slice::Iter<'_, Node<'a>>) {
        let node = Node {
            key: self.key.clone(),
            value: self.value.clone(),
            children: self.children.as_ref().map(|c| Vec::with_capacity(c.len())),
        };
        (node, self.children().iter())
    }
}

impl Clone for Node<'_> {
    fn clone(&self) -> Self {
        let mut open = Vec::new();
        let mut current = self.shallow_clone();
        loop {
            match current.1.next() {
                Some(child) => {
                    open.push(current);
                    current = child.shallow_clone();
                }
                None => match open.pop() {
                    Some(mut parent) => {
                        parent.0.push_child(current.0);
                        current = parent;
                    }
                    None => return current.0,
                },
            }
        }
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.key != b.key
                || a.value != b.value
                || a.children.is_some() != b.children.is_some()
                || a.children().len() != b.children().len()
            {
                return false;
            }
            pending.extend(a.children().iter().zip(b.children()));
        }
        true
    }
}

impl Drop for Node<'_> {
    fn drop(&mut self) {
        let Some(mut pending) = self.children.take() else {
            return;
        };
        while let Some(mut node) = pending.pop() {
            if let Some(children) = node.children.take() {
                pending.extend(children);
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
