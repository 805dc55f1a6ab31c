//! # Bracket notation
//!
//! Reads trees written as `A(B(D,E),C(F))`:
//!
//! ```text
//! tree  := label ( '(' tree ( ',' tree )* ')' )?
//! label := one or more characters other than '(', ')', ',' and whitespace
//! ```
//!
//! Whitespace between tokens is ignored, so `A ( B , C )` reads the same as `A(B,C)`. The
//! parser keeps its own stack of open nodes and does not recurse, so arbitrarily deep inputs
//! are fine. [`Node`]'s `Display` implementation writes the same notation back.

use std::{
    iter::Peekable,
    str::{CharIndices, FromStr},
};

use tracing::debug;

use crate::tree::Node;

pub use error::ParseError;

pub mod error;

fn is_delimiter(c: char) -> bool {
    matches!(c, '(' | ')' | ',') || c.is_whitespace()
}

struct Cursor<'a> {
    input: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Cursor {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Next non-whitespace character and its position, without consuming it.
    fn peek(&mut self) -> Option<(usize, char)> {
        while let Some(&(_, c)) = self.chars.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.chars.next();
        }
        self.chars.peek().copied()
    }

    fn bump(&mut self) {
        self.chars.next();
    }

    fn label(&mut self) -> Result<String, ParseError> {
        let (start, first) = self.peek().ok_or(ParseError::UnexpectedEnd)?;
        if is_delimiter(first) {
            return Err(ParseError::EmptyLabel { position: start });
        }

        let mut end = self.input.len();
        while let Some(&(i, c)) = self.chars.peek() {
            if is_delimiter(c) {
                end = i;
                break;
            }
            self.chars.next();
        }
        Ok(self.input[start..end].to_owned())
    }
}

/// Parses one tree in bracket notation.
///
/// ```
/// use tourlca::parser::parse_tree;
///
/// let root = parse_tree("A(B(D, E), C(F))").unwrap();
/// assert_eq!(root.label, "A");
/// assert_eq!(root.n_nodes(), 6);
/// assert_eq!(root.to_string(), "A(B(D,E),C(F))");
/// ```
pub fn parse_tree(input: &str) -> Result<Node<String>, ParseError> {
    let mut cursor = Cursor::new(input);
    // Nodes whose child list is still open, outermost first.
    let mut open: Vec<Node<String>> = Vec::new();
    let mut current = Node::new(cursor.label()?);

    loop {
        match cursor.peek() {
            None if open.is_empty() => break,
            None => return Err(ParseError::UnexpectedEnd),
            Some((_, '(')) => {
                cursor.bump();
                let child = Node::new(cursor.label()?);
                open.push(std::mem::replace(&mut current, child));
            }
            Some((position, _)) if open.is_empty() => {
                return Err(ParseError::TrailingInput { position });
            }
            Some((_, ',')) => {
                cursor.bump();
                let sibling = Node::new(cursor.label()?);
                let done = std::mem::replace(&mut current, sibling);
                if let Some(parent) = open.last_mut() {
                    parent.push_child(done);
                }
            }
            Some((_, ')')) => {
                cursor.bump();
                if let Some(mut parent) = open.pop() {
                    parent.push_child(current);
                    current = parent;
                }
            }
            Some((position, found)) => {
                return Err(ParseError::UnexpectedChar { found, position });
            }
        }
    }

    debug!(nodes = current.n_nodes(), "parsed tree");
    Ok(current)
}

impl FromStr for Node<String> {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_tree(s)
    }
}
