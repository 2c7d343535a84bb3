//! Normalized program structure.
//!
//! A [`Block`] is an immutable, reference-counted sequence of [`Item`]s:
//! plain tokens, binding tokens and nested blocks. Brace spans and read-ahead
//! sigils have already been resolved, so a block never needs to be
//! re-normalized when it is called.

use std::fmt;
use std::sync::Arc;

use crate::{Position, Span, Token};

/// One element of a normalized program.
#[derive(Clone, PartialEq)]
pub enum Item {
    Token(Token),
    /// A pre-built block literal, pushed as a value when executed.
    Block(Block),
}

impl Item {
    pub fn span(&self) -> Span {
        match self {
            Item::Token(token) => token.span,
            Item::Block(block) => block.span(),
        }
    }

    pub fn pos(&self) -> Position {
        match self {
            Item::Token(token) => token.pos,
            Item::Block(block) => block.pos(),
        }
    }

    /// Name this item denotes when consumed by a binding sigil.
    ///
    /// A token names itself; a block names its body text.
    pub fn binding_name(&self) -> Arc<str> {
        match self {
            Item::Token(token) => Arc::clone(&token.raw),
            Item::Block(block) => Arc::from(block.text()),
        }
    }

    fn write_text(&self, out: &mut String) {
        match self {
            Item::Token(token) => out.push_str(&token.source_text()),
            Item::Block(block) => {
                out.push('{');
                out.push_str(block.text());
                out.push('}');
            }
        }
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Token(token) => token.fmt(f),
            Item::Block(block) => block.fmt(f),
        }
    }
}

struct BlockData {
    items: Box<[Item]>,
    /// Normalized source text, without the surrounding braces.
    text: Box<str>,
    span: Span,
    pos: Position,
}

/// A reusable deferred program.
///
/// Cloning is cheap: all clones share one item sequence. Blocks carry no
/// environment; bindings are supplied by whoever calls them.
#[derive(Clone)]
pub struct Block(Arc<BlockData>);

impl Block {
    /// Build a block located at `span`/`pos` (the opening brace or sigil).
    pub fn new(items: Vec<Item>, span: Span, pos: Position) -> Self {
        let mut text = String::new();
        for item in &items {
            item.write_text(&mut text);
        }
        Block(Arc::new(BlockData {
            items: items.into_boxed_slice(),
            text: text.into_boxed_str(),
            span,
            pos,
        }))
    }

    /// Top-level program block spanning all of its items.
    pub fn program(items: Vec<Item>) -> Self {
        let span = match (items.first(), items.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => Span::DUMMY,
        };
        Block::new(items, span, Position::START)
    }

    /// Wrap one token as a one-element block located at that token.
    pub fn single(token: Token) -> Self {
        let (span, pos) = (token.span, token.pos);
        Block::new(vec![Item::Token(token)], span, pos)
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.0.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.items.is_empty()
    }

    /// Normalized source text without braces.
    #[inline]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.0.span
    }

    #[inline]
    pub fn pos(&self) -> Position {
        self.0.pos
    }

    /// `true` if both handles share the same item sequence.
    #[inline]
    pub fn ptr_eq(&self, other: &Block) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || self.text() == other.text()
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.text())
    }
}
