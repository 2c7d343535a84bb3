//! Fynyl IR - data shared between the lexer, the normalizer and the machine.
//!
//! Everything here is immutable once built. The lexer produces [`Token`]s,
//! the normalizer folds them into [`Block`]s of [`Item`]s, and the machine
//! walks those items.

mod block;
mod span;
mod token;

pub use block::{Block, Item};
pub use span::{Position, Span, SpanError};
pub use token::{Token, TokenKind};
