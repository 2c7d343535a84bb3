//! Structural normalizer for Fynyl.
//!
//! Runs once per program text, before anything executes. It turns the flat
//! token list from `fyn_lexer` into a [`Block`] whose items are ready to be
//! stepped through:
//!
//! - every `{ ... }` span becomes one pre-built [`Item::Block`]
//! - `@x` becomes a one-item block, `#xy` a two-item block
//! - `&x` / `.&x` become `SetVar` / `SetFunc` binding tokens named `x`
//!
//! Sigils read the next *normalized* item, so `@{...}` wraps the folded
//! block and `&@+` binds the block built by `@+`. Nested blocks are
//! normalized when they are folded and never again.

mod error;
mod normalizer;

pub use error::ParseError;
pub use normalizer::{normalize, Sigil};

pub use fyn_ir::{Block, Item};

/// Lex and normalize a program text.
pub fn parse(source: &str) -> Result<Block, ParseError> {
    normalize(fyn_lexer::lex(source))
}
