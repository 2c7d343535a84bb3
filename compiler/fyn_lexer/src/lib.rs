//! Fynyl lexer.
//!
//! Turns program text into an ordered list of positioned [`Token`]s. Nothing
//! is dropped: whitespace runs come out as `Whitespace` tokens, so joining
//! every token's raw text reproduces the source exactly. The lexer never
//! fails; text that fits no literal form becomes an operator token and is
//! judged later by the machine.
//!
//! # Rules
//!
//! At each position the first applicable rule wins:
//!
//! 1. number: an optional `_` (the negative marker) followed by ASCII digits
//! 2. string: `"` ... `"`, with `""` standing for an embedded quote
//! 3. whitespace run
//! 4. two-character literal: `` ` `` or `'` followed by any character except
//!    a newline
//! 5. operator: a run of `.`/`:` plus one more non-whitespace character

mod cursor;
mod scanner;

pub use fyn_ir::{Token, TokenKind};
pub use scanner::{classify, is_space, Lexer, META_SYMBOLS};

/// Lex a whole program.
pub fn lex(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}
