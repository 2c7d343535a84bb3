//! Positioned tokens.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::{Position, Span};

/// Classification of a token.
///
/// The lexer assigns every kind except the two binding kinds, which are
/// synthesized by the normalizer when it resolves `&` and `.&`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    /// `{`
    BlockOpen,
    /// `}`
    BlockClose,
    /// `` `x `` - pushes the code point of `x`.
    LiteralOrd,
    /// `'x` - pushes the one-character string `x`.
    LiteralChar,
    /// `_?[0-9]+`
    LiteralNumber,
    /// `"..."` with `""` as an embedded quote.
    LiteralString,
    Whitespace,
    /// `(`
    ArrayStart,
    /// `)`
    ArrayEnd,
    /// One of the meta-combinator sigils (`m`, `.m`, `z`, `t`, `f`, `v`, `V`).
    Meta,
    /// Pops a value into the variable named by the token's raw text.
    SetVar,
    /// Pops a block into the function named by the token's raw text.
    SetFunc,
    Operator,
}

impl TokenKind {
    /// Stable lowercase name, used by token dumps.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::BlockOpen => "block_open",
            TokenKind::BlockClose => "block_close",
            TokenKind::LiteralOrd => "literal_ord",
            TokenKind::LiteralChar => "literal_char",
            TokenKind::LiteralNumber => "literal_number",
            TokenKind::LiteralString => "literal_string",
            TokenKind::Whitespace => "whitespace",
            TokenKind::ArrayStart => "array_start",
            TokenKind::ArrayEnd => "array_end",
            TokenKind::Meta => "meta_combinator",
            TokenKind::SetVar => "binding_set_var",
            TokenKind::SetFunc => "binding_set_func",
            TokenKind::Operator => "operator",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token with its raw text and source location.
///
/// For binding tokens `raw` holds the bound name, not the sigil.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Token {
    pub raw: Arc<str>,
    pub kind: TokenKind,
    pub span: Span,
    pub pos: Position,
}

impl Token {
    #[inline]
    pub fn new(raw: impl Into<Arc<str>>, kind: TokenKind, span: Span, pos: Position) -> Self {
        Token {
            raw: raw.into(),
            kind,
            span,
            pos,
        }
    }

    /// Binding token for `name`, located at the sigil that introduced it.
    pub fn binding(kind: TokenKind, name: impl Into<Arc<str>>, sigil: &Token) -> Self {
        debug_assert!(matches!(kind, TokenKind::SetVar | TokenKind::SetFunc));
        Token {
            raw: name.into(),
            kind,
            span: sigil.span,
            pos: sigil.pos,
        }
    }

    #[inline]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Text this token contributes when a block is rendered back to source.
    pub fn source_text(&self) -> Cow<'_, str> {
        match self.kind {
            TokenKind::SetVar => Cow::Owned(format!("&{}", self.raw)),
            TokenKind::SetFunc => Cow::Owned(format!(".&{}", self.raw)),
            _ => Cow::Borrowed(&self.raw),
        }
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({} {})", &*self.raw, self.kind, self.pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(raw: &str) -> Token {
        Token::new(raw, TokenKind::Operator, Span::new(0, 1), Position::new(2, 5))
    }

    #[test]
    fn binding_token_takes_sigil_location() {
        let sigil = op("&");
        let bound = Token::binding(TokenKind::SetVar, "x", &sigil);
        assert_eq!(bound.raw(), "x");
        assert_eq!(bound.pos, Position::new(2, 5));
        assert_eq!(bound.source_text(), "&x");
    }

    #[test]
    fn function_binding_renders_with_its_sigil() {
        let bound = Token::binding(TokenKind::SetFunc, "sq", &op(".&"));
        assert_eq!(bound.source_text(), ".&sq");
    }

    #[test]
    fn debug_shows_kind_and_position() {
        assert_eq!(format!("{:?}", op("+")), "\"+\" (operator 2:5)");
    }
}
