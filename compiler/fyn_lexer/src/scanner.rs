//! Hand-written scanner producing positioned tokens.
//!
//! Dispatch is on the first character of the remaining input. Each arm calls
//! a focused method that advances the cursor; [`Lexer::next`] then slices
//! the consumed text and classifies it.

use fyn_ir::{Position, Span, Token, TokenKind};

use crate::cursor::Cursor;

/// Sigils that mark a `meta_combinator` token.
pub const META_SYMBOLS: [&str; 7] = ["z", "m", ".m", "v", "V", "t", "f"];

/// Whitespace as the language sees it: ASCII space, tab, newline, vertical
/// tab, form feed and carriage return.
#[inline]
pub fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0B' | '\x0C' | '\r')
}

/// Kind of an operator-shaped token, decided by its full text.
pub fn classify(raw: &str) -> TokenKind {
    match raw {
        "{" => TokenKind::BlockOpen,
        "}" => TokenKind::BlockClose,
        "(" => TokenKind::ArrayStart,
        ")" => TokenKind::ArrayEnd,
        _ if META_SYMBOLS.contains(&raw) => TokenKind::Meta,
        _ => TokenKind::Operator,
    }
}

/// Iterator over the tokens of one source text.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(source),
        }
    }

    fn scan(&mut self, first: char) -> Option<TokenKind> {
        match first {
            '0'..='9' => Some(self.number()),
            '_' if matches!(self.cursor.peek(), Some('0'..='9')) => Some(self.number()),
            '"' => self.string(),
            c if is_space(c) => Some(self.whitespace()),
            '`' | '\'' => self.two_char(first),
            _ => None,
        }
    }

    // ─── Literals ──────────────────────────────────────────────

    fn number(&mut self) -> TokenKind {
        if self.cursor.current() == Some('_') {
            self.cursor.bump();
        }
        self.cursor.eat_while(|c| c.is_ascii_digit());
        TokenKind::LiteralNumber
    }

    /// `"..."` where `""` is an embedded quote.
    ///
    /// An unterminated string closes at the first quote of the last `""`
    /// pair seen. With no such pair, the quote is not a string opener and
    /// `None` hands it to the operator rule.
    fn string(&mut self) -> Option<TokenKind> {
        let bytes = self.cursor.bytes();
        let mut at = self.cursor.pos() + 1;
        let mut last_pair = None;
        let end = loop {
            let Some(offset) = memchr::memchr(b'"', &bytes[at..]) else {
                break last_pair?;
            };
            let quote = at + offset;
            if bytes.get(quote + 1) == Some(&b'"') {
                last_pair = Some(quote);
                at = quote + 2;
            } else {
                break quote;
            }
        };
        self.cursor.advance_to(end + 1);
        Some(TokenKind::LiteralString)
    }

    fn whitespace(&mut self) -> TokenKind {
        self.cursor.eat_while(is_space);
        TokenKind::Whitespace
    }

    /// `` `x `` or `'x`. A lead character followed by a newline or the end
    /// of input is an operator instead.
    fn two_char(&mut self, lead: char) -> Option<TokenKind> {
        match self.cursor.peek() {
            Some('\n') | None => None,
            Some(_) => {
                self.cursor.bump();
                self.cursor.bump();
                Some(if lead == '`' {
                    TokenKind::LiteralOrd
                } else {
                    TokenKind::LiteralChar
                })
            }
        }
    }

    // ─── Operators ─────────────────────────────────────────────

    /// A run of `.`/`:` plus one more non-space character. When the run is
    /// followed by whitespace or the end of input, its own last character
    /// serves as that final character.
    fn operator(&mut self) {
        let start = self.cursor.pos();
        self.cursor.eat_while(|c| c == '.' || c == ':');
        match self.cursor.current() {
            Some(c) if !is_space(c) => {
                self.cursor.bump();
            }
            _ if self.cursor.pos() > start => {}
            // Unreachable from `next`, which routes whitespace elsewhere,
            // but keep the lexer total.
            _ => {
                self.cursor.bump();
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let first = self.cursor.current()?;
        let start = self.cursor.pos();
        let pos: Position = self.cursor.loc();
        let kind = match self.scan(first) {
            Some(kind) => kind,
            None => {
                self.operator();
                classify(self.cursor.slice_from(start))
            }
        };
        let raw = self.cursor.slice_from(start);
        let span = span_of(start, self.cursor.pos());
        tracing::trace!(?raw, %kind, %pos, "token");
        Some(Token::new(raw, kind, span, pos))
    }
}

fn span_of(start: usize, end: usize) -> Span {
    let clamp = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);
    Span::new(clamp(start), clamp(end))
}
