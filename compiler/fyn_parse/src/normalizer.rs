use std::vec;

use fyn_ir::{Block, Item, Token, TokenKind};
use fyn_stack::ensure_sufficient_stack;

use crate::ParseError;

/// Read-ahead sigils, matched on raw text regardless of token kind.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Sigil {
    /// `@`: wrap the next item in a block.
    Lambda,
    /// `#`: wrap the next two items in a block.
    Lambda2,
    /// `&`: pop into the variable named by the next item.
    SetVar,
    /// `.&`: pop into the function named by the next item.
    SetFunc,
}

impl Sigil {
    pub fn from_raw(raw: &str) -> Option<Sigil> {
        match raw {
            "@" => Some(Sigil::Lambda),
            "#" => Some(Sigil::Lambda2),
            "&" => Some(Sigil::SetVar),
            ".&" => Some(Sigil::SetFunc),
            _ => None,
        }
    }

    /// Number of following items consumed.
    pub fn reads(self) -> usize {
        match self {
            Sigil::Lambda2 => 2,
            Sigil::Lambda | Sigil::SetVar | Sigil::SetFunc => 1,
        }
    }
}

/// Normalize a token list into a program block.
pub fn normalize(tokens: Vec<Token>) -> Result<Block, ParseError> {
    let items = Normalizer::new(tokens).items()?;
    tracing::debug!(items = items.len(), "normalized program");
    Ok(Block::program(items))
}

struct Normalizer {
    tokens: vec::IntoIter<Token>,
}

impl Normalizer {
    fn new(tokens: Vec<Token>) -> Self {
        Normalizer {
            tokens: tokens.into_iter(),
        }
    }

    fn items(mut self) -> Result<Vec<Item>, ParseError> {
        let mut items = Vec::new();
        while let Some(item) = self.next_item()? {
            items.push(item);
        }
        Ok(items)
    }

    /// Next normalized item, or `None` at the end of input.
    fn next_item(&mut self) -> Result<Option<Item>, ParseError> {
        let Some(token) = self.tokens.next() else {
            return Ok(None);
        };
        if token.kind == TokenKind::BlockOpen {
            return self.fold_block(token).map(|block| Some(Item::Block(block)));
        }
        match Sigil::from_raw(token.raw()) {
            Some(sigil) => self.read_ahead(sigil, &token).map(Some),
            None => Ok(Some(Item::Token(token))),
        }
    }

    /// Collect up to the matching `}` and normalize the span on its own.
    fn fold_block(&mut self, open: Token) -> Result<Block, ParseError> {
        let mut depth = 1usize;
        let mut body = Vec::new();
        let close = loop {
            let Some(token) = self.tokens.next() else {
                return Err(ParseError::unclosed_block(&open));
            };
            match token.kind {
                TokenKind::BlockOpen => depth += 1,
                TokenKind::BlockClose => {
                    depth -= 1;
                    if depth == 0 {
                        break token;
                    }
                }
                _ => {}
            }
            body.push(token);
        };
        let items = ensure_sufficient_stack(|| Normalizer::new(body).items())?;
        Ok(Block::new(items, open.span.merge(close.span), open.pos))
    }

    fn read_ahead(&mut self, sigil: Sigil, token: &Token) -> Result<Item, ParseError> {
        let wanted = sigil.reads();
        let mut operands = Vec::with_capacity(wanted);
        while operands.len() < wanted {
            let next = ensure_sufficient_stack(|| self.next_item())?;
            match next {
                Some(item) => operands.push(item),
                None => return Err(ParseError::missing_operand(token, wanted, operands.len())),
            }
        }
        Ok(match sigil {
            Sigil::Lambda | Sigil::Lambda2 => Item::Block(Block::new(operands, token.span, token.pos)),
            Sigil::SetVar | Sigil::SetFunc => {
                let kind = if sigil == Sigil::SetVar {
                    TokenKind::SetVar
                } else {
                    TokenKind::SetFunc
                };
                let name = operands
                    .iter()
                    .map(|item| item.binding_name().to_string())
                    .collect::<String>();
                Item::Token(Token::binding(kind, name, token))
            }
        })
    }
}

#[cfg(test)]
mod tests;
