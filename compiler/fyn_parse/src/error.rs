//! Normalizer errors.

use std::fmt;

use fyn_diagnostic::{Diagnostic, ErrorCode};
use fyn_ir::Token;

/// A malformed program, reported at the token that made it so.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ParseError {
    pub code: ErrorCode,
    pub message: String,
    /// The sigil or brace the problem starts at.
    pub token: Token,
    pub notes: Vec<String>,
}

impl ParseError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, token: &Token) -> Self {
        ParseError {
            code,
            message: message.into(),
            token: token.clone(),
            notes: Vec::new(),
        }
    }

    /// A read-ahead sigil found fewer items than it consumes.
    #[cold]
    pub fn missing_operand(sigil: &Token, wanted: usize, found: usize) -> Self {
        let noun = if wanted == 1 { "item" } else { "items" };
        let mut err = ParseError::new(
            ErrorCode::E1001,
            format!(
                "`{}` reads {wanted} following {noun}, but the program ends after {found}",
                sigil.raw()
            ),
            sigil,
        );
        err.notes
            .push("sigils read ahead within their enclosing block only".to_owned());
        err
    }

    #[cold]
    pub fn unclosed_block(open: &Token) -> Self {
        ParseError::new(ErrorCode::E1002, "unclosed `{`", open)
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let label = match self.code {
            ErrorCode::E1002 => "block opened here",
            _ => "sigil here",
        };
        let mut diag = Diagnostic::error(self.code)
            .with_message(&self.message)
            .with_label(self.token.span, label);
        for note in &self.notes {
            diag = diag.with_note(note);
        }
        diag
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.token.pos)
    }
}

impl std::error::Error for ParseError {}
