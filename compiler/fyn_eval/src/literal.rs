//! Decoding literal tokens into values.

use fyn_ir::{Token, TokenKind};
use num_bigint::BigInt;

use crate::errors::{malformed_program, EvalResult};
use crate::value::Value;

/// Value pushed by a literal token.
pub fn decode(token: &Token) -> EvalResult<Value> {
    let raw = token.raw();
    match token.kind {
        TokenKind::LiteralNumber => raw
            .replace('_', "-")
            .parse::<BigInt>()
            .map(Value::Int)
            .map_err(|_| malformed_program(format!("bad number literal `{raw}`"))),
        TokenKind::LiteralString => {
            let body = raw
                .strip_prefix('"')
                .and_then(|s| s.strip_suffix('"'))
                .unwrap_or(raw);
            Ok(Value::string(body.replace("\"\"", "\"")))
        }
        TokenKind::LiteralOrd => payload(raw).map(|c| Value::int(u32::from(c))),
        TokenKind::LiteralChar => payload(raw).map(|c| Value::string(c.to_string())),
        kind => Err(malformed_program(format!("`{raw}` is a {kind} token, not a literal"))),
    }
}

/// The character after the lead of a two-character literal.
fn payload(raw: &str) -> EvalResult<char> {
    raw.chars()
        .nth(1)
        .ok_or_else(|| malformed_program(format!("literal `{raw}` has no payload")))
}
