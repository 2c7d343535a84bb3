//! Turning values into runnable blocks.

use fyn_ir::Block;

use crate::errors::{not_callable, EvalResult};
use crate::value::Value;

/// Lex and normalize program text.
pub fn compile(source: &str) -> EvalResult<Block> {
    let block = fyn_parse::parse(source)?;
    tracing::trace!(items = block.len(), "compiled program text");
    Ok(block)
}

/// The block a value runs as: blocks as they are, strings compiled.
pub fn callable(value: &Value) -> EvalResult<Block> {
    match value {
        Value::Block(block) => Ok(block.clone()),
        Value::Str(source) => compile(source),
        other => Err(not_callable(other)),
    }
}
