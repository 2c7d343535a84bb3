//! Meta-combinators.
//!
//! A meta sigil reads the item after it as its function `f`, then applies a
//! higher-order operation to the stack. Every call of `f` is isolated.
//!
//! | sigil | pops | pushes |
//! |---|---|---|
//! | `m` | array | `f(x)` for each element |
//! | `.m` | array | nothing; `f` runs for effect |
//! | `z` | two arrays | `f(a[i], b[i])`, truncated to the shorter |
//! | `t` | two arrays | table of `f(a[i], b[j])` |
//! | `f` | array | left fold of `f` |
//! | `v` | two values | `f` broadcast over nested arrays |
//! | `V` | one value | `f` broadcast over nested arrays |
//!
//! The operand is a block item, or any other token wrapped as a one-token
//! block. A block whose text is `~` is the dynamic marker: `f` is popped off
//! the stack when the combinator is applied.

use fyn_diagnostic::ErrorCode;
use fyn_ir::{Block, Item, Token};
use fyn_stack::ensure_sufficient_stack;

use crate::compile::callable;
use crate::environment::Env;
use crate::errors::{malformed_program, type_mismatch, EvalResult};
use crate::host::Host;
use crate::machine::{call_isolated, Machine};
use crate::value::Value;

/// Which combinator a meta sigil builds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MetaKind {
    Map,
    Each,
    Zip,
    Table,
    Fold,
    BroadcastBinary,
    BroadcastUnary,
}

impl MetaKind {
    pub fn from_symbol(symbol: &str) -> Option<MetaKind> {
        Some(match symbol {
            "m" => MetaKind::Map,
            ".m" => MetaKind::Each,
            "z" => MetaKind::Zip,
            "t" => MetaKind::Table,
            "f" => MetaKind::Fold,
            "v" => MetaKind::BroadcastBinary,
            "V" => MetaKind::BroadcastUnary,
            _ => return None,
        })
    }

    pub fn symbol(self) -> &'static str {
        match self {
            MetaKind::Map => "m",
            MetaKind::Each => ".m",
            MetaKind::Zip => "z",
            MetaKind::Table => "t",
            MetaKind::Fold => "f",
            MetaKind::BroadcastBinary => "v",
            MetaKind::BroadcastUnary => "V",
        }
    }
}

/// Seed a fold starts from, deduced from the function's text.
pub fn fold_seed(f: &Block) -> Option<Value> {
    match f.text().trim() {
        "+" => Some(Value::int(0)),
        "*" => Some(Value::int(1)),
        _ => None,
    }
}

/// Apply `leaf` to every non-array value inside `value`, keeping the
/// nesting.
pub(crate) fn broadcast_unary(
    value: &Value,
    leaf: &mut dyn FnMut(&Value) -> EvalResult<Value>,
) -> EvalResult<Value> {
    match value {
        Value::Array(items) => ensure_sufficient_stack(|| {
            items
                .iter()
                .map(|item| broadcast_unary(item, leaf))
                .collect::<EvalResult<Vec<_>>>()
                .map(Value::array)
        }),
        scalar => leaf(scalar),
    }
}

/// Pair up two values down to their scalar leaves: arrays zip, a scalar
/// meets every element of an array.
fn broadcast_binary(
    env: &Env,
    host: &Host,
    f: &Block,
    l: &Value,
    r: &Value,
) -> EvalResult<Value> {
    ensure_sufficient_stack(|| match (l, r) {
        (Value::Array(ls), Value::Array(rs)) => ls
            .iter()
            .zip(rs.iter())
            .map(|(a, b)| broadcast_binary(env, host, f, a, b))
            .collect::<EvalResult<Vec<_>>>()
            .map(Value::array),
        (Value::Array(ls), _) => ls
            .iter()
            .map(|a| broadcast_binary(env, host, f, a, r))
            .collect::<EvalResult<Vec<_>>>()
            .map(Value::array),
        (_, Value::Array(rs)) => rs
            .iter()
            .map(|b| broadcast_binary(env, host, f, l, b))
            .collect::<EvalResult<Vec<_>>>()
            .map(Value::array),
        _ => call_isolated(env, host, f, vec![l.clone(), r.clone()]),
    })
}

/// Operand as read from the program.
enum Operand {
    Static(Block),
    Dynamic,
}

fn operand(item: Item) -> Operand {
    let block = match item {
        Item::Block(block) => block,
        Item::Token(token) => Block::single(token),
    };
    if block.text() == "~" {
        Operand::Dynamic
    } else {
        Operand::Static(block)
    }
}

impl Machine<'_> {
    /// Read the operand after a meta token and apply the combinator.
    #[tracing::instrument(level = "trace", skip_all, fields(meta = token.raw()))]
    pub(crate) fn apply_meta(&mut self, token: &Token) -> EvalResult<()> {
        let Some(item) = self.read_operand() else {
            return Err(malformed_program(format!(
                "`{}` needs a function after it",
                token.raw()
            )));
        };
        let Some(kind) = MetaKind::from_symbol(token.raw()) else {
            self.warn(
                ErrorCode::W6002,
                format!("unknown meta-combinator `{}`", token.raw()),
                token,
            );
            return Ok(());
        };
        let f = match operand(item) {
            Operand::Static(block) => block,
            Operand::Dynamic => {
                let value = self.env.stack.pop()?;
                callable(&value)?
            }
        };
        tracing::debug!(meta = kind.symbol(), f = f.text(), "applying meta-combinator");
        self.apply_combinator(kind, &f)
    }

    fn pop_array(&mut self, kind: MetaKind) -> EvalResult<Vec<Value>> {
        match self.env.stack.pop()? {
            Value::Array(items) => Ok(items.into_inner()),
            other => Err(type_mismatch(kind.symbol(), &[&other])),
        }
    }

    fn pop_array_pair(&mut self, kind: MetaKind) -> EvalResult<(Vec<Value>, Vec<Value>)> {
        match self.env.stack.pop2()? {
            (Value::Array(a), Value::Array(b)) => Ok((a.into_inner(), b.into_inner())),
            (a, b) => Err(type_mismatch(kind.symbol(), &[&a, &b])),
        }
    }

    fn apply_combinator(&mut self, kind: MetaKind, f: &Block) -> EvalResult<()> {
        match kind {
            MetaKind::Map => {
                let items = self.pop_array(kind)?;
                let mapped = items
                    .into_iter()
                    .map(|x| self.call_isolated(f, vec![x]))
                    .collect::<EvalResult<Vec<_>>>()?;
                self.env.stack.push(Value::array(mapped));
            }
            MetaKind::Each => {
                for x in self.pop_array(kind)? {
                    self.run_isolated(f, vec![x])?;
                }
            }
            MetaKind::Zip => {
                let (a, b) = self.pop_array_pair(kind)?;
                let zipped = a
                    .into_iter()
                    .zip(b)
                    .map(|(x, y)| self.call_isolated(f, vec![x, y]))
                    .collect::<EvalResult<Vec<_>>>()?;
                self.env.stack.push(Value::array(zipped));
            }
            MetaKind::Table => {
                let (a, b) = self.pop_array_pair(kind)?;
                let rows = a
                    .iter()
                    .map(|x| {
                        b.iter()
                            .map(|y| self.call_isolated(f, vec![x.clone(), y.clone()]))
                            .collect::<EvalResult<Vec<_>>>()
                            .map(Value::array)
                    })
                    .collect::<EvalResult<Vec<_>>>()?;
                self.env.stack.push(Value::array(rows));
            }
            MetaKind::Fold => {
                let items = self.pop_array(kind)?;
                let mut items = fold_seed(f).into_iter().chain(items);
                if let Some(first) = items.next() {
                    let mut acc = first;
                    for x in items {
                        acc = self.call_isolated(f, vec![acc, x])?;
                    }
                    self.env.stack.push(acc);
                }
            }
            MetaKind::BroadcastBinary => {
                let (l, r) = self.env.stack.pop2()?;
                let result = broadcast_binary(self.env, self.host, f, &l, &r)?;
                self.env.stack.push(result);
            }
            MetaKind::BroadcastUnary => {
                let value = self.env.stack.pop()?;
                let (env, host) = (&*self.env, self.host);
                let result = broadcast_unary(&value, &mut |x| {
                    call_isolated(env, host, f, vec![x.clone()])
                })?;
                self.env.stack.push(result);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
