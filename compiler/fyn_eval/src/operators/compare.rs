//! Equality, ordering and truthiness.

use std::cmp::Ordering;

use super::Builtin;
use crate::errors::{invalid_argument, type_mismatch, EvalResult};
use crate::machine::Machine;
use crate::value::Value;

impl Machine<'_> {
    pub(super) fn apply_compare(&mut self, op: Builtin) -> EvalResult<()> {
        let stack = &mut self.env.stack;
        let result = match op {
            Builtin::Truthy => Value::Bool(stack.pop()?.is_truthy()),
            Builtin::Eq => {
                let (a, b) = stack.pop2()?;
                Value::Bool(a.loose_eq(&b))
            }
            Builtin::Ne => {
                let (a, b) = stack.pop2()?;
                Value::Bool(!a.loose_eq(&b))
            }
            Builtin::Lt | Builtin::Le | Builtin::Gt | Builtin::Ge => {
                let (a, b) = stack.pop2()?;
                Value::Bool(ordered(op, &a, &b)?)
            }
            Builtin::Min | Builtin::Max => {
                let (a, b) = stack.pop2()?;
                let ordering = a.compare(&b).ok_or_else(|| type_mismatch(op.symbol(), &[&a, &b]))?;
                // Ties keep the first operand.
                let take_second = match op {
                    Builtin::Min => ordering == Ordering::Greater,
                    _ => ordering == Ordering::Less,
                };
                if take_second {
                    b
                } else {
                    a
                }
            }
            _ => return Err(invalid_argument(op.symbol(), "not a comparison operator")),
        };
        stack.push(result);
        Ok(())
    }
}

/// `< :< > :>` on two reals or two strings. Any NaN compares false.
fn ordered(op: Builtin, a: &Value, b: &Value) -> EvalResult<bool> {
    let ordering = match (a, b) {
        (Value::Str(x), Value::Str(y)) => Some(x.as_str().cmp(y.as_str())),
        _ => match (a.as_real(), b.as_real()) {
            (Some(x), Some(y)) => x.partial_cmp(&y),
            _ => return Err(type_mismatch(op.symbol(), &[a, b])),
        },
    };
    let Some(ordering) = ordering else {
        return Ok(false);
    };
    Ok(match op {
        Builtin::Lt => ordering.is_lt(),
        Builtin::Le => ordering.is_le(),
        Builtin::Gt => ordering.is_gt(),
        _ => ordering.is_ge(),
    })
}
