//! Stack-shape operators.
//!
//! | op | before | after |
//! |---|---|---|
//! | `._` | `x y z` | `z y x` |
//! | `$` | `x y` | `x` |
//! | `.$` | `w x y 2` | `w` |
//! | `:$` | `w x y 1` | `w` |
//! | `C` | `x y` | |
//! | `d` | `x y` | `x y y` |
//! | `y` | `x y` | `x y x` |
//! | `~` | `x y` | `y x` |
//! | `.I` | `x y` | `y` |
//! | `:I` | `w x y 2` | `x y` |

use num_traits::Signed;

use super::{count_of, Builtin};
use crate::errors::{invalid_argument, type_mismatch, EvalResult};
use crate::machine::Machine;

impl Machine<'_> {
    pub(super) fn apply_stack(&mut self, op: Builtin) -> EvalResult<()> {
        let stack = &mut self.env.stack;
        match op {
            Builtin::ReverseStack => stack.reverse(),
            Builtin::Drop => {
                stack.pop()?;
            }
            Builtin::DropN => {
                let n = count_of(op, &stack.pop()?)?;
                stack.pop_n(n)?;
            }
            Builtin::DropTo => {
                let size = stack.pop()?;
                let floor = size
                    .as_real()
                    .ok_or_else(|| type_mismatch(op.symbol(), &[&size]))?
                    .floor()?;
                let keep = if floor.is_negative() {
                    0
                } else {
                    usize::try_from(floor).unwrap_or(usize::MAX)
                };
                stack.truncate(keep);
            }
            Builtin::Clear => stack.clear(),
            Builtin::Dup => {
                let top = stack.peek_nth(0)?.clone();
                stack.push(top);
            }
            Builtin::Over => {
                let second = stack.peek_nth(1)?.clone();
                stack.push(second);
            }
            Builtin::Swap => {
                let (a, b) = stack.pop2()?;
                stack.push(b);
                stack.push(a);
            }
            Builtin::KeepTop => {
                let top = stack.pop()?;
                stack.replace(vec![top]);
            }
            Builtin::KeepN => {
                let n = count_of(op, &stack.pop()?)?;
                let kept = stack.pop_n(n)?;
                stack.replace(kept);
            }
            _ => return Err(invalid_argument(op.symbol(), "not a stack operator")),
        }
        Ok(())
    }
}
