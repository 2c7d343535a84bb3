//! Control flow: calls, loops and halting.
//!
//! Loop bodies run in place, so whatever they leave on the stack is what the
//! next iteration (and the loop condition) sees. `L` only ends through a
//! halt or an error.

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};

use super::Builtin;
use crate::compile::{callable, compile};
use crate::errors::{halt, invalid_argument, type_mismatch, EvalResult};
use crate::machine::Machine;
use crate::value::Value;

impl Machine<'_> {
    pub(super) fn apply_control(&mut self, op: Builtin) -> EvalResult<()> {
        match op {
            Builtin::Not => {
                let value = self.env.stack.pop()?;
                match value {
                    Value::Bool(b) => self.env.stack.push(Value::Bool(!b)),
                    _ if value.is_number() => {
                        let n = value
                            .as_real()
                            .ok_or_else(|| type_mismatch(op.symbol(), &[&value]))?;
                        self.env.stack.push(Value::Int(factorial(&n.floor()?)));
                    }
                    _ => self.call_in_place(&callable(&value)?)?,
                }
            }
            Builtin::Halt => {
                self.host.print().flush();
                return Err(halt(0, false));
            }
            Builtin::HaltNow => {
                let value = self.env.stack.pop()?;
                let code = match &value {
                    Value::Int(n) => n.to_i32().ok_or_else(|| {
                        invalid_argument(op.symbol(), format!("exit code {n} is out of range"))
                    })?,
                    Value::Bool(ok) => i32::from(!ok),
                    _ => return Err(type_mismatch(op.symbol(), &[&value])),
                };
                return Err(halt(code, true));
            }
            Builtin::Eval => {
                let value = self.env.stack.pop()?;
                self.call_in_place(&callable(&value)?)?;
            }
            Builtin::ToBlock => {
                let block = match self.env.stack.pop()? {
                    Value::Block(block) => block,
                    Value::Str(source) => compile(&source)?,
                    other => return Err(type_mismatch(op.symbol(), &[&other])),
                };
                self.env.stack.push(Value::block(block));
            }
            Builtin::Loop => {
                let body = callable(&self.env.stack.pop()?)?;
                loop {
                    self.call_in_place(&body)?;
                }
            }
            Builtin::While => {
                let body = callable(&self.env.stack.pop()?)?;
                while self.env.stack.peek_nth(0)?.is_truthy() {
                    self.call_in_place(&body)?;
                }
            }
            Builtin::WhileCond => {
                let (condition, body) = self.env.stack.pop2()?;
                let (condition, body) = (callable(&condition)?, callable(&body)?);
                loop {
                    let args = self.env.stack.as_slice().to_vec();
                    if !self.call_isolated(&condition, args)?.is_truthy() {
                        break;
                    }
                    self.call_in_place(&body)?;
                }
            }
            _ => return Err(invalid_argument(op.symbol(), "not a control operator")),
        }
        Ok(())
    }
}

/// `n!`, with anything below 1 giving 1.
fn factorial(n: &BigInt) -> BigInt {
    let mut product = BigInt::one();
    let mut k = BigInt::from(2);
    while &k <= n {
        product *= &k;
        k += 1;
    }
    product
}
