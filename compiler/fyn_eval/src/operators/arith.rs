//! Arithmetic, string/array algebra and numeric conversions.

use num_bigint::BigInt;
use num_complex::Complex64;
use num_rational::BigRational;
use num_traits::{Signed, Zero};

use super::sequence::{join_flat, split, successor};
use super::{to_count, Builtin};
use crate::errors::{division_by_zero, invalid_argument, type_mismatch, EvalResult};
use crate::machine::Machine;
use crate::value::{ComplexValue, Number, Real, Value};

impl Machine<'_> {
    pub(super) fn apply_arith(&mut self, op: Builtin) -> EvalResult<()> {
        let result = match op {
            Builtin::Add => {
                let (a, b) = self.env.stack.pop2()?;
                add_values(&a, &b)?
            }
            Builtin::Sub => {
                let (a, b) = self.env.stack.pop2()?;
                subtract(&a, &b)?
            }
            Builtin::Mul => {
                let (a, b) = self.env.stack.pop2()?;
                if self.repeat_call(&a, &b)? {
                    return Ok(());
                }
                multiply(&a, &b)?
            }
            Builtin::Div => {
                let (a, b) = self.env.stack.pop2()?;
                divide(&a, &b)?
            }
            Builtin::Mod => {
                let (a, b) = self.env.stack.pop2()?;
                numeric(op, &a, &b, Number::rem)?
            }
            Builtin::Pow => {
                let (a, b) = self.env.stack.pop2()?;
                numeric(op, &a, &b, Number::pow)?
            }
            _ => {
                let value = self.env.stack.pop()?;
                unary(op, &value)?
            }
        };
        self.env.stack.push(result);
        Ok(())
    }

    /// `block n *` and `n block *`. Returns whether the operands were a
    /// block and a count.
    fn repeat_call(&mut self, a: &Value, b: &Value) -> EvalResult<bool> {
        let ((Value::Block(f), Value::Int(n)) | (Value::Int(n), Value::Block(f))) = (a, b) else {
            return Ok(false);
        };
        if n.is_positive() {
            for _ in 0..to_count(Builtin::Mul, n)? {
                self.call_in_place(f)?;
            }
        }
        Ok(true)
    }
}

fn unary(op: Builtin, value: &Value) -> EvalResult<Value> {
    let mismatch = || type_mismatch(op.symbol(), &[value]);
    match op {
        Builtin::Negate => match value {
            Value::Array(items) => Ok(Value::array(items.iter().rev().cloned().collect())),
            Value::Str(s) => Ok(Value::string(s.chars().rev().collect::<String>())),
            _ => value.as_number().map(|n| n.neg().into()).ok_or_else(mismatch),
        },
        Builtin::Abs => value
            .as_number()
            .map(|n| Value::from_real(n.abs()))
            .ok_or_else(mismatch),
        Builtin::Pred => match value {
            Value::Int(n) => Ok(Value::Int(n - 1)),
            _ => Err(mismatch()),
        },
        Builtin::Succ => match value {
            Value::Int(n) => Ok(Value::Int(n + 1)),
            Value::Str(s) => Ok(Value::string(successor(s))),
            _ => Err(mismatch()),
        },
        Builtin::TimesI => value
            .as_number()
            .map(|n| n.mul(&Number::Complex(ComplexValue::i())).into())
            .ok_or_else(mismatch),
        Builtin::Cos => match value.as_number().ok_or_else(mismatch)? {
            Number::Real(r) => Ok(Value::Float(r.to_f64().cos())),
            Number::Complex(c) => Ok(Value::complex(ComplexValue::from_c64(c.to_c64().cos()))),
        },
        Builtin::Acos => match value.as_number().ok_or_else(mismatch)? {
            Number::Real(r) if (-1.0..=1.0).contains(&r.to_f64()) => {
                Ok(Value::Float(r.to_f64().acos()))
            }
            Number::Real(r) => Ok(Value::complex(ComplexValue::from_c64(
                Complex64::new(r.to_f64(), 0.0).acos(),
            ))),
            Number::Complex(c) => Ok(Value::complex(ComplexValue::from_c64(c.to_c64().acos()))),
        },
        Builtin::ToFloat => match value {
            Value::Str(s) => Ok(Value::Float(float_prefix(s))),
            _ => real_part(op, value).map(|r| Value::Float(r.to_f64())),
        },
        Builtin::ToRational => match value {
            Value::Str(s) => rational_prefix(s).map(Value::rational),
            _ => {
                let r = real_part(op, value)?;
                r.to_rational().map(Value::rational).ok_or_else(|| {
                    invalid_argument(op.symbol(), format!("{} has no rational value", r.to_f64()))
                })
            }
        },
        Builtin::ToInt => match value {
            Value::Str(s) => Ok(Value::Int(int_prefix(s))),
            _ => real_part(op, value)?.trunc().map(Value::Int),
        },
        _ => Err(mismatch()),
    }
}

/// The real value of a number; complex numbers qualify only when their
/// imaginary part is exactly zero.
fn real_part(op: Builtin, value: &Value) -> EvalResult<Real> {
    match value.as_number() {
        Some(Number::Real(r)) => Ok(r),
        Some(Number::Complex(c)) if c.im.is_zero() && !matches!(c.im, Real::Float(_)) => Ok(c.re),
        Some(Number::Complex(_)) => Err(invalid_argument(
            op.symbol(),
            format!("cannot convert {} into a real number", value.display()),
        )),
        None => Err(type_mismatch(op.symbol(), &[value])),
    }
}

fn numeric(
    op: Builtin,
    a: &Value,
    b: &Value,
    f: impl FnOnce(&Number, &Number) -> EvalResult<Number>,
) -> EvalResult<Value> {
    match (a.as_number(), b.as_number()) {
        (Some(x), Some(y)) => f(&x, &y).map(Value::from),
        _ => Err(type_mismatch(op.symbol(), &[a, b])),
    }
}

/// `+`: numbers add, strings and arrays concatenate.
pub(crate) fn add_values(a: &Value, b: &Value) -> EvalResult<Value> {
    match (a, b) {
        (Value::Str(x), Value::Str(y)) => Ok(Value::string(format!("{}{}", x.as_str(), y.as_str()))),
        (Value::Array(x), Value::Array(y)) => {
            Ok(Value::array(x.iter().chain(y.iter()).cloned().collect()))
        }
        _ => numeric(Builtin::Add, a, b, |x, y| Ok(x.add(y))),
    }
}

/// `-`: numbers subtract; arrays drop every element found in the right.
fn subtract(a: &Value, b: &Value) -> EvalResult<Value> {
    match (a, b) {
        (Value::Array(x), Value::Array(y)) => Ok(Value::array(
            x.iter().filter(|item| !y.contains(item)).cloned().collect(),
        )),
        _ => numeric(Builtin::Sub, a, b, |x, y| Ok(x.sub(y))),
    }
}

fn multiply(a: &Value, b: &Value) -> EvalResult<Value> {
    let op = Builtin::Mul;
    match (a, b) {
        (Value::Str(s), Value::Int(n)) => Ok(Value::string(s.repeat(to_count(op, n)?))),
        (Value::Array(items), Value::Int(n)) => {
            let times = to_count(op, n)?;
            let len = items
                .len()
                .checked_mul(times)
                .ok_or_else(|| invalid_argument(op.symbol(), "repeated array is too large"))?;
            Ok(Value::array(items.iter().cycle().take(len).cloned().collect()))
        }
        (Value::Array(items), Value::Str(sep)) => Ok(Value::string(join_flat(items, sep))),
        _ => numeric(op, a, b, |x, y| Ok(x.mul(y))),
    }
}

fn divide(a: &Value, b: &Value) -> EvalResult<Value> {
    let op = Builtin::Div;
    match (a, b) {
        (Value::Str(s), Value::Str(sep)) => Ok(Value::array(
            split(s, sep).into_iter().map(Value::string).collect(),
        )),
        (Value::Array(items), _) => {
            let Some(n) = b.as_real() else {
                return Err(type_mismatch(op.symbol(), &[a, b]));
            };
            Ok(Value::array(chunk_into(op, items, &n)?))
        }
        _ => numeric(op, a, b, Number::div),
    }
}

/// Split `items` into `n` runs of near-equal length; the last may be short.
fn chunk_into(op: Builtin, items: &[Value], n: &Real) -> EvalResult<Vec<Value>> {
    let pieces = n.to_f64();
    if pieces.is_nan() || pieces <= 0.0 {
        return Err(invalid_argument(
            op.symbol(),
            format!("cannot split into {pieces} pieces"),
        ));
    }
    if items.is_empty() {
        return Ok(Vec::new());
    }
    #[expect(clippy::cast_sign_loss, reason = "both operands are positive")]
    let size = ((items.len() as f64 / pieces).ceil() as usize).max(1);
    Ok(items
        .chunks(size)
        .map(|chunk| Value::array(chunk.to_vec()))
        .collect())
}

// ─── Numeric Prefixes ───

/// Length of the leading `[+-]?[0-9]*` run and of its digits.
fn scan_int(s: &str) -> (usize, usize) {
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    (sign + digits, digits)
}

/// Leading integer of `s`, or 0.
fn int_prefix(s: &str) -> BigInt {
    let s = s.trim_start();
    let (len, digits) = scan_int(s);
    if digits == 0 {
        return BigInt::zero();
    }
    s[..len].parse().unwrap_or_default()
}

/// Leading decimal number of `s` with optional fraction and exponent, or 0.
fn float_prefix(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let (mut end, int_digits) = scan_int(s);
    let mut digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if frac > 0 {
            end += 1 + frac;
            digits += frac;
        }
    }
    if digits == 0 {
        return 0.0;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let (exp_len, exp_digits) = scan_int(&s[end + 1..]);
        if exp_digits > 0 {
            end += 1 + exp_len;
        }
    }
    s[..end].parse().unwrap_or(0.0)
}

/// Leading `a/b` or decimal of `s` as an exact rational, or 0.
fn rational_prefix(s: &str) -> EvalResult<BigRational> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let (int_len, int_digits) = scan_int(s);
    let mut value = BigRational::from_integer(if int_digits == 0 {
        BigInt::zero()
    } else {
        s[..int_len].parse().unwrap_or_default()
    });
    let negative = s.starts_with('-');
    let mut end = int_len;
    if bytes.get(end) == Some(&b'.') {
        let frac = &s[end + 1..];
        let frac_len = frac.bytes().take_while(u8::is_ascii_digit).count();
        if frac_len > 0 {
            let numer: BigInt = frac[..frac_len].parse().unwrap_or_default();
            let denom = num_traits::pow(BigInt::from(10), frac_len);
            let fraction = BigRational::new(numer, denom);
            value = if negative { value - fraction } else { value + fraction };
            end += 1 + frac_len;
        } else if int_digits == 0 {
            return Ok(BigRational::zero());
        }
    } else if int_digits == 0 {
        return Ok(BigRational::zero());
    }
    if bytes.get(end) == Some(&b'/') {
        let rest = &s[end + 1..];
        let denom_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        if denom_len > 0 {
            let denom: BigInt = rest[..denom_len].parse().unwrap_or_default();
            if denom.is_zero() {
                return Err(division_by_zero());
            }
            value /= BigRational::from_integer(denom);
        }
    }
    Ok(value)
}
