//! Strings, arrays, ranges and digit conversions.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};

use super::{count_of, to_count, Builtin};
use crate::errors::{index_out_of_bounds, invalid_argument, type_mismatch, EvalResult};
use crate::machine::Machine;
use crate::meta::broadcast_unary;
use crate::operators::add_values;
use crate::value::{Number, Real, Value};

impl Machine<'_> {
    pub(super) fn apply_sequence(&mut self, op: Builtin) -> EvalResult<()> {
        let stack = &mut self.env.stack;
        let result = match op {
            Builtin::Pair => {
                let (a, b) = stack.pop2()?;
                Value::array(vec![a, b])
            }
            Builtin::Pack => {
                let n = self.pop_count(op)?;
                Value::array(self.env.stack.pop_n(n)?)
            }
            Builtin::ToText => Value::string(stack.pop()?.display()),
            Builtin::Format => {
                let (template, n) = stack.pop2()?;
                let Value::Str(template) = template else {
                    return Err(type_mismatch(op.symbol(), &[&template, &n]));
                };
                let args = self.env.stack.pop_n(count_of(op, &n)?)?;
                Value::string(format_template(&template, &args))
            }
            Builtin::Chr => chr(&stack.pop()?)?,
            Builtin::Chars => chars(&stack.pop()?)?,
            Builtin::Join => {
                if let Some(Value::Array(items)) = stack.peek() {
                    let joined = join_flat(items, "");
                    stack.pop()?;
                    Value::string(joined)
                } else {
                    match stack.pop2()? {
                        (Value::Array(items), Value::Str(sep)) => Value::string(join_flat(&items, &sep)),
                        (a, b) => return Err(type_mismatch(op.symbol(), &[&a, &b])),
                    }
                }
            }
            Builtin::Splat => {
                match stack.pop()? {
                    Value::Array(items) => stack.extend(items.into_inner()),
                    other => return Err(type_mismatch(op.symbol(), &[&other])),
                }
                return Ok(());
            }
            Builtin::Range => {
                let n = stack.pop()?;
                let end = n
                    .as_real()
                    .ok_or_else(|| type_mismatch(op.symbol(), &[&n]))?
                    .floor()?;
                int_range(op, &BigInt::from(1), &end)?
            }
            Builtin::RangeBetween => {
                let (a, b) = stack.pop2()?;
                range_between(&a, &b)?
            }
            Builtin::Indices => indices(&stack.pop()?)?,
            Builtin::Size => size(&stack.pop()?)?,
            Builtin::Sum => match stack.pop()? {
                Value::Array(items) => items
                    .iter()
                    .try_fold(Value::int(0), |acc, x| add_values(&acc, x))?,
                other => return Err(type_mismatch(op.symbol(), &[&other])),
            },
            Builtin::Transpose => transpose(&stack.pop()?)?,
            Builtin::Index => {
                let (seq, idx) = stack.pop2()?;
                broadcast_unary(&idx, &mut |leaf| index(&seq, leaf))?
            }
            Builtin::ToBase => {
                let (n, base) = stack.pop2()?;
                to_base(&n, &base)?
            }
            Builtin::FromBase => {
                let (digits, base) = stack.pop2()?;
                from_base(&digits, &base)?
            }
            Builtin::Random => {
                let value = stack.pop()?;
                if let Value::Block(body) = value {
                    let condition = self.env.stack.pop()?;
                    if condition.is_truthy() {
                        self.call_in_place(&body)?;
                    }
                    return Ok(());
                }
                self.random(&value)?
            }
            Builtin::Shuffle => match stack.pop()? {
                Value::Array(items) => {
                    let mut items = items.into_inner();
                    self.host.shuffle(&mut items);
                    Value::array(items)
                }
                other => return Err(type_mismatch(op.symbol(), &[&other])),
            },
            _ => return Err(invalid_argument(op.symbol(), "not a sequence operator")),
        };
        self.env.stack.push(result);
        Ok(())
    }

    fn random(&self, value: &Value) -> EvalResult<Value> {
        let op = Builtin::Random;
        let pick = |len: usize| (len > 0).then(|| self.host.random_index(len));
        match value {
            Value::Array(items) => pick(items.len())
                .map(|i| items[i].clone())
                .ok_or_else(|| invalid_argument(op.symbol(), "cannot pick from an empty array")),
            Value::Str(s) => {
                let chars: Vec<char> = s.chars().collect();
                pick(chars.len())
                    .map(|i| Value::string(chars[i]))
                    .ok_or_else(|| invalid_argument(op.symbol(), "cannot pick from an empty string"))
            }
            _ => {
                let bound = value
                    .as_real()
                    .ok_or_else(|| type_mismatch(op.symbol(), &[value]))?
                    .abs()
                    .trunc()?;
                if bound >= BigInt::from(1) {
                    Ok(Value::Int(self.host.random_below(&bound)))
                } else {
                    Ok(Value::Float(self.host.random_float()))
                }
            }
        }
    }
}

// ─── Text ───

/// Join leaves of `items` with `sep`, descending into nested arrays.
pub(super) fn join_flat(items: &[Value], sep: &str) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Array(inner) => join_flat(inner, sep),
            leaf => leaf.display(),
        })
        .collect::<Vec<_>>()
        .join(sep)
}

/// Split `s` on `sep`. A single space splits on whitespace runs, an empty
/// separator splits into characters; trailing empty fields are dropped.
pub(super) fn split(s: &str, sep: &str) -> Vec<String> {
    let mut fields: Vec<String> = match sep {
        " " => s.split_whitespace().map(str::to_owned).collect(),
        "" => s.chars().map(String::from).collect(),
        _ => s.split(sep).map(str::to_owned).collect(),
    };
    while fields.last().is_some_and(String::is_empty) {
        fields.pop();
    }
    fields
}

/// The next string in the alphanumeric odometer: `"az"` → `"ba"`,
/// `"zz"` → `"aaa"`, `"a9"` → `"b0"`. Strings without letters or digits
/// bump their last character.
pub(super) fn successor(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    let Some(mut i) = chars.iter().rposition(char::is_ascii_alphanumeric) else {
        if let Some(last) = chars.last_mut() {
            *last = char::from_u32(u32::from(*last) + 1).unwrap_or(*last);
        }
        return chars.into_iter().collect();
    };
    loop {
        let (next, carry) = match chars[i] {
            '9' => ('0', Some('1')),
            'z' => ('a', Some('a')),
            'Z' => ('A', Some('A')),
            c => (char::from_u32(u32::from(c) + 1).unwrap_or(c), None),
        };
        chars[i] = next;
        let Some(carry) = carry else {
            break;
        };
        match chars[..i].iter().rposition(char::is_ascii_alphanumeric) {
            Some(j) => i = j,
            None => {
                chars.insert(i, carry);
                break;
            }
        }
    }
    chars.into_iter().collect()
}

/// Replace each `%k` with the display text of `args[k]`; missing
/// arguments become empty.
fn format_template(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(at) = rest.find('%') {
        out.push_str(&rest[..at]);
        let after = &rest[at + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits == 0 {
            out.push('%');
        } else if let Some(arg) = after[..digits].parse::<usize>().ok().and_then(|k| args.get(k)) {
            out.push_str(&arg.display());
        }
        rest = &after[digits..];
    }
    out.push_str(rest);
    out
}

fn chr(value: &Value) -> EvalResult<Value> {
    let op = Builtin::Chr;
    match value {
        Value::Int(n) => n
            .to_u32()
            .and_then(char::from_u32)
            .map(Value::string)
            .ok_or_else(|| invalid_argument(op.symbol(), format!("{n} is not a character"))),
        Value::Str(s) => Ok(Value::string(s.chars().next().map(String::from).unwrap_or_default())),
        _ => Err(type_mismatch(op.symbol(), &[value])),
    }
}

fn chars(value: &Value) -> EvalResult<Value> {
    let op = Builtin::Chars;
    match value {
        Value::Str(s) => Ok(Value::array(s.chars().map(Value::string).collect())),
        Value::Array(items) => Ok(Value::array(items.to_vec())),
        Value::Int(n) if n.is_negative() => Err(invalid_argument(
            op.symbol(),
            "negative numbers have no digits",
        )),
        Value::Int(n) => Ok(Value::array(
            n.to_radix_be(10)
                .1
                .into_iter()
                .map(Value::int)
                .collect(),
        )),
        _ => Err(type_mismatch(op.symbol(), &[value])),
    }
}

// ─── Ranges ───

fn int_range(op: Builtin, start: &BigInt, end: &BigInt) -> EvalResult<Value> {
    if end < start {
        return Ok(Value::array(Vec::new()));
    }
    let len = to_count(op, &(end - start + 1))?;
    let mut items = Vec::with_capacity(len);
    let mut n = start.clone();
    while &n <= end {
        items.push(Value::Int(n.clone()));
        n += 1;
    }
    Ok(Value::array(items))
}

fn range_between(a: &Value, b: &Value) -> EvalResult<Value> {
    let op = Builtin::RangeBetween;
    match (a, b) {
        (Value::Int(start), _) => {
            let end = b
                .as_real()
                .ok_or_else(|| type_mismatch(op.symbol(), &[a, b]))?
                .floor()?;
            int_range(op, start, &end)
        }
        (Value::Str(start), Value::Str(end)) => Ok(Value::array(
            string_range(start, end).into_iter().map(Value::string).collect(),
        )),
        _ => Err(type_mismatch(op.symbol(), &[a, b])),
    }
}

/// Strings from `start` to `end` by [`successor`]. Stops at `end`, or once
/// a successor is empty or longer than `end`.
fn string_range(start: &str, end: &str) -> Vec<String> {
    // Two single ASCII characters step by code point.
    if let ([from], [to]) = (start.as_bytes(), end.as_bytes()) {
        if from.is_ascii() && to.is_ascii() {
            return (*from..=*to).map(|b| char::from(b).to_string()).collect();
        }
    }
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if all_digits(start) && all_digits(end) {
        let width = start.len();
        let (Ok(from), Ok(to)) = (start.parse::<BigInt>(), end.parse::<BigInt>()) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut n = from;
        while n <= to {
            out.push(format!("{n:0width$}"));
            n += 1;
        }
        return out;
    }
    if start > end {
        return Vec::new();
    }
    let limit = end.chars().count();
    let mut out = Vec::new();
    let mut current = start.to_owned();
    loop {
        out.push(current.clone());
        if current == end {
            break;
        }
        let next = successor(&current);
        if next.is_empty() || next == current || next.chars().count() > limit {
            break;
        }
        current = next;
    }
    out
}

fn indices(value: &Value) -> EvalResult<Value> {
    let op = Builtin::Indices;
    let len = match value {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        _ => {
            let n = value
                .as_real()
                .ok_or_else(|| type_mismatch(op.symbol(), &[value]))?;
            let end = -(n.neg().floor()?);
            return int_range(op, &BigInt::zero(), &(end - 1));
        }
    };
    Ok(Value::array((0..len).map(Value::int).collect()))
}

fn size(value: &Value) -> EvalResult<Value> {
    let len = match value {
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        Value::Block(_) => return Ok(Value::Float(f64::INFINITY)),
        _ => {
            let number = value
                .as_number()
                .ok_or_else(|| type_mismatch(Builtin::Size.symbol(), &[value]))?;
            Value::from_real(number.abs()).display().chars().count()
        }
    };
    Ok(Value::int(len))
}

fn transpose(value: &Value) -> EvalResult<Value> {
    let op = Builtin::Transpose;
    let Value::Array(rows) = value else {
        return Err(type_mismatch(op.symbol(), &[value]));
    };
    let rows = rows
        .iter()
        .map(|row| {
            row.as_array()
                .ok_or_else(|| type_mismatch(op.symbol(), &[row]))
        })
        .collect::<EvalResult<Vec<_>>>()?;
    let Some(width) = rows.first().map(|row| row.len()) else {
        return Ok(Value::array(Vec::new()));
    };
    if let Some(bad) = rows.iter().find(|row| row.len() != width) {
        return Err(invalid_argument(
            op.symbol(),
            format!("element size differs ({} should be {width})", bad.len()),
        ));
    }
    Ok(Value::array(
        (0..width)
            .map(|col| Value::array(rows.iter().map(|row| row[col].clone()).collect()))
            .collect(),
    ))
}

/// `seq[i]`, counting negative indexes from the end.
fn index(seq: &Value, i: &Value) -> EvalResult<Value> {
    let op = Builtin::Index;
    let Some(i) = i.as_real() else {
        return Err(type_mismatch(op.symbol(), &[seq, i]));
    };
    let i = i.trunc()?;
    let resolve = |len: usize| {
        let len_big = BigInt::from(len);
        let at = if i.is_negative() { &len_big + &i } else { i.clone() };
        at.to_usize()
            .filter(|at| *at < len)
            .ok_or_else(|| index_out_of_bounds(&i, len))
    };
    match seq {
        Value::Array(items) => resolve(items.len()).map(|at| items[at].clone()),
        Value::Str(s) => {
            let chars: Vec<char> = s.chars().collect();
            resolve(chars.len()).map(|at| Value::string(chars[at]))
        }
        _ => Err(type_mismatch(op.symbol(), &[seq])),
    }
}

// ─── Bases ───

fn to_base(n: &Value, base: &Value) -> EvalResult<Value> {
    let op = Builtin::ToBase;
    let (Value::Int(n), Value::Int(base)) = (n, base) else {
        return Err(type_mismatch(op.symbol(), &[n, base]));
    };
    if base < &BigInt::from(2) {
        return Err(invalid_argument(op.symbol(), format!("base {base} is below 2")));
    }
    if n.is_negative() {
        return Err(invalid_argument(op.symbol(), "negative numbers have no digits"));
    }
    if n.is_zero() {
        return Ok(Value::array(vec![Value::int(0)]));
    }
    let mut digits = Vec::new();
    let mut rest = n.clone();
    while !rest.is_zero() {
        let (q, r) = rest.div_mod_floor(base);
        digits.push(Value::Int(r));
        rest = q;
    }
    digits.reverse();
    Ok(Value::array(digits))
}

fn from_base(digits: &Value, base: &Value) -> EvalResult<Value> {
    let op = Builtin::FromBase;
    let (Value::Array(digits), Some(base)) = (digits, base.as_number()) else {
        return Err(type_mismatch(op.symbol(), &[digits, base]));
    };
    let mut acc = Number::Real(Real::Int(BigInt::zero()));
    for digit in digits.iter() {
        let digit = digit
            .as_number()
            .ok_or_else(|| type_mismatch(op.symbol(), &[digit]))?;
        acc = acc.mul(&base).add(&digit);
    }
    Ok(acc.into())
}
