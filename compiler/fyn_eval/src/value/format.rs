//! Text renderings of values.
//!
//! - *canonical*: the round-trip form used by `p`, `P` and the final stack
//!   dump. Minus signs become the `_` marker so that a rendered number
//!   lexes back as a literal.
//! - *display*: the plain form used by `o`, `O`, `;` and friends. Arrays
//!   display through *inspect*, which quotes and escapes nested strings.

use std::fmt::Write;

use fyn_stack::ensure_sufficient_stack;

use super::numeric::{ComplexValue, Real};
use super::Value;

/// Shortest round-trip float text with a decimal point or exponent.
///
/// Fixed notation is used while the decimal exponent is between -4 and 16;
/// outside that range the form is `d.ddde+XX`.
pub fn ruby_float(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_owned();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if f == 0.0 {
        return if f.is_sign_negative() { "-0.0" } else { "0.0" }.to_owned();
    }

    let sci = format!("{:e}", f.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let decpt = exp + 1;

    let mut out = String::new();
    if f < 0.0 {
        out.push('-');
    }
    if (1..=16).contains(&decpt) {
        let point = decpt.unsigned_abs() as usize;
        if digits.len() <= point {
            out.push_str(&digits);
            out.extend(std::iter::repeat('0').take(point - digits.len()));
            out.push_str(".0");
        } else {
            out.push_str(&digits[..point]);
            out.push('.');
            out.push_str(&digits[point..]);
        }
    } else if (-3..=0).contains(&decpt) {
        out.push_str("0.");
        out.extend(std::iter::repeat('0').take(decpt.unsigned_abs() as usize));
        out.push_str(&digits);
    } else {
        out.push_str(&digits[..1]);
        out.push('.');
        if digits.len() > 1 {
            out.push_str(&digits[1..]);
        } else {
            out.push('0');
        }
        let _ = write!(out, "e{exp:+03}");
    }
    out
}

pub(crate) fn real_to_s(r: &Real) -> String {
    match r {
        Real::Int(n) => n.to_string(),
        Real::Rational(q) => format!("{}/{}", q.numer(), q.denom()),
        Real::Float(f) => ruby_float(*f),
    }
}

fn complex_to_s(c: &ComplexValue) -> String {
    let mut out = real_to_s(&c.re);
    out.push(if c.im.is_sign_negative() { '-' } else { '+' });
    out.push_str(&real_to_s(&c.im.abs()));
    if matches!(c.im, Real::Float(f) if !f.is_finite()) {
        out.push('*');
    }
    out.push('i');
    out
}

/// Quote a string with backslash escapes, as nested strings display.
fn inspect_str(s: &str, out: &mut String) {
    out.push('"');
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            '\x1b' => out.push_str("\\e"),
            '\x07' => out.push_str("\\a"),
            '\x08' => out.push_str("\\b"),
            '\x0b' => out.push_str("\\v"),
            '\x0c' => out.push_str("\\f"),
            '#' if matches!(chars.peek(), Some('{' | '$' | '@')) => out.push_str("\\#"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04X}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

impl Value {
    /// Round-trip text.
    pub fn canonical(&self) -> String {
        let mut out = String::new();
        self.write_canonical(&mut out);
        out
    }

    fn write_canonical(&self, out: &mut String) {
        match self {
            Value::Array(items) => {
                out.push('(');
                ensure_sufficient_stack(|| {
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            out.push(' ');
                        }
                        item.write_canonical(out);
                    }
                });
                out.push(')');
            }
            Value::Block(block) => {
                out.push('{');
                out.push_str(block.text());
                out.push('}');
            }
            Value::Bool(b) => out.push_str(if *b { "1b" } else { "0b" }),
            Value::Complex(c) if c.re.is_zero() => {
                out.push_str(&real_to_s(&c.im).replace('-', "_"));
                out.push('i');
            }
            Value::Complex(c) => out.push_str(&complex_to_s(c)),
            Value::Str(s) => {
                out.push('"');
                out.push_str(&s.replace('"', "\"\""));
                out.push('"');
            }
            Value::Int(_) | Value::Rational(_) | Value::Float(_) => {
                out.push_str(&self.display().replace('-', "_"));
            }
        }
    }

    /// Plain text.
    pub fn display(&self) -> String {
        match self {
            Value::Int(n) => n.to_string(),
            Value::Rational(q) => format!("{}/{}", q.numer(), q.denom()),
            Value::Float(f) => ruby_float(*f),
            Value::Complex(c) => complex_to_s(c),
            Value::Bool(b) => b.to_string(),
            Value::Str(s) => (**s).clone(),
            Value::Array(_) => self.inspect(),
            Value::Block(_) => self.canonical(),
        }
    }

    /// Debugging text: strings quoted, rationals and complex numbers
    /// parenthesized, arrays as `[a, b]`.
    pub fn inspect(&self) -> String {
        let mut out = String::new();
        self.write_inspect(&mut out);
        out
    }

    fn write_inspect(&self, out: &mut String) {
        match self {
            Value::Array(items) => {
                out.push('[');
                ensure_sufficient_stack(|| {
                    for (i, item) in items.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        item.write_inspect(out);
                    }
                });
                out.push(']');
            }
            Value::Str(s) => inspect_str(s, out),
            Value::Rational(_) | Value::Complex(_) => {
                out.push('(');
                out.push_str(&self.display());
                out.push(')');
            }
            _ => out.push_str(&self.display()),
        }
    }

    /// Text written by `o`: arrays are flattened one leaf per line, an empty
    /// array writes a blank line, and a newline is added unless the text
    /// already ends with one.
    pub fn puts_text(&self) -> String {
        let mut out = String::new();
        self.write_puts(&mut out);
        out
    }

    fn write_puts(&self, out: &mut String) {
        match self {
            Value::Array(items) if items.is_empty() => out.push('\n'),
            Value::Array(items) => ensure_sufficient_stack(|| {
                for item in items.iter() {
                    item.write_puts(out);
                }
            }),
            _ => {
                let text = self.display();
                out.push_str(&text);
                if !text.ends_with('\n') {
                    out.push('\n');
                }
            }
        }
    }
}
