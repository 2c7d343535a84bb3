//! Runtime values.
//!
//! # Heap Enforcement
//!
//! Strings, arrays, rationals and complex numbers live behind [`Heap`],
//! whose constructor is private to this module. Build them through the
//! factory methods:
//!
//! ```text
//! let s = Value::string("hello");                  // OK
//! let a = Value::array(vec![Value::int(1)]);       // OK
//! let s = Value::Str(Heap::new("hello".into()));   // ERROR: Heap::new is pub(super)
//! ```
//!
//! Values are immutable: operators never change a payload another value can
//! see, they build a new one. Cloning a value is a reference-count bump.
//!
//! Operations that produce no value return `Option<Value>` or push nothing;
//! there is no "none" variant to leak onto the stack.

mod format;
mod heap;
mod numeric;

use std::cmp::Ordering;
use std::fmt;

use fyn_ir::Block;
use fyn_stack::ensure_sufficient_stack;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

pub use format::ruby_float;
pub use heap::Heap;
pub use numeric::{ComplexValue, Number, Real};

/// A Fynyl value.
#[derive(Clone)]
pub enum Value {
    Int(BigInt),
    Rational(Heap<BigRational>),
    Float(f64),
    Complex(Heap<ComplexValue>),
    Bool(bool),
    /// Also used for single characters.
    Str(Heap<String>),
    Array(Heap<Vec<Value>>),
    Block(Block),
}

// Factory Methods

impl Value {
    #[inline]
    pub fn int(n: impl Into<BigInt>) -> Self {
        Value::Int(n.into())
    }

    #[inline]
    pub fn rational(r: BigRational) -> Self {
        Value::Rational(Heap::new(r))
    }

    #[inline]
    pub fn complex(c: ComplexValue) -> Self {
        Value::Complex(Heap::new(c))
    }

    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(items))
    }

    #[inline]
    pub fn block(block: Block) -> Self {
        Value::Block(block)
    }

    pub fn from_real(r: Real) -> Self {
        match r {
            Real::Int(n) => Value::Int(n),
            Real::Rational(q) => Value::rational(q),
            Real::Float(f) => Value::Float(f),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        match n {
            Number::Real(r) => Value::from_real(r),
            Number::Complex(c) => Value::complex(c),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

// Value Methods

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Rational(_) => "rational",
            Value::Float(_) => "float",
            Value::Complex(_) => "complex",
            Value::Bool(_) => "boolean",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Block(_) => "block",
        }
    }

    /// Everything is truthy except numeric zero, `""`, `()` and `false`.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int(n) => !n.is_zero(),
            Value::Rational(r) => !r.is_zero(),
            Value::Float(f) => *f != 0.0,
            Value::Complex(c) => !c.is_zero(),
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Block(_) => true,
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        self.as_real()
            .map(Number::Real)
            .or_else(|| match self {
                Value::Complex(c) => Some(Number::Complex((**c).clone())),
                _ => None,
            })
    }

    pub fn as_real(&self) -> Option<Real> {
        match self {
            Value::Int(n) => Some(Real::Int(n.clone())),
            Value::Rational(r) => Some(Real::Rational((**r).clone())),
            Value::Float(f) => Some(Real::Float(*f)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            Value::Int(_) | Value::Rational(_) | Value::Float(_) | Value::Complex(_)
        )
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Value::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Equality as `=` sees it: numeric across the tower, structural for
    /// strings and arrays, by text for blocks.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Block(a), Value::Block(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                a.len() == b.len()
                    && ensure_sufficient_stack(|| a.iter().zip(b.iter()).all(|(x, y)| x.loose_eq(y)))
            }
            _ => match (self.as_number(), other.as_number()) {
                (Some(a), Some(b)) => a.num_eq(&b),
                _ => false,
            },
        }
    }

    /// Ordering for comparisons and `.<`/`.>`: reals numerically, strings
    /// by bytes, arrays lexicographically. `None` when incomparable.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Some(a.as_str().cmp(b.as_str())),
            (Value::Array(a), Value::Array(b)) => ensure_sufficient_stack(|| {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.compare(y)? {
                        Ordering::Equal => {}
                        unequal => return Some(unequal),
                    }
                }
                Some(a.len().cmp(&b.len()))
            }),
            _ => match (self.as_real(), other.as_real()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => None,
            },
        }
    }
}

/// Strict structural equality: same variant, same payload.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Rational(a), Value::Rational(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Complex(a), Value::Complex(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Block(a), Value::Block(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}
