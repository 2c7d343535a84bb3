//! Numeric tower.
//!
//! [`Real`] is an integer, rational or float; [`ComplexValue`] pairs two
//! reals. Mixed arithmetic promotes to the wider member: any float makes the
//! result a float, otherwise any rational makes it a rational. Integer `/`
//! floors and `%` is floored modulo; [`Real::quo`] divides exactly.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_complex::Complex64;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};

use crate::errors::{division_by_zero, invalid_argument, EvalResult};

/// A member of the real part of the tower.
#[derive(Clone, Debug, PartialEq)]
pub enum Real {
    Int(BigInt),
    Rational(BigRational),
    Float(f64),
}

/// Two operands widened to a common representation.
enum Promoted {
    Int(BigInt, BigInt),
    Rational(BigRational, BigRational),
    Float(f64, f64),
}

fn rational_to_f64(r: &BigRational) -> f64 {
    match (r.numer().to_f64(), r.denom().to_f64()) {
        (Some(n), Some(d)) => n / d,
        _ => f64::NAN,
    }
}

impl Real {
    pub fn to_f64(&self) -> f64 {
        match self {
            Real::Int(n) => n.to_f64().unwrap_or(f64::NAN),
            Real::Rational(r) => rational_to_f64(r),
            Real::Float(f) => *f,
        }
    }

    /// Exact rational value; `None` for non-finite floats.
    pub fn to_rational(&self) -> Option<BigRational> {
        match self {
            Real::Int(n) => Some(BigRational::from_integer(n.clone())),
            Real::Rational(r) => Some(r.clone()),
            Real::Float(f) => BigRational::from_float(*f),
        }
    }

    /// Truncate toward zero.
    pub fn trunc(&self) -> EvalResult<BigInt> {
        match self {
            Real::Int(n) => Ok(n.clone()),
            Real::Rational(r) => Ok(r.trunc().to_integer()),
            Real::Float(f) => BigInt::from_f64(f.trunc())
                .ok_or_else(|| invalid_argument("I", format!("cannot convert {f} to an integer"))),
        }
    }

    /// Round toward negative infinity.
    pub fn floor(&self) -> EvalResult<BigInt> {
        match self {
            Real::Int(n) => Ok(n.clone()),
            Real::Rational(r) => Ok(r.floor().to_integer()),
            Real::Float(f) => BigInt::from_f64(f.floor())
                .ok_or_else(|| invalid_argument("I", format!("cannot convert {f} to an integer"))),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Real::Int(n) => n.is_zero(),
            Real::Rational(r) => r.is_zero(),
            Real::Float(f) => *f == 0.0,
        }
    }

    /// Sign used when rendering: `-0.0` counts as negative.
    pub fn is_sign_negative(&self) -> bool {
        match self {
            Real::Int(n) => n.is_negative(),
            Real::Rational(r) => r.is_negative(),
            Real::Float(f) => f.is_sign_negative(),
        }
    }

    fn promote(&self, other: &Real) -> Promoted {
        match (self, other) {
            (Real::Int(a), Real::Int(b)) => Promoted::Int(a.clone(), b.clone()),
            (Real::Float(_), _) | (_, Real::Float(_)) => {
                Promoted::Float(self.to_f64(), other.to_f64())
            }
            _ => match (self.to_rational(), other.to_rational()) {
                (Some(a), Some(b)) => Promoted::Rational(a, b),
                _ => Promoted::Float(self.to_f64(), other.to_f64()),
            },
        }
    }

    pub fn add(&self, other: &Real) -> Real {
        match self.promote(other) {
            Promoted::Int(a, b) => Real::Int(a + b),
            Promoted::Rational(a, b) => Real::Rational(a + b),
            Promoted::Float(a, b) => Real::Float(a + b),
        }
    }

    pub fn sub(&self, other: &Real) -> Real {
        match self.promote(other) {
            Promoted::Int(a, b) => Real::Int(a - b),
            Promoted::Rational(a, b) => Real::Rational(a - b),
            Promoted::Float(a, b) => Real::Float(a - b),
        }
    }

    pub fn mul(&self, other: &Real) -> Real {
        match self.promote(other) {
            Promoted::Int(a, b) => Real::Int(a * b),
            Promoted::Rational(a, b) => Real::Rational(a * b),
            Promoted::Float(a, b) => Real::Float(a * b),
        }
    }

    /// Division as `/` performs it: integers floor, floats follow IEEE.
    pub fn div(&self, other: &Real) -> EvalResult<Real> {
        match self.promote(other) {
            Promoted::Int(a, b) => {
                if b.is_zero() {
                    return Err(division_by_zero());
                }
                Ok(Real::Int(a.div_floor(&b)))
            }
            Promoted::Rational(a, b) => {
                if b.is_zero() {
                    return Err(division_by_zero());
                }
                Ok(Real::Rational(a / b))
            }
            Promoted::Float(a, b) => Ok(Real::Float(a / b)),
        }
    }

    /// Exact division: two integers give a rational.
    pub fn quo(&self, other: &Real) -> EvalResult<Real> {
        match (self, other) {
            (Real::Int(a), Real::Int(b)) => {
                if b.is_zero() {
                    return Err(division_by_zero());
                }
                Ok(Real::Rational(BigRational::new(a.clone(), b.clone())))
            }
            _ => self.div(other),
        }
    }

    /// Floored modulo: the result takes the sign of the divisor.
    pub fn rem(&self, other: &Real) -> EvalResult<Real> {
        match self.promote(other) {
            Promoted::Int(a, b) => {
                if b.is_zero() {
                    return Err(division_by_zero());
                }
                Ok(Real::Int(a.mod_floor(&b)))
            }
            Promoted::Rational(a, b) => {
                if b.is_zero() {
                    return Err(division_by_zero());
                }
                let quotient = (&a / &b).floor();
                Ok(Real::Rational(a - b * quotient))
            }
            Promoted::Float(a, b) => {
                let mut m = a % b;
                if m != 0.0 && (m < 0.0) != (b < 0.0) {
                    m += b;
                }
                Ok(Real::Float(m))
            }
        }
    }

    /// Raise to a power. A negative base with a fractional exponent leaves
    /// the reals.
    pub fn pow(&self, exponent: &Real) -> EvalResult<Number> {
        match (self, exponent) {
            (Real::Int(base), Real::Int(e)) => int_pow(base, e).map(Number::Real),
            (Real::Rational(base), Real::Int(e)) => rational_pow(base, e).map(Number::Real),
            (_, Real::Rational(e)) if e.is_integer() => self.pow(&Real::Int(e.to_integer())),
            _ => {
                let (b, e) = (self.to_f64(), exponent.to_f64());
                if b < 0.0 && e.fract() != 0.0 {
                    let c = Complex64::new(b, 0.0).powf(e);
                    Ok(Number::Complex(ComplexValue::from_c64(c)))
                } else {
                    Ok(Number::Real(Real::Float(b.powf(e))))
                }
            }
        }
    }

    pub fn neg(&self) -> Real {
        match self {
            Real::Int(n) => Real::Int(-n),
            Real::Rational(r) => Real::Rational(-r),
            Real::Float(f) => Real::Float(-f),
        }
    }

    pub fn abs(&self) -> Real {
        match self {
            Real::Int(n) => Real::Int(n.abs()),
            Real::Rational(r) => Real::Rational(r.abs()),
            Real::Float(f) => Real::Float(f.abs()),
        }
    }

    /// `None` only when a NaN is involved.
    pub fn partial_cmp(&self, other: &Real) -> Option<Ordering> {
        match self.promote(other) {
            Promoted::Int(a, b) => Some(a.cmp(&b)),
            Promoted::Rational(a, b) => Some(a.cmp(&b)),
            Promoted::Float(a, b) => a.partial_cmp(&b),
        }
    }

    /// Numeric equality across the tower (`1 == 1.0`).
    pub fn num_eq(&self, other: &Real) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

fn exponent_u32(e: &BigInt) -> EvalResult<u32> {
    e.abs()
        .to_u32()
        .ok_or_else(|| invalid_argument("^", format!("exponent {e} is too large")))
}

fn int_pow(base: &BigInt, e: &BigInt) -> EvalResult<Real> {
    // Powers of 0, 1 and -1 are cheap for any exponent.
    if base.is_zero() || base.abs().is_one() {
        let odd = e.is_odd();
        let result = if base.is_zero() {
            if e.is_negative() {
                return Err(division_by_zero());
            }
            if e.is_zero() {
                BigInt::one()
            } else {
                BigInt::zero()
            }
        } else if base.is_negative() && odd {
            -BigInt::one()
        } else {
            BigInt::one()
        };
        return Ok(if e.is_negative() {
            Real::Rational(BigRational::from_integer(result))
        } else {
            Real::Int(result)
        });
    }
    let n = exponent_u32(e)?;
    let power = base.pow(n);
    if e.is_negative() {
        Ok(Real::Rational(BigRational::new(BigInt::one(), power)))
    } else {
        Ok(Real::Int(power))
    }
}

fn rational_pow(base: &BigRational, e: &BigInt) -> EvalResult<Real> {
    let n = exponent_u32(e)?;
    let numer = base.numer().pow(n);
    let denom = base.denom().pow(n);
    if e.is_negative() {
        if numer.is_zero() {
            return Err(division_by_zero());
        }
        Ok(Real::Rational(BigRational::new(denom, numer)))
    } else {
        Ok(Real::Rational(BigRational::new(numer, denom)))
    }
}

/// A complex number whose parts are reals.
#[derive(Clone, Debug, PartialEq)]
pub struct ComplexValue {
    pub re: Real,
    pub im: Real,
}

impl ComplexValue {
    pub fn new(re: Real, im: Real) -> Self {
        ComplexValue { re, im }
    }

    /// The imaginary unit with integer parts.
    pub fn i() -> Self {
        ComplexValue::new(Real::Int(BigInt::zero()), Real::Int(BigInt::one()))
    }

    pub fn from_real(re: Real) -> Self {
        ComplexValue::new(re, Real::Int(BigInt::zero()))
    }

    pub fn from_c64(c: Complex64) -> Self {
        ComplexValue::new(Real::Float(c.re), Real::Float(c.im))
    }

    pub fn to_c64(&self) -> Complex64 {
        Complex64::new(self.re.to_f64(), self.im.to_f64())
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    pub fn add(&self, other: &ComplexValue) -> ComplexValue {
        ComplexValue::new(self.re.add(&other.re), self.im.add(&other.im))
    }

    pub fn sub(&self, other: &ComplexValue) -> ComplexValue {
        ComplexValue::new(self.re.sub(&other.re), self.im.sub(&other.im))
    }

    pub fn mul(&self, other: &ComplexValue) -> ComplexValue {
        let re = self.re.mul(&other.re).sub(&self.im.mul(&other.im));
        let im = self.re.mul(&other.im).add(&self.im.mul(&other.re));
        ComplexValue::new(re, im)
    }

    /// Exact where the parts allow it.
    pub fn div(&self, other: &ComplexValue) -> EvalResult<ComplexValue> {
        let denom = other.re.mul(&other.re).add(&other.im.mul(&other.im));
        let re = self.re.mul(&other.re).add(&self.im.mul(&other.im));
        let im = self.im.mul(&other.re).sub(&self.re.mul(&other.im));
        Ok(ComplexValue::new(re.quo(&denom)?, im.quo(&denom)?))
    }

    pub fn neg(&self) -> ComplexValue {
        ComplexValue::new(self.re.neg(), self.im.neg())
    }

    /// Magnitude, always a float.
    pub fn abs(&self) -> f64 {
        self.re.to_f64().hypot(self.im.to_f64())
    }

    pub fn pow(&self, exponent: &Number) -> EvalResult<ComplexValue> {
        if let Number::Real(Real::Int(e)) = exponent {
            let n = exponent_u32(e)?;
            let mut result = ComplexValue::from_real(Real::Int(BigInt::one()));
            let mut base = self.clone();
            let mut bits = n;
            while bits > 0 {
                if bits & 1 == 1 {
                    result = result.mul(&base);
                }
                base = base.mul(&base);
                bits >>= 1;
            }
            if e.is_negative() {
                let one = ComplexValue::from_real(Real::Int(BigInt::one()));
                return one.div(&result);
            }
            return Ok(result);
        }
        let e = match exponent {
            Number::Real(r) => Complex64::new(r.to_f64(), 0.0),
            Number::Complex(c) => c.to_c64(),
        };
        Ok(ComplexValue::from_c64(self.to_c64().powc(e)))
    }

    pub fn num_eq(&self, other: &ComplexValue) -> bool {
        self.re.num_eq(&other.re) && self.im.num_eq(&other.im)
    }
}

/// Any member of the tower.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Real(Real),
    Complex(ComplexValue),
}

/// Both operands real, or both widened to complex.
enum Operands<'a> {
    Real(&'a Real, &'a Real),
    Complex(ComplexValue, ComplexValue),
}

impl Number {
    fn widen(&self) -> ComplexValue {
        match self {
            Number::Real(r) => ComplexValue::from_real(r.clone()),
            Number::Complex(c) => c.clone(),
        }
    }

    fn operands<'a>(&'a self, other: &'a Number) -> Operands<'a> {
        match (self, other) {
            (Number::Real(a), Number::Real(b)) => Operands::Real(a, b),
            _ => Operands::Complex(self.widen(), other.widen()),
        }
    }

    pub fn as_real(&self) -> Option<&Real> {
        match self {
            Number::Real(r) => Some(r),
            Number::Complex(_) => None,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Real(r) => r.is_zero(),
            Number::Complex(c) => c.is_zero(),
        }
    }

    pub fn add(&self, other: &Number) -> Number {
        match self.operands(other) {
            Operands::Real(a, b) => Number::Real(a.add(b)),
            Operands::Complex(a, b) => Number::Complex(a.add(&b)),
        }
    }

    pub fn sub(&self, other: &Number) -> Number {
        match self.operands(other) {
            Operands::Real(a, b) => Number::Real(a.sub(b)),
            Operands::Complex(a, b) => Number::Complex(a.sub(&b)),
        }
    }

    pub fn mul(&self, other: &Number) -> Number {
        match self.operands(other) {
            Operands::Real(a, b) => Number::Real(a.mul(b)),
            Operands::Complex(a, b) => Number::Complex(a.mul(&b)),
        }
    }

    pub fn div(&self, other: &Number) -> EvalResult<Number> {
        match self.operands(other) {
            Operands::Real(a, b) => a.div(b).map(Number::Real),
            Operands::Complex(a, b) => a.div(&b).map(Number::Complex),
        }
    }

    pub fn rem(&self, other: &Number) -> EvalResult<Number> {
        match self.operands(other) {
            Operands::Real(a, b) => a.rem(b).map(Number::Real),
            Operands::Complex(..) => Err(invalid_argument("%", "complex numbers have no modulo")),
        }
    }

    pub fn pow(&self, exponent: &Number) -> EvalResult<Number> {
        match (self, exponent) {
            (Number::Real(b), Number::Real(e)) => b.pow(e),
            (Number::Complex(b), e) => b.pow(e).map(Number::Complex),
            (Number::Real(b), Number::Complex(e)) => {
                let c = Complex64::new(b.to_f64(), 0.0).powc(e.to_c64());
                Ok(Number::Complex(ComplexValue::from_c64(c)))
            }
        }
    }

    pub fn neg(&self) -> Number {
        match self {
            Number::Real(r) => Number::Real(r.neg()),
            Number::Complex(c) => Number::Complex(c.neg()),
        }
    }

    /// Absolute value; the magnitude for complex numbers.
    pub fn abs(&self) -> Real {
        match self {
            Number::Real(r) => r.abs(),
            Number::Complex(c) => Real::Float(c.abs()),
        }
    }

    pub fn num_eq(&self, other: &Number) -> bool {
        match self.operands(other) {
            Operands::Real(a, b) => a.num_eq(b),
            Operands::Complex(a, b) => a.num_eq(&b),
        }
    }
}
