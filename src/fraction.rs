//! Exact rational numbers for key-matrix inversion.
//!
//! Inverse key cells are kept as normalized numerator/denominator pairs and
//! only converted to `f64` at the edges (rendering and float comparisons), so
//! decryption never inherits rounding error from the adjugate division.

use std::fmt;
use std::ops;

use crate::error::{HillCryptError, Result};

/// A normalized rational number `num / den`.
///
/// Invariants: `den > 0`, `gcd(|num|, den) == 1`, zero is stored as `0/1`,
/// and `num` is never `i128::MIN` (so negation cannot overflow).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: i128,
    den: i128,
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Fraction {
    /// Builds a fraction and reduces it to lowest terms.
    ///
    /// # Errors
    /// Returns [`HillCryptError::DivisionByZero`] if `den == 0`, or
    /// [`HillCryptError::ArithmeticOverflow`] if the reduced numerator or
    /// denominator does not fit in `i128`.
    ///
    /// # Examples
    ///
    /// ```
    /// use hillcrypt::Fraction;
    ///
    /// let half = Fraction::new(-3, -6).unwrap();
    /// assert_eq!(half.numer(), 1);
    /// assert_eq!(half.denom(), 2);
    /// assert!(Fraction::new(1, 0).is_err());
    /// ```
    pub fn new(num: i128, den: i128) -> Result<Self> {
        if den == 0 {
            return Err(HillCryptError::DivisionByZero);
        }
        let g = gcd(num.unsigned_abs(), den.unsigned_abs());
        let n = i128::try_from(num.unsigned_abs() / g)
            .map_err(|_| HillCryptError::ArithmeticOverflow)?;
        let d = i128::try_from(den.unsigned_abs() / g)
            .map_err(|_| HillCryptError::ArithmeticOverflow)?;
        let negative = (num < 0) != (den < 0);
        let n = if negative { -n } else { n };
        Ok(Fraction { num: n, den: d })
    }

    /// Lifts an integer into a fraction with denominator 1.
    pub const fn from_integer(value: i64) -> Self {
        Fraction {
            num: value as i128,
            den: 1,
        }
    }

    pub const fn zero() -> Self {
        Fraction { num: 0, den: 1 }
    }

    pub const fn one() -> Self {
        Fraction { num: 1, den: 1 }
    }

    pub const fn numer(&self) -> i128 {
        self.num
    }

    pub const fn denom(&self) -> i128 {
        self.den
    }

    pub const fn is_zero(&self) -> bool {
        self.num == 0
    }

    pub const fn is_integer(&self) -> bool {
        self.den == 1
    }

    /// Exact sum.
    pub fn checked_add(self, other: Fraction) -> Result<Fraction> {
        let g = gcd(self.den as u128, other.den as u128) as i128;
        let lhs = self
            .num
            .checked_mul(other.den / g)
            .ok_or(HillCryptError::ArithmeticOverflow)?;
        let rhs = other
            .num
            .checked_mul(self.den / g)
            .ok_or(HillCryptError::ArithmeticOverflow)?;
        let num = lhs
            .checked_add(rhs)
            .ok_or(HillCryptError::ArithmeticOverflow)?;
        let den = self
            .den
            .checked_mul(other.den / g)
            .ok_or(HillCryptError::ArithmeticOverflow)?;
        Fraction::new(num, den)
    }

    /// Exact difference.
    pub fn checked_sub(self, other: Fraction) -> Result<Fraction> {
        self.checked_add(-other)
    }

    /// Exact product, cross-reducing before multiplying to delay overflow.
    pub fn checked_mul(self, other: Fraction) -> Result<Fraction> {
        if self.is_zero() || other.is_zero() {
            return Ok(Fraction::zero());
        }
        let g1 = gcd(self.num.unsigned_abs(), other.den as u128) as i128;
        let g2 = gcd(other.num.unsigned_abs(), self.den as u128) as i128;
        let num = (self.num / g1)
            .checked_mul(other.num / g2)
            .ok_or(HillCryptError::ArithmeticOverflow)?;
        let den = (self.den / g2)
            .checked_mul(other.den / g1)
            .ok_or(HillCryptError::ArithmeticOverflow)?;
        Fraction::new(num, den)
    }

    /// Exact quotient.
    ///
    /// # Errors
    /// Returns [`HillCryptError::DivisionByZero`] if `other` is zero.
    pub fn checked_div(self, other: Fraction) -> Result<Fraction> {
        if other.is_zero() {
            return Err(HillCryptError::DivisionByZero);
        }
        self.checked_mul(Fraction::new(other.den, other.num)?)
    }

    /// Converts to `f64`. Zero always maps to `0.0`, never `-0.0`.
    pub fn to_f64(self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        self.num as f64 / self.den as f64
    }

    /// Rounds to the nearest integer, ties away from zero.
    pub fn round(self) -> i128 {
        let quotient = self.num / self.den;
        let remainder = self.num % self.den;
        if remainder.unsigned_abs() * 2 >= self.den as u128 {
            quotient + self.num.signum()
        } else {
            quotient
        }
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::zero()
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Fraction::from_integer(value)
    }
}

impl ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.num)
        } else {
            write!(f, "{}/{}", self.num, self.den)
        }
    }
}
