//! Exact rational numbers
//!
//! Numerator/denominator pairs over `BigInt`, always kept in lowest terms with a
//! positive denominator. Every Gram–Schmidt coefficient, every unscaled lattice
//! coefficient and every interpolation weight goes through this type.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::CoppersmithError;

/// Exact rational number (numerator / denominator)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rational {
    pub numerator: BigInt,
    pub denominator: BigInt,
}

impl Rational {
    /// Create a rational from numerator and denominator, reduced to lowest terms.
    ///
    /// The denominator must be non-zero.
    pub fn new(num: BigInt, den: BigInt) -> Self {
        debug_assert!(!den.is_zero(), "zero denominator");
        let mut r = Self {
            numerator: num,
            denominator: den,
        };
        r.reduce();
        r
    }

    pub fn from_int<T: Into<BigInt>>(n: T) -> Self {
        Self {
            numerator: n.into(),
            denominator: BigInt::one(),
        }
    }

    pub fn from_bigint(n: BigInt) -> Self {
        Self::from_int(n)
    }

    /// `num / den` from machine integers, handy for δ values
    pub fn ratio(num: i64, den: i64) -> Self {
        Self::new(BigInt::from(num), BigInt::from(den))
    }

    pub fn zero() -> Self {
        Self::from_int(0)
    }

    pub fn one() -> Self {
        Self::from_int(1)
    }

    pub fn is_zero(&self) -> bool {
        self.numerator.is_zero()
    }

    pub fn is_integer(&self) -> bool {
        self.denominator.is_one()
    }

    /// Largest integer not above this value
    pub fn floor(&self) -> BigInt {
        self.numerator.div_floor(&self.denominator)
    }

    /// Nearest integer, ties to the even neighbour
    pub fn round(&self) -> BigInt {
        let floor = self.floor();
        let frac = self - &Rational::from(&floor);
        match frac.cmp(&Rational::ratio(1, 2)) {
            Ordering::Less => floor,
            Ordering::Greater => floor + BigInt::one(),
            Ordering::Equal if floor.is_even() => floor,
            Ordering::Equal => floor + BigInt::one(),
        }
    }

    pub fn abs(&self) -> Self {
        Self {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
        }
    }

    pub fn square(&self) -> Self {
        Self {
            numerator: &self.numerator * &self.numerator,
            denominator: &self.denominator * &self.denominator,
        }
    }

    /// Multiply by an integer without building an intermediate rational
    pub fn scale(&self, k: &BigInt) -> Self {
        Self::new(&self.numerator * k, self.denominator.clone())
    }

    fn reduce(&mut self) {
        if self.numerator.is_zero() {
            self.denominator = BigInt::one();
            return;
        }

        let g = self.numerator.gcd(&self.denominator);
        if !g.is_one() {
            self.numerator = &self.numerator / &g;
            self.denominator = &self.denominator / &g;
        }

        if self.denominator.is_negative() {
            self.numerator = -&self.numerator;
            self.denominator = -&self.denominator;
        }
    }
}

impl Default for Rational {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator.is_one() {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

/// Parses `n` or `n/d`; a zero denominator is rejected
impl FromStr for Rational {
    type Err = CoppersmithError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || CoppersmithError::InvalidRational(s.to_string());
        let parse = |t: &str| BigInt::from_str(t.trim()).map_err(|_| bad());
        match s.split_once('/') {
            Some((num, den)) => {
                let den = parse(den)?;
                if den.is_zero() {
                    return Err(bad());
                }
                Ok(Self::new(parse(num)?, den))
            }
            None => parse(s).map(Self::from_int),
        }
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self::from_int(n)
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Self::from_int(n)
    }
}

impl From<&BigInt> for Rational {
    fn from(n: &BigInt) -> Self {
        Self::from_int(n.clone())
    }
}

impl Ord for Rational {
    fn cmp(&self, other: &Self) -> Ordering {
        // Denominators are positive, so cross-multiplication keeps the order.
        (&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator))
    }
}

impl PartialOrd for Rational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, other: Self) -> Rational {
        if self.denominator == other.denominator {
            return Rational::new(&self.numerator + &other.numerator, self.denominator.clone());
        }
        let num = &self.numerator * &other.denominator + &other.numerator * &self.denominator;
        let den = &self.denominator * &other.denominator;
        Rational::new(num, den)
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        &self + &other
    }
}

impl Sub for &Rational {
    type Output = Rational;

    fn sub(self, other: Self) -> Rational {
        if self.denominator == other.denominator {
            return Rational::new(&self.numerator - &other.numerator, self.denominator.clone());
        }
        let num = &self.numerator * &other.denominator - &other.numerator * &self.denominator;
        let den = &self.denominator * &other.denominator;
        Rational::new(num, den)
    }
}

impl Sub for Rational {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        &self - &other
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, other: Self) -> Rational {
        let num = &self.numerator * &other.numerator;
        let den = &self.denominator * &other.denominator;
        Rational::new(num, den)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        &self * &other
    }
}

impl Div for &Rational {
    type Output = Rational;

    /// Panics in debug builds when dividing by zero; callers guard zero divisors.
    fn div(self, other: Self) -> Rational {
        let num = &self.numerator * &other.denominator;
        let den = &self.denominator * &other.numerator;
        Rational::new(num, den)
    }
}

impl Div for Rational {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        &self / &other
    }
}

impl Neg for Rational {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            numerator: -self.numerator,
            denominator: self.denominator,
        }
    }
}

impl Neg for &Rational {
    type Output = Rational;

    fn neg(self) -> Rational {
        Rational {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rational_arithmetic() {
        let a = Rational::ratio(1, 2);
        let b = Rational::ratio(1, 3);

        assert_eq!(&a + &b, Rational::ratio(5, 6));
        assert_eq!(&a - &b, Rational::ratio(1, 6));
        assert_eq!(&a * &b, Rational::ratio(1, 6));
        assert_eq!(&a / &b, Rational::ratio(3, 2));
        assert_eq!(-a, Rational::ratio(-1, 2));
    }

    #[test]
    fn test_rational_reduction() {
        assert_eq!(Rational::ratio(4, 8), Rational::ratio(1, 2));
        let r = Rational::ratio(3, -6);
        assert_eq!(r.numerator, BigInt::from(-1));
        assert_eq!(r.denominator, BigInt::from(2));
        assert_eq!(Rational::ratio(0, -5), Rational::zero());
    }

    #[test]
    fn test_round_ties_to_even() {
        assert_eq!(Rational::ratio(1, 2).round(), BigInt::from(0));
        assert_eq!(Rational::ratio(3, 2).round(), BigInt::from(2));
        assert_eq!(Rational::ratio(5, 2).round(), BigInt::from(2));
        assert_eq!(Rational::ratio(-1, 2).round(), BigInt::from(0));
        assert_eq!(Rational::ratio(-3, 2).round(), BigInt::from(-2));
        assert_eq!(Rational::ratio(-5, 2).round(), BigInt::from(-2));
        assert_eq!(Rational::from_int(-4).round(), BigInt::from(-4));
        assert_eq!(Rational::ratio(7, 3).round(), BigInt::from(2));
        assert_eq!(Rational::ratio(-7, 3).round(), BigInt::from(-2));
        assert_eq!(Rational::ratio(5, 3).round(), BigInt::from(2));
    }

    #[test]
    fn test_floor_and_ordering() {
        assert_eq!(Rational::ratio(-7, 2).floor(), BigInt::from(-4));
        assert!(Rational::ratio(1, 4) < Rational::ratio(1, 3));
        assert!(Rational::ratio(-1, 2) < Rational::zero());
        assert_eq!(Rational::ratio(3, 4).max(Rational::ratio(2, 3)), Rational::ratio(3, 4));
    }

    #[test]
    fn test_parse() {
        assert_eq!("3/4".parse::<Rational>().unwrap(), Rational::ratio(3, 4));
        assert_eq!(" -6/8 ".parse::<Rational>().unwrap(), Rational::ratio(-3, 4));
        assert_eq!("1".parse::<Rational>().unwrap(), Rational::one());
        assert_eq!(
            "1/0".parse::<Rational>(),
            Err(CoppersmithError::InvalidRational("1/0".to_string()))
        );
        assert!("a/b".parse::<Rational>().is_err());
        assert!("".parse::<Rational>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rational::ratio(6, 3).to_string(), "2");
        assert_eq!(Rational::ratio(-3, 4).to_string(), "-3/4");
    }
}
