//! Sparse univariate integer polynomials
//!
//! A polynomial is a map from exponent to non-zero coefficient. Every
//! constructor and arithmetic operation drops zero coefficients, so equality
//! is structural.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Pow, Signed, Zero};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoppersmithError, CoppersmithResult};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IntPoly {
    terms: BTreeMap<u32, BigInt>,
}

impl IntPoly {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::monomial(0, BigInt::one())
    }

    /// `c * x^k`
    pub fn monomial(k: u32, c: BigInt) -> Self {
        let mut p = Self::zero();
        p.add_term(k, c);
        p
    }

    /// From ascending coefficients `[c0, c1, ...]` meaning `c0 + c1 x + ...`
    pub fn from_coeffs(coeffs: &[BigInt]) -> Self {
        let terms = coeffs
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_zero())
            .map(|(i, c)| (i as u32, c.clone()))
            .collect();
        Self { terms }
    }

    /// Dense ascending coefficients; the zero polynomial is `[0]`
    pub fn to_coeffs(&self) -> Vec<BigInt> {
        match self.degree() {
            None => vec![BigInt::zero()],
            Some(d) => (0..=d).map(|k| self.coeff(k)).collect(),
        }
    }

    /// Degree, or `None` for the zero polynomial
    pub fn degree(&self) -> Option<u32> {
        self.terms.keys().next_back().copied()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn coeff(&self, k: u32) -> BigInt {
        self.terms.get(&k).cloned().unwrap_or_else(BigInt::zero)
    }

    pub fn terms(&self) -> impl Iterator<Item = (u32, &BigInt)> {
        self.terms.iter().map(|(k, c)| (*k, c))
    }

    fn add_term(&mut self, k: u32, c: BigInt) {
        if c.is_zero() {
            return;
        }
        let slot = self.terms.entry(k).or_insert_with(BigInt::zero);
        *slot += c;
        if slot.is_zero() {
            self.terms.remove(&k);
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (k, c) in &other.terms {
            out.add_term(*k, c.clone());
        }
        out
    }

    pub fn sub(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for (k, c) in &other.terms {
            out.add_term(*k, -c);
        }
        out
    }

    pub fn mul(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        for (i, a) in &self.terms {
            for (j, b) in &other.terms {
                out.add_term(i + j, a * b);
            }
        }
        out
    }

    /// `self * x^k`
    pub fn mul_xk(&self, k: u32) -> Self {
        let terms = self.terms.iter().map(|(i, c)| (i + k, c.clone())).collect();
        Self { terms }
    }

    pub fn scale(&self, c: &BigInt) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        let terms = self.terms.iter().map(|(i, a)| (*i, a * c)).collect();
        Self { terms }
    }

    /// `self^e` by binary exponentiation; `p^0 = 1` for every p
    pub fn pow(&self, e: u32) -> Self {
        let mut out = Self::one();
        let mut base = self.clone();
        let mut e = e;
        while e > 0 {
            if e & 1 == 1 {
                out = out.mul(&base);
            }
            e >>= 1;
            if e > 0 {
                base = base.mul(&base);
            }
        }
        out
    }

    pub fn eval(&self, x: &BigInt) -> BigInt {
        self.terms
            .iter()
            .fold(BigInt::zero(), |acc, (k, c)| acc + c * Pow::pow(x, *k))
    }

    /// Coefficients reduced into [0, m)
    pub fn mod_poly(&self, m: &BigInt) -> CoppersmithResult<Self> {
        if !m.is_positive() {
            return Err(CoppersmithError::NonPositiveModulus(m.clone()));
        }
        let terms = self
            .terms
            .iter()
            .map(|(k, c)| (*k, c.mod_floor(m)))
            .filter(|(_, c)| !c.is_zero())
            .collect();
        Ok(Self { terms })
    }
}

impl fmt::Display for IntPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (n, (k, c)) in self.terms.iter().rev().enumerate() {
            if n > 0 {
                write!(f, " + ")?;
            }
            match k {
                0 => write!(f, "{}", c)?,
                1 => write!(f, "{}*x", c)?,
                _ => write!(f, "{}*x^{}", c, k)?,
            }
        }
        Ok(())
    }
}
