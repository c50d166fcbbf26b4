//! Sparse bivariate polynomials in x and y
//!
//! [`BivarPoly`] carries integer coefficients and is what the bivariate lattice
//! is built from. [`RationalBivar`] is what comes back out of a reduced row
//! after the X^i Y^j column scaling is undone.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Pow, Zero};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{CoppersmithError, CoppersmithResult};
use crate::rational::Rational;

/// Integer polynomial `Σ c_ij x^i y^j`, keyed by `(i, j)`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BivarPoly {
    terms: BTreeMap<(u32, u32), BigInt>,
}

impl BivarPoly {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn one() -> Self {
        Self::monomial(0, 0, BigInt::one())
    }

    pub fn monomial(ix: u32, iy: u32, c: BigInt) -> Self {
        let mut p = Self::zero();
        p.add_term(ix, iy, c);
        p
    }

    /// Build from `(ix, iy, c)` triples; repeated exponents accumulate.
    ///
    /// Exponents arrive signed from parsers, so a negative one is rejected here.
    pub fn from_terms<I>(terms: I) -> CoppersmithResult<Self>
    where
        I: IntoIterator<Item = (i64, i64, BigInt)>,
    {
        let mut p = Self::zero();
        for (ix, iy, c) in terms {
            let ix = u32::try_from(ix).map_err(|_| CoppersmithError::NegativeExponent(ix))?;
            let iy = u32::try_from(iy).map_err(|_| CoppersmithError::NegativeExponent(iy))?;
            p.add_term(ix, iy, c);
        }
        Ok(p)
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn coeff(&self, ix: u32, iy: u32) -> BigInt {
        self.terms.get(&(ix, iy)).cloned().unwrap_or_else(BigInt::zero)
    }

    pub fn terms(&self) -> impl Iterator<Item = ((u32, u32), &BigInt)> {
        self.terms.iter().map(|(k, c)| (*k, c))
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    fn add_term(&mut self, ix: u32, iy: u32, c: BigInt) {
        if c.is_zero() {
            return;
        }
        let slot = self.terms.entry((ix, iy)).or_insert_with(BigInt::zero);
        *slot += c;
        if slot.is_zero() {
            self.terms.remove(&(ix, iy));
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        let mut out = self.clone();
        for ((ix, iy), c) in &other.terms {
            out.add_term(*ix, *iy, c.clone());
        }
        out
    }

    pub fn scale(&self, c: &BigInt) -> Self {
        if c.is_zero() {
            return Self::zero();
        }
        let terms = self.terms.iter().map(|(k, a)| (*k, a * c)).collect();
        Self { terms }
    }

    pub fn mul(&self, other: &Self) -> Self {
        let mut out = Self::zero();
        for ((ax, ay), a) in &self.terms {
            for ((bx, by), b) in &other.terms {
                out.add_term(ax + bx, ay + by, a * b);
            }
        }
        out
    }

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

    /// `self * x^k`
    pub fn shift_x(&self, k: u32) -> Self {
        let terms = self.terms.iter().map(|((ix, iy), c)| ((ix + k, *iy), c.clone())).collect();
        Self { terms }
    }

    /// `self * y^k`
    pub fn shift_y(&self, k: u32) -> Self {
        let terms = self.terms.iter().map(|((ix, iy), c)| ((*ix, iy + k), c.clone())).collect();
        Self { terms }
    }

    pub fn degree_x(&self) -> Option<u32> {
        self.terms.keys().map(|(ix, _)| *ix).max()
    }

    pub fn degree_y(&self) -> Option<u32> {
        self.terms.keys().map(|(_, iy)| *iy).max()
    }

    pub fn eval(&self, x: &BigInt, y: &BigInt) -> BigInt {
        self.terms.iter().fold(BigInt::zero(), |acc, ((ix, iy), c)| {
            acc + c * Pow::pow(x, *ix) * Pow::pow(y, *iy)
        })
    }
}

impl fmt::Display for BivarPoly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.terms.is_empty() {
            return write!(f, "0");
        }
        for (n, ((ix, iy), c)) in self.terms.iter().rev().enumerate() {
            if n > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}", c)?;
            if *ix > 0 {
                write!(f, "*x^{}", ix)?;
            }
            if *iy > 0 {
                write!(f, "*y^{}", iy)?;
            }
        }
        Ok(())
    }
}

/// Rational polynomial `Σ c_ij x^i y^j`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RationalBivar {
    terms: BTreeMap<(u32, u32), Rational>,
}

impl RationalBivar {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Accumulate `c x^ix y^iy`
    pub fn add_term(&mut self, ix: u32, iy: u32, c: Rational) {
        if c.is_zero() {
            return;
        }
        let slot = self.terms.entry((ix, iy)).or_insert_with(Rational::zero);
        *slot = &*slot + &c;
        if slot.is_zero() {
            self.terms.remove(&(ix, iy));
        }
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn coeff(&self, ix: u32, iy: u32) -> Rational {
        self.terms.get(&(ix, iy)).cloned().unwrap_or_else(Rational::zero)
    }

    pub fn terms(&self) -> impl Iterator<Item = ((u32, u32), &Rational)> {
        self.terms.iter().map(|(k, c)| (*k, c))
    }

    pub fn degree_x(&self) -> Option<u32> {
        self.terms.keys().map(|(ix, _)| *ix).max()
    }

    pub fn degree_y(&self) -> Option<u32> {
        self.terms.keys().map(|(_, iy)| *iy).max()
    }

    /// Least common multiple of every coefficient denominator (1 when zero)
    pub fn denominator_lcm(&self) -> BigInt {
        self.terms
            .values()
            .fold(BigInt::one(), |acc, c| acc.lcm(&c.denominator))
    }

    pub fn scale(&self, k: &BigInt) -> Self {
        let mut out = Self::zero();
        for ((ix, iy), c) in &self.terms {
            out.add_term(*ix, *iy, c.scale(k));
        }
        out
    }

    /// Substitute `x = x0`, giving ascending y-coefficients.
    ///
    /// The result has exactly `deg_y + 1` entries even when the top ones
    /// vanish at x0; the zero polynomial gives an empty vector.
    pub fn specialize_x(&self, x0: &BigInt) -> Vec<Rational> {
        let len = match self.degree_y() {
            Some(d) => d as usize + 1,
            None => return Vec::new(),
        };
        let mut out = vec![Rational::zero(); len];
        for ((ix, iy), c) in &self.terms {
            let xk: BigInt = Pow::pow(x0, *ix);
            let slot = &mut out[*iy as usize];
            *slot = &*slot + &c.scale(&xk);
        }
        out
    }

    pub fn eval(&self, x: &BigInt, y: &BigInt) -> Rational {
        self.terms.iter().fold(Rational::zero(), |acc, ((ix, iy), c)| {
            let m: BigInt = Pow::pow(x, *ix) * Pow::pow(y, *iy);
            &acc + &c.scale(&m)
        })
    }
}

impl From<&BivarPoly> for RationalBivar {
    fn from(p: &BivarPoly) -> Self {
        let terms = p.terms.iter().map(|(k, c)| (*k, Rational::from(c))).collect();
        Self { terms }
    }
}
