//! Univariate small roots modulo N
//!
//! For f of degree d the lattice is spanned by the coefficient vectors of
//!
//! ```text
//! N^(m-i) · x^j · f(x)^i     0 ≤ i < m, 0 ≤ j < d
//! x^i · f(x)^m               0 ≤ i < t
//! ```
//!
//! with column k multiplied by X^k. Every one of these vanishes mod N^m at a
//! root of f mod N, so a short enough reduced vector vanishes over the
//! integers at every root with |r| < X.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Pow, Signed, Zero};
use std::collections::BTreeSet;
use tracing::debug;

use crate::config::SearchConfig;
use crate::elimination::primitive_part;
use crate::error::{CoppersmithError, CoppersmithResult};
use crate::lattice::{LatticeBasis, LLL};
use crate::poly::IntPoly;
use crate::rational::Rational;

/// Column-scaled coefficient lattice for one univariate polynomial
#[derive(Debug, Clone)]
pub struct UnivariateLattice {
    pub rows: Vec<Vec<BigInt>>,
    pub x_bound: BigInt,
}

impl UnivariateLattice {
    pub fn construct(f: &IntPoly, modulus: &BigInt, x_bound: &BigInt, m: u32, t: u32) -> Self {
        let d = f.degree().unwrap_or(0);

        let mut polys: Vec<IntPoly> = Vec::new();
        for i in 0..m {
            let layer = f.pow(i).scale(&Pow::pow(modulus, m - i));
            polys.extend((0..d).map(|j| layer.mul_xk(j)));
        }
        let top = f.pow(m);
        polys.extend((0..t).map(|i| top.mul_xk(i)));

        let cols = polys
            .iter()
            .filter_map(IntPoly::degree)
            .max()
            .map_or(1, |deg| deg as usize + 1);

        let rows = polys
            .iter()
            .map(|p| {
                let mut row = vec![BigInt::zero(); cols];
                for (k, c) in p.terms() {
                    row[k as usize] = c * Pow::pow(x_bound, k);
                }
                row
            })
            .collect();

        Self {
            rows,
            x_bound: x_bound.clone(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.rows.first().map_or(0, Vec::len))
    }

    /// Undo the column scaling: coefficient k becomes `row[k] / X^k`
    pub fn unscale_row(&self, row: &[BigInt]) -> Vec<Rational> {
        let mut scale = BigInt::one();
        let mut out = Vec::with_capacity(row.len());
        for c in row {
            out.push(Rational::new(c.clone(), scale.clone()));
            scale *= &self.x_bound;
        }
        out
    }
}

/// Integers r with −bound < r < bound, ascending
pub(crate) fn open_interval(bound: &BigInt) -> impl Iterator<Item = BigInt> {
    let end = bound.clone();
    let mut next: BigInt = -bound + 1;
    std::iter::from_fn(move || {
        if next >= end {
            return None;
        }
        let current = next.clone();
        next += 1;
        Some(current)
    })
}

/// Small roots of `f` mod `modulus` with default search parameters
pub fn find_small_roots_univariate(
    f: &[BigInt],
    modulus: &BigInt,
    x_bound: &BigInt,
    m: u32,
    t: u32,
) -> CoppersmithResult<Vec<BigInt>> {
    find_small_roots_univariate_with(f, modulus, x_bound, m, t, &SearchConfig::default())
}

/// All r with |r| < X and f(r) ≡ 0 (mod N) that the reduced lattice exposes.
///
/// `f` holds ascending coefficients. A non-positive modulus is an error; a
/// non-positive bound or a zero polynomial gives no roots.
pub fn find_small_roots_univariate_with(
    f: &[BigInt],
    modulus: &BigInt,
    x_bound: &BigInt,
    m: u32,
    t: u32,
    config: &SearchConfig,
) -> CoppersmithResult<Vec<BigInt>> {
    if !modulus.is_positive() {
        return Err(CoppersmithError::NonPositiveModulus(modulus.clone()));
    }
    let poly = IntPoly::from_coeffs(f);
    if !x_bound.is_positive() || poly.is_zero() {
        return Ok(Vec::new());
    }

    let lattice = UnivariateLattice::construct(&poly, modulus, x_bound, m, t);
    let (rows, cols) = lattice.dimensions();
    debug!(rows, cols, m, t, "univariate lattice built");

    let basis = LatticeBasis::new(lattice.rows.clone())?;
    let (reduced, stats) = LLL::reduce(&basis, &config.lll)?;
    debug!(swaps = stats.swaps, secs = stats.total_time, "univariate lattice reduced");

    let mut roots = BTreeSet::new();
    for row in reduced.vectors.iter().take(config.candidate_rows) {
        let g = IntPoly::from_coeffs(&primitive_part(&lattice.unscale_row(row)));
        for r in open_interval(x_bound) {
            if g.eval(&r).is_zero() && poly.eval(&r).mod_floor(modulus).is_zero() {
                roots.insert(r);
            }
        }
    }

    debug!(found = roots.len(), "univariate search finished");
    Ok(roots.into_iter().collect())
}
