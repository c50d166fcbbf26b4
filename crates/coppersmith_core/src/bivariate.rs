//! Bivariate small roots modulo N
//!
//! Shifts of `N^(m-i) F^i` and `F^m` are laid out over one shared, sorted set
//! of monomials with column (i, j) scaled by X^i Y^j. The two shortest reduced
//! rows give G1, G2; eliminating y leaves R(x), and every zero of R inside the
//! bound is rechecked against F by brute force over y.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Pow, Signed, Zero};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::bivar::{BivarPoly, RationalBivar};
use crate::config::SearchConfig;
use crate::elimination::{resultant_by_elimination_with, Elimination};
use crate::error::{CoppersmithError, CoppersmithResult};
use crate::lattice::{LatticeBasis, LLL};
use crate::poly::IntPoly;
use crate::rational::Rational;
use crate::univariate::open_interval;

/// Lexicographically sorted monomials (ix, iy) and their column positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnIndex {
    monomials: Vec<(u32, u32)>,
    positions: BTreeMap<(u32, u32), usize>,
}

impl ColumnIndex {
    /// Every monomial that occurs in any of `polys`
    pub fn from_polys(polys: &[BivarPoly]) -> Self {
        let set: BTreeSet<(u32, u32)> = polys
            .iter()
            .flat_map(|p| p.terms().map(|(mono, _)| mono))
            .collect();
        let monomials: Vec<(u32, u32)> = set.into_iter().collect();
        let positions = monomials.iter().enumerate().map(|(i, mono)| (*mono, i)).collect();
        Self {
            monomials,
            positions,
        }
    }

    pub fn len(&self) -> usize {
        self.monomials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.monomials.is_empty()
    }

    pub fn position(&self, mono: (u32, u32)) -> Option<usize> {
        self.positions.get(&mono).copied()
    }

    pub fn monomial(&self, col: usize) -> (u32, u32) {
        self.monomials[col]
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, (u32, u32))> + '_ {
        self.monomials.iter().copied().enumerate()
    }
}

/// Column-scaled lattice for one bivariate polynomial
#[derive(Debug, Clone)]
pub struct BivariateLattice {
    pub rows: Vec<Vec<BigInt>>,
    pub columns: ColumnIndex,
    pub x_bound: BigInt,
    pub y_bound: BigInt,
}

impl BivariateLattice {
    pub fn construct(
        f: &BivarPoly,
        modulus: &BigInt,
        x_bound: &BigInt,
        y_bound: &BigInt,
        m: u32,
        tx: u32,
        ty: u32,
    ) -> Self {
        let sx = f.degree_x().unwrap_or(0).max(1);
        let sy = f.degree_y().unwrap_or(0).max(1);

        let mut polys: Vec<BivarPoly> = Vec::new();
        for i in 0..m {
            let layer = f.pow(i).scale(&Pow::pow(modulus, m - i));
            for ax in 0..sx {
                for ay in 0..sy {
                    polys.push(layer.shift_x(ax).shift_y(ay));
                }
            }
        }
        let top = f.pow(m);
        for ax in 0..tx {
            for ay in 0..ty {
                polys.push(top.shift_x(ax).shift_y(ay));
            }
        }

        let columns = ColumnIndex::from_polys(&polys);
        let rows = polys
            .iter()
            .map(|p| {
                let mut row = vec![BigInt::zero(); columns.len()];
                for ((ix, iy), c) in p.terms() {
                    if let Some(col) = columns.position((ix, iy)) {
                        row[col] = c * Pow::pow(x_bound, ix) * Pow::pow(y_bound, iy);
                    }
                }
                row
            })
            .collect();

        Self {
            rows,
            columns,
            x_bound: x_bound.clone(),
            y_bound: y_bound.clone(),
        }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Undo the column scaling: column (i, j) becomes `row[col] / (X^i Y^j)`
    pub fn unscale_row(&self, row: &[BigInt]) -> RationalBivar {
        let mut out = RationalBivar::zero();
        for (col, (ix, iy)) in self.columns.iter() {
            let c = &row[col];
            if c.is_zero() {
                continue;
            }
            let scale: BigInt = Pow::pow(&self.x_bound, ix) * Pow::pow(&self.y_bound, iy);
            out.add_term(ix, iy, Rational::new(c.clone(), scale));
        }
        out
    }
}

/// Small roots of `f` mod `modulus` with default search parameters
pub fn find_small_roots_bivariate(
    f: &BivarPoly,
    modulus: &BigInt,
    x_bound: &BigInt,
    y_bound: &BigInt,
    m: u32,
    tx: u32,
    ty: u32,
) -> CoppersmithResult<Vec<(BigInt, BigInt)>> {
    find_small_roots_bivariate_with(f, modulus, x_bound, y_bound, m, tx, ty, &SearchConfig::default())
}

/// All (x, y) with |x| < X, |y| < Y and F(x, y) ≡ 0 (mod N) that the two
/// shortest reduced rows expose, sorted.
///
/// A non-positive modulus is an error. Non-positive bounds, a zero F, a lattice
/// with fewer than two rows, or an exhausted elimination give no roots.
#[allow(clippy::too_many_arguments)]
pub fn find_small_roots_bivariate_with(
    f: &BivarPoly,
    modulus: &BigInt,
    x_bound: &BigInt,
    y_bound: &BigInt,
    m: u32,
    tx: u32,
    ty: u32,
    config: &SearchConfig,
) -> CoppersmithResult<Vec<(BigInt, BigInt)>> {
    if !modulus.is_positive() {
        return Err(CoppersmithError::NonPositiveModulus(modulus.clone()));
    }
    if !x_bound.is_positive() || !y_bound.is_positive() || f.is_zero() {
        return Ok(Vec::new());
    }

    let lattice = BivariateLattice::construct(f, modulus, x_bound, y_bound, m, tx, ty);
    let (rows, cols) = lattice.dimensions();
    debug!(rows, cols, m, tx, ty, "bivariate lattice built");

    let basis = LatticeBasis::new(lattice.rows.clone())?;
    let (reduced, stats) = LLL::reduce(&basis, &config.lll)?;
    debug!(swaps = stats.swaps, secs = stats.total_time, "bivariate lattice reduced");

    if reduced.n < 2 {
        debug!(rows = reduced.n, "too few reduced rows to eliminate");
        return Ok(Vec::new());
    }

    let g1 = lattice.unscale_row(reduced.get(0));
    let g2 = lattice.unscale_row(reduced.get(1));

    let r = match resultant_by_elimination_with(&g1, &g2, x_bound, y_bound, &config.elimination) {
        Elimination::Resolved(coeffs) => IntPoly::from_coeffs(&coeffs),
        Elimination::Exhausted { collected, needed } => {
            debug!(collected, needed, "no roots: elimination exhausted");
            return Ok(Vec::new());
        }
    };
    if r.is_zero() {
        debug!("resultant vanishes identically; every x is a candidate");
    }

    let mut roots = BTreeSet::new();
    for x0 in open_interval(x_bound) {
        if !r.eval(&x0).is_zero() {
            continue;
        }
        for y0 in open_interval(y_bound) {
            if f.eval(&x0, &y0).mod_floor(modulus).is_zero() {
                roots.insert((x0.clone(), y0));
            }
        }
    }

    debug!(found = roots.len(), "bivariate search finished");
    Ok(roots.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bivar(terms: &[(i64, i64, i64)]) -> BivarPoly {
        BivarPoly::from_terms(terms.iter().map(|&(ix, iy, c)| (ix, iy, BigInt::from(c)))).unwrap()
    }

    #[test]
    fn test_column_index_sorted() {
        let polys = vec![bivar(&[(1, 0, 1), (0, 2, 1)]), bivar(&[(0, 0, 3), (1, 0, 2)])];
        let cols = ColumnIndex::from_polys(&polys);
        assert_eq!(cols.len(), 3);
        assert_eq!(cols.monomial(0), (0, 0));
        assert_eq!(cols.monomial(1), (0, 2));
        assert_eq!(cols.monomial(2), (1, 0));
        assert_eq!(cols.position((1, 0)), Some(2));
        assert_eq!(cols.position((5, 5)), None);
    }

    #[test]
    fn test_lattice_rows() {
        // F = x + y + 1, N = 5, X = 2, Y = 3, m = 1, tx = ty = 1
        let f = bivar(&[(1, 0, 1), (0, 1, 1), (0, 0, 1)]);
        let lattice = BivariateLattice::construct(
            &f,
            &BigInt::from(5),
            &BigInt::from(2),
            &BigInt::from(3),
            1,
            1,
            1,
        );
        // columns (0,0), (0,1), (1,0)
        assert_eq!(lattice.dimensions(), (2, 3));
        assert_eq!(
            lattice.rows,
            vec![
                vec![BigInt::from(5), BigInt::from(0), BigInt::from(0)],
                vec![BigInt::from(1), BigInt::from(3), BigInt::from(2)],
            ]
        );
    }

    #[test]
    fn test_lattice_row_count() {
        // deg_x = 2, deg_y = 1: each lower layer has 2*1 shifts
        let f = bivar(&[(2, 0, 1), (0, 1, 1), (0, 0, 7)]);
        let lattice = BivariateLattice::construct(
            &f,
            &BigInt::from(101),
            &BigInt::from(4),
            &BigInt::from(4),
            2,
            2,
            2,
        );
        assert_eq!(lattice.rows.len(), 2 * 2 + 4);
    }

    #[test]
    fn test_unscale_row() {
        let f = bivar(&[(1, 0, 1), (0, 1, 1), (0, 0, 1)]);
        let lattice = BivariateLattice::construct(
            &f,
            &BigInt::from(5),
            &BigInt::from(2),
            &BigInt::from(3),
            1,
            1,
            1,
        );
        let g = lattice.unscale_row(&lattice.rows[1]);
        assert_eq!(g, RationalBivar::from(&f));
    }

    #[test]
    fn test_argument_handling() {
        let f = bivar(&[(1, 0, 1), (0, 1, 1)]);
        let one = BigInt::from(1);
        let ten = BigInt::from(10);
        assert_eq!(
            find_small_roots_bivariate(&f, &BigInt::from(-3), &ten, &ten, 1, 1, 1),
            Err(CoppersmithError::NonPositiveModulus(BigInt::from(-3)))
        );
        assert!(find_small_roots_bivariate(&f, &ten, &BigInt::from(0), &ten, 1, 1, 1)
            .unwrap()
            .is_empty());
        assert!(find_small_roots_bivariate(&f, &ten, &ten, &BigInt::from(-1), 1, 1, 1)
            .unwrap()
            .is_empty());
        assert!(find_small_roots_bivariate(&BivarPoly::zero(), &ten, &one, &one, 1, 1, 1)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_single_row_lattice_gives_nothing() {
        // F = 1 with m = 0, tx = ty = 1 has exactly one row
        let f = bivar(&[(0, 0, 1)]);
        let roots =
            find_small_roots_bivariate(&f, &BigInt::from(7), &BigInt::from(3), &BigInt::from(3), 0, 1, 1)
                .unwrap();
        assert!(roots.is_empty());
    }
}
