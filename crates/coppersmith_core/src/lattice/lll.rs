//! LLL Lattice Reduction Algorithm
//!
//! Given a basis B = [b_0, ..., b_{n-1}], LLL produces a δ-reduced basis satisfying:
//! 1. **Size reduction**: |μ_ij| ≤ 1/2 for all j < i
//! 2. **Lovász condition**: ||b*_k||² ≥ (δ − μ_{k,k-1}²) ||b*_{k-1}||²
//!
//! All Gram-Schmidt data is exact rational; the output is the integer basis the
//! row operations produced. Gram-Schmidt is recomputed from scratch after every
//! row mutation rather than updated incrementally, and there is no iteration cap:
//! termination follows from 1/4 < δ ≤ 1.

use num_bigint::BigInt;
use num_traits::Zero;
use std::time::Instant;
use tracing::{debug, trace};

use super::basis::LatticeBasis;
use super::gram_schmidt::GramSchmidt;
use crate::config::LLLConfig;
use crate::error::CoppersmithResult;
use crate::rational::Rational;

/// Statistics from LLL execution
#[derive(Debug, Clone, Default)]
pub struct LLLStats {
    /// Number of size reductions that changed a row
    pub size_reductions: usize,
    pub swaps: usize,
    /// Total iterations of the main loop
    pub iterations: usize,
    /// Full Gram-Schmidt recomputations
    pub gs_recomputations: usize,
    /// Time spent in Gram-Schmidt (seconds)
    pub gs_time: f64,
    pub total_time: f64,
}

/// LLL lattice reduction algorithm
pub struct LLL;

impl LLL {
    /// Reduce a lattice basis using the LLL algorithm
    ///
    /// # Arguments
    /// * `basis` - The input lattice basis (left untouched)
    /// * `config` - LLL configuration parameters
    ///
    /// # Returns
    /// The reduced basis and execution statistics
    pub fn reduce(basis: &LatticeBasis, config: &LLLConfig) -> CoppersmithResult<(LatticeBasis, LLLStats)> {
        config.validate()?;

        let start = Instant::now();
        let mut stats = LLLStats::default();

        let mut b = basis.clone();
        let n = b.n;

        if n <= 1 {
            stats.total_time = start.elapsed().as_secs_f64();
            return Ok((b, stats));
        }

        let mut gs = Self::recompute(&b, &mut stats);
        let mut k = 1usize;

        while k < n {
            stats.iterations += 1;

            if Self::size_reduce(&mut b, &mut gs, k, k - 1, &mut stats) {
                gs = Self::recompute(&b, &mut stats);
            }

            if gs.check_lovasz(k, &config.delta) {
                for j in (0..k - 1).rev() {
                    Self::size_reduce(&mut b, &mut gs, k, j, &mut stats);
                }
                k += 1;
            } else {
                b.swap(k, k - 1);
                gs = Self::recompute(&b, &mut stats);
                stats.swaps += 1;
                k = if k > 1 { k - 1 } else { 1 };
            }

            if stats.iterations % 1000 == 0 {
                trace!(
                    iterations = stats.iterations,
                    k,
                    swaps = stats.swaps,
                    reductions = stats.size_reductions,
                    "LLL progress"
                );
            }
        }

        stats.total_time = start.elapsed().as_secs_f64();
        debug!(
            n,
            m = b.m,
            iterations = stats.iterations,
            swaps = stats.swaps,
            reductions = stats.size_reductions,
            secs = stats.total_time,
            "LLL completed"
        );

        Ok((b, stats))
    }

    fn recompute(basis: &LatticeBasis, stats: &mut LLLStats) -> GramSchmidt {
        let gs_start = Instant::now();
        let gs = GramSchmidt::compute(basis);
        stats.gs_time += gs_start.elapsed().as_secs_f64();
        stats.gs_recomputations += 1;
        gs
    }

    /// Size reduction: b_k = b_k - round(μ_kj) * b_j.
    ///
    /// Returns whether row k changed. μ is updated in place; b*_k does not move.
    fn size_reduce(
        basis: &mut LatticeBasis,
        gs: &mut GramSchmidt,
        k: usize,
        j: usize,
        stats: &mut LLLStats,
    ) -> bool {
        let q: BigInt = gs.get_mu(k, j).round();
        if q.is_zero() {
            return false;
        }

        basis.reduce_vector(k, j, &q);
        gs.update_size_reduction(k, j, &q);
        stats.size_reductions += 1;
        true
    }

    /// Check if a basis is LLL-reduced
    pub fn is_reduced(basis: &LatticeBasis, config: &LLLConfig) -> bool {
        let gs = GramSchmidt::compute(basis);
        let n = basis.n;

        for i in 1..n {
            for j in 0..i {
                if gs.needs_size_reduction(i, j) {
                    return false;
                }
            }
        }

        (1..n).all(|k| gs.check_lovasz(k, &config.delta))
    }
}

/// Reduce an integer matrix (rows are basis vectors) with Lovász parameter `delta`.
///
/// The input is not modified. Rows of unequal length and δ outside (1/4, 1] are errors.
pub fn reduce(rows: &[Vec<BigInt>], delta: &Rational) -> CoppersmithResult<Vec<Vec<BigInt>>> {
    let config = LLLConfig::with_delta(delta.clone())?;
    let basis = LatticeBasis::new(rows.to_vec())?;
    let (reduced, _) = LLL::reduce(&basis, &config)?;
    Ok(reduced.into_rows())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::determinant::Determinant;
    use crate::error::CoppersmithError;
    use crate::matrix::Matrix;
    use num_traits::Signed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn det(basis: &LatticeBasis) -> BigInt {
        let flat: Vec<BigInt> = basis.vectors.iter().flatten().cloned().collect();
        Determinant::bareiss(&Matrix::from_flat(flat, basis.n, basis.m)).unwrap()
    }

    /// Rows sorted after fixing the sign of each row's first non-zero entry
    fn canonical(rows: &[Vec<BigInt>]) -> Vec<Vec<BigInt>> {
        let mut out: Vec<Vec<BigInt>> = rows
            .iter()
            .map(|r| match r.iter().find(|x| !x.is_zero()) {
                Some(lead) if lead.is_negative() => r.iter().map(|x| -x).collect(),
                _ => r.clone(),
            })
            .collect();
        out.sort();
        out
    }

    #[test]
    fn test_lll_simple() {
        let basis = LatticeBasis::from_rows(&[vec![1i64, 1], vec![0, 1]]).unwrap();

        let config = LLLConfig::default();
        let (reduced, _) = LLL::reduce(&basis, &config).unwrap();

        assert!(LLL::is_reduced(&reduced, &config));
        assert_eq!(det(&reduced).abs(), BigInt::from(1));
    }

    #[test]
    fn test_lll_textbook_example() {
        let basis = LatticeBasis::from_rows(&[vec![1i64, 1, 1], vec![-1, 0, 2], vec![3, 5, 6]]).unwrap();

        let config = LLLConfig::default();
        let (reduced, stats) = LLL::reduce(&basis, &config).unwrap();

        assert!(LLL::is_reduced(&reduced, &config));
        assert_eq!(
            reduced.vectors,
            vec![
                vec![BigInt::from(0), BigInt::from(1), BigInt::from(0)],
                vec![BigInt::from(1), BigInt::from(0), BigInt::from(1)],
                vec![BigInt::from(-1), BigInt::from(0), BigInt::from(2)],
            ]
        );
        assert!(stats.swaps > 0);
        assert_eq!(det(&reduced).abs(), det(&basis).abs());
    }

    #[test]
    fn test_lll_identity() {
        let basis = LatticeBasis::from_rows(&[vec![1i64, 0, 0], vec![0, 1, 0], vec![0, 0, 1]]).unwrap();

        let config = LLLConfig::default();
        let (reduced, stats) = LLL::reduce(&basis, &config).unwrap();

        assert_eq!(stats.swaps, 0);
        assert_eq!(reduced, basis);
    }

    #[test]
    fn test_empty_and_single_row() {
        let empty = LatticeBasis::new(Vec::new()).unwrap();
        let (reduced, stats) = LLL::reduce(&empty, &LLLConfig::default()).unwrap();
        assert!(reduced.is_empty());
        assert_eq!(stats.iterations, 0);

        let single = LatticeBasis::from_rows(&[vec![4i64, -7]]).unwrap();
        let (reduced, _) = LLL::reduce(&single, &LLLConfig::default()).unwrap();
        assert_eq!(reduced, single);
    }

    #[test]
    fn test_dependent_rows_terminate() {
        // rank-deficient input: one row must collapse to zero
        let basis = LatticeBasis::from_rows(&[vec![2i64, 4, 6], vec![1, 2, 3], vec![1, 0, 1]]).unwrap();
        let (reduced, _) = LLL::reduce(&basis, &LLLConfig::default()).unwrap();

        let zero_rows = reduced
            .vectors
            .iter()
            .filter(|r| r.iter().all(|x| x.is_zero()))
            .count();
        assert_eq!(zero_rows, 1);
    }

    #[test]
    fn test_non_square_basis() {
        let basis = LatticeBasis::from_rows(&[vec![1i64, 2, 3, 4], vec![5, 6, 7, 8]]).unwrap();
        let config = LLLConfig::default();
        let (reduced, _) = LLL::reduce(&basis, &config).unwrap();

        assert_eq!(reduced.n, 2);
        assert_eq!(reduced.m, 4);
        assert!(LLL::is_reduced(&reduced, &config));
        assert!(reduced.norm_squared(0) <= basis.norm_squared(0));
    }

    #[test]
    fn test_lll_random_preserves_lattice() {
        let mut rng = StdRng::seed_from_u64(7);
        for dim in [4usize, 6, 8] {
            let basis = LatticeBasis::random(dim, dim, 10, &mut rng);
            let config = LLLConfig::default();
            let (reduced, _) = LLL::reduce(&basis, &config).unwrap();

            assert!(LLL::is_reduced(&reduced, &config));
            // unimodular transform: |det| unchanged
            assert_eq!(det(&reduced).abs(), det(&basis).abs());
        }
    }

    #[test]
    fn test_lll_strong_vs_fast() {
        let basis = LatticeBasis::from_rows(&[vec![1i64, 1, 1], vec![-1, 0, 2], vec![3, 5, 6]]).unwrap();

        let fast = LLLConfig::fast();
        let strong = LLLConfig::strong();
        let (reduced_fast, _) = LLL::reduce(&basis, &fast).unwrap();
        let (reduced_strong, _) = LLL::reduce(&basis, &strong).unwrap();

        assert!(LLL::is_reduced(&reduced_fast, &fast));
        assert!(LLL::is_reduced(&reduced_strong, &strong));
    }

    #[test]
    fn test_reduce_entry_point() {
        let rows: Vec<Vec<BigInt>> = vec![
            vec![BigInt::from(201), BigInt::from(37)],
            vec![BigInt::from(1648), BigInt::from(297)],
        ];
        let reduced = reduce(&rows, &Rational::ratio(3, 4)).unwrap();

        // input untouched
        assert_eq!(rows[0][0], BigInt::from(201));

        let basis = LatticeBasis::new(reduced.clone()).unwrap();
        assert!(LLL::is_reduced(&basis, &LLLConfig::default()));
        assert_eq!(det(&basis).abs(), BigInt::from(1279));
        assert_eq!(basis.vectors[0], vec![BigInt::from(1), BigInt::from(32)]);

        // reducing again changes nothing beyond order and sign
        let again = reduce(&reduced, &Rational::ratio(3, 4)).unwrap();
        assert_eq!(canonical(&again), canonical(&reduced));
    }

    #[test]
    fn test_tie_rounds_to_even() {
        // μ_10 = 1/2 exactly: the tie rounds to 0 and (1, 1) is swapped up unchanged
        let rows = vec![
            vec![BigInt::from(2), BigInt::from(0)],
            vec![BigInt::from(1), BigInt::from(1)],
        ];
        let reduced = reduce(&rows, &Rational::ratio(3, 4)).unwrap();
        assert_eq!(
            reduced,
            vec![
                vec![BigInt::from(1), BigInt::from(1)],
                vec![BigInt::from(1), BigInt::from(-1)],
            ]
        );
    }

    #[test]
    fn test_reduce_rejects_bad_input() {
        let rows = vec![vec![BigInt::from(1)], vec![BigInt::from(1), BigInt::from(2)]];
        assert!(matches!(
            reduce(&rows, &Rational::ratio(3, 4)),
            Err(CoppersmithError::RaggedBasis { .. })
        ));

        let rows = vec![vec![BigInt::from(1)]];
        assert!(matches!(
            reduce(&rows, &Rational::ratio(1, 5)),
            Err(CoppersmithError::InvalidDelta(_))
        ));
    }
}
