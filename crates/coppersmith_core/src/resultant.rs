//! Sylvester matrix and integer resultant
//!
//! Polynomials are dense ascending coefficient slices. Degrees are taken from
//! the slice lengths, never from the last non-zero entry, so callers can pass a
//! formal degree whose leading coefficient happens to vanish.

use num_bigint::BigInt;
use num_traits::Zero;

use crate::determinant::Determinant;
use crate::matrix::Matrix;

/// Sylvester matrix of `p` (degree dp) and `q` (degree dq).
///
/// Size (dp + dq) × (dp + dq). Rows `0..dq` hold `p` shifted right by the row
/// index; rows `dq..dq+dp` hold `q` shifted right by `row - dq`. Both slices
/// must be non-empty.
pub fn sylvester_matrix(p: &[BigInt], q: &[BigInt]) -> Matrix<BigInt> {
    let dp = p.len().saturating_sub(1);
    let dq = q.len().saturating_sub(1);
    let size = dp + dq;
    let mut s = Matrix::zeros(size, size);

    for i in 0..dq {
        for (j, c) in p.iter().enumerate() {
            s.set(i, i + j, c.clone());
        }
    }
    for i in 0..dp {
        for (j, c) in q.iter().enumerate() {
            s.set(dq + i, i + j, c.clone());
        }
    }
    s
}

/// Integer resultant Res(p, q) = det(Sylvester(p, q)).
///
/// Empty or identically-zero input yields 0. Two constants give the empty
/// determinant, 1.
pub fn resultant(p: &[BigInt], q: &[BigInt]) -> BigInt {
    let is_zero = |v: &[BigInt]| v.iter().all(Zero::is_zero);
    if p.is_empty() || q.is_empty() || is_zero(p) || is_zero(q) {
        return BigInt::zero();
    }

    // the Sylvester matrix is square by construction
    Determinant::bareiss(&sylvester_matrix(p, q)).unwrap_or_else(|_| BigInt::zero())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ints(v: &[i64]) -> Vec<BigInt> {
        v.iter().copied().map(BigInt::from).collect()
    }

    #[test]
    fn test_sylvester_layout() {
        let s = sylvester_matrix(&ints(&[2, -3, 1]), &ints(&[-3, 1]));
        let expected = Matrix::from_rows(&[ints(&[2, -3, 1]), ints(&[-3, 1, 0]), ints(&[0, -3, 1])]);
        assert_eq!(s, expected);
    }

    #[test]
    fn test_resultant_of_coprime_pair() {
        // (x-1)(x-2) against (x-3): (3-1)(3-2) = 2
        let p = ints(&[2, -3, 1]);
        let q = ints(&[-3, 1]);
        assert_eq!(resultant(&p, &q), BigInt::from(2));
        assert_eq!(resultant(&q, &p), BigInt::from(2));
    }

    #[test]
    fn test_common_root_gives_zero() {
        assert_eq!(resultant(&ints(&[2, -3, 1]), &ints(&[-1, 1])), BigInt::from(0));
    }

    #[test]
    fn test_quadratics() {
        // x^2 + 1 and x^2 - 2
        assert_eq!(resultant(&ints(&[1, 0, 1]), &ints(&[-2, 0, 1])), BigInt::from(9));
    }

    #[test]
    fn test_constant_against_polynomial() {
        // Res(c, q) = c^deg q
        assert_eq!(resultant(&ints(&[5]), &ints(&[1, 2, 3])), BigInt::from(25));
        assert_eq!(resultant(&ints(&[5]), &ints(&[7])), BigInt::from(1));
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(resultant(&[], &ints(&[1, 1])), BigInt::from(0));
        assert_eq!(resultant(&ints(&[0, 0]), &ints(&[1, 1])), BigInt::from(0));
        assert_eq!(resultant(&ints(&[1, 1]), &ints(&[0])), BigInt::from(0));
    }

    #[test]
    fn test_formal_degree_kept() {
        // p = x - 2 written with a zero x^2 slot: the matrix grows to 3×3
        let s = sylvester_matrix(&ints(&[-2, 1, 0]), &ints(&[-3, 1]));
        assert_eq!(s.dims(), (3, 3));
    }

    proptest! {
        #[test]
        fn prop_self_resultant_vanishes(
            coeffs in proptest::collection::vec(-20i64..20, 1..4),
            lead in 1i64..10,
        ) {
            let mut p = ints(&coeffs);
            p.push(BigInt::from(lead));
            prop_assert_eq!(resultant(&p, &p), BigInt::from(0));
        }
    }
}
