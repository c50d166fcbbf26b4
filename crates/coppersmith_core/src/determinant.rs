//! Exact integer determinant by Bareiss fraction-free elimination
//!
//! Every division in the update
//!
//! ```text
//! M[i][j] = (M[i][j] * M[k][k] - M[i][k] * M[k][j]) / prev
//! ```
//!
//! is exact: after step k each entry is a (k+1)×(k+1) minor of the input.

use num_bigint::BigInt;
use num_traits::{One, Zero};

use crate::error::{CoppersmithError, CoppersmithResult};
use crate::matrix::Matrix;

/// Exact determinant calculator
pub struct Determinant;

impl Determinant {
    /// Determinant of a square integer matrix.
    ///
    /// The input is copied, never mutated. The empty matrix has determinant 1.
    pub fn bareiss(matrix: &Matrix<BigInt>) -> CoppersmithResult<BigInt> {
        let (rows, cols) = matrix.dims();
        if rows != cols {
            return Err(CoppersmithError::NotSquare { rows, cols });
        }
        let n = rows;
        if n == 0 {
            return Ok(BigInt::one());
        }

        let mut m = matrix.clone();
        let mut negate = false;
        let mut prev = BigInt::one();

        for k in 0..n - 1 {
            if m.get(k, k).is_zero() {
                match (k + 1..n).find(|&r| !m.get(r, k).is_zero()) {
                    Some(pivot_row) => {
                        m.swap_rows(k, pivot_row);
                        negate = !negate;
                    }
                    None => return Ok(BigInt::zero()),
                }
            }

            let pivot = m.get(k, k).clone();
            for i in k + 1..n {
                for j in k + 1..n {
                    let value = (m.get(i, j) * &pivot - m.get(i, k) * m.get(k, j)) / &prev;
                    m.set(i, j, value);
                }
                m.set(i, k, BigInt::zero());
            }
            prev = pivot;
        }

        let last = m.get(n - 1, n - 1).clone();
        Ok(if negate { -last } else { last })
    }
}
