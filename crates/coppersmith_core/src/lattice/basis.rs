//! Lattice basis representation

use num_bigint::BigInt;
use num_traits::Zero;
use std::fmt;

use crate::error::{CoppersmithError, CoppersmithResult};

/// A lattice basis represented as a matrix of row vectors
///
/// Each row b_i is a basis vector in Z^m.
/// The lattice L(B) = {Σ x_i b_i : x_i ∈ Z}
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatticeBasis {
    /// Basis vectors as rows (n vectors of dimension m)
    pub vectors: Vec<Vec<BigInt>>,
    /// Number of basis vectors
    pub n: usize,
    /// Dimension of the ambient space
    pub m: usize,
}

impl LatticeBasis {
    /// Create a lattice basis from row vectors.
    ///
    /// An empty basis is allowed; rows of differing length are not.
    pub fn new(vectors: Vec<Vec<BigInt>>) -> CoppersmithResult<Self> {
        let m = vectors.first().map_or(0, Vec::len);
        if let Some((row, v)) = vectors.iter().enumerate().find(|(_, v)| v.len() != m) {
            return Err(CoppersmithError::RaggedBasis {
                row,
                expected: m,
                actual: v.len(),
            });
        }

        let n = vectors.len();
        Ok(Self { vectors, n, m })
    }

    /// Create a lattice basis from machine-integer rows
    pub fn from_rows<T: Into<BigInt> + Clone>(rows: &[Vec<T>]) -> CoppersmithResult<Self> {
        let vectors: Vec<Vec<BigInt>> = rows
            .iter()
            .map(|row| row.iter().map(|x| x.clone().into()).collect())
            .collect();
        Self::new(vectors)
    }

    /// Random n×m basis with entries in (-2^(bits-1), 2^(bits-1)), for tests and benchmarks
    pub fn random<R: rand::Rng>(n: usize, m: usize, bits: u32, rng: &mut R) -> Self {
        let half = 1i64 << (bits.clamp(2, 62) - 1);
        let vectors: Vec<Vec<BigInt>> = (0..n)
            .map(|_| (0..m).map(|_| BigInt::from(rng.gen_range(-half + 1..half))).collect())
            .collect();

        Self { vectors, n, m }
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    pub fn get(&self, i: usize) -> &[BigInt] {
        &self.vectors[i]
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.vectors.swap(i, j);
    }

    /// Compute inner product <b_i, b_j>
    pub fn inner_product(&self, i: usize, j: usize) -> BigInt {
        self.vectors[i]
            .iter()
            .zip(self.vectors[j].iter())
            .fold(BigInt::zero(), |acc, (a, b)| acc + a * b)
    }

    /// Compute squared norm ||b_i||^2
    pub fn norm_squared(&self, i: usize) -> BigInt {
        self.inner_product(i, i)
    }

    /// Update b_i = b_i - q * b_j (size reduction step)
    pub fn reduce_vector(&mut self, i: usize, j: usize, q: &BigInt) {
        for k in 0..self.m {
            let delta = q * &self.vectors[j][k];
            self.vectors[i][k] -= delta;
        }
    }

    pub fn into_rows(self) -> Vec<Vec<BigInt>> {
        self.vectors
    }
}

impl fmt::Display for LatticeBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "LatticeBasis ({}×{}):", self.n, self.m)?;
        for (i, v) in self.vectors.iter().enumerate() {
            write!(f, "  b_{}: [", i)?;
            for (j, x) in v.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x)?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
