//! Error types for the small-root search
//!
//! Only invalid arguments are errors. Degenerate inputs (zero polynomials,
//! singular Sylvester matrices) and exhausted searches produce well-defined
//! values instead: a zero resultant, an empty root list, or
//! [`Elimination::Exhausted`](crate::elimination::Elimination::Exhausted).

use num_bigint::BigInt;
use thiserror::Error;

use crate::rational::Rational;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoppersmithError {
    #[error("modulus must be positive, got {0}")]
    NonPositiveModulus(BigInt),

    #[error("exponent must be non-negative, got {0}")]
    NegativeExponent(i64),

    #[error("invalid rational {0:?}, expected n or n/d")]
    InvalidRational(String),

    #[error("Lovász parameter δ = {0} must satisfy 1/4 < δ ≤ 1")]
    InvalidDelta(Rational),

    #[error("basis row {row} has {actual} entries, expected {expected}")]
    RaggedBasis {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("determinant needs a square matrix, got {rows}×{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("CRT moduli {a} and {b} are not coprime")]
    NotCoprime { a: BigInt, b: BigInt },

    #[error("residue count {residues} does not match modulus count {moduli}")]
    ResidueCount { residues: usize, moduli: usize },

    #[error("cannot take an integer root of negative {0}")]
    NegativeRadicand(BigInt),

    #[error("root degree must be at least 1")]
    ZeroRootDegree,

    #[error("prime bit length must be in 2..=63, got {0}")]
    InvalidBitLength(u32),
}

pub type CoppersmithResult<T> = std::result::Result<T, CoppersmithError>;
