//! Coppersmith Core Library
//!
//! Exact-arithmetic small-root search for polynomials modulo a composite N,
//! in the Howgrave-Graham formulation: build a lattice of polynomials that
//! vanish mod N^m at the root, LLL-reduce it, read short rows back as
//! polynomials that vanish over the integers, and verify every candidate
//! against the input polynomial.
//!
//! # Key Components
//!
//! - [`rational`] - Exact rational number type
//! - [`lattice`] - Exact LLL reduction
//! - [`determinant`] - Bareiss fraction-free determinant
//! - [`resultant`] - Sylvester matrix and integer resultant
//! - [`elimination`] - Resultant in x by sampling and interpolation
//! - [`univariate`] / [`bivariate`] - Lattice constructors and root drivers
//! - [`poly`] / [`bivar`] - Sparse integer polynomials
//! - [`primes`] / [`crt`] - Toy moduli and CRT for the demonstrations
//!
//! # Example
//!
//! ```
//! use coppersmith_core::find_small_roots_univariate;
//! use num_bigint::BigInt;
//!
//! // x^2 - 64 modulo 499 * 547
//! let n = BigInt::from(272953);
//! let f = vec![BigInt::from(272953 - 64), BigInt::from(0), BigInt::from(1)];
//! let roots = find_small_roots_univariate(&f, &n, &BigInt::from(24), 3, 3).unwrap();
//! assert!(roots.contains(&BigInt::from(-8)));
//! ```

pub mod bivar;
pub mod bivariate;
pub mod config;
pub mod crt;
pub mod determinant;
pub mod elimination;
pub mod error;
pub mod lattice;
pub mod matrix;
pub mod poly;
pub mod primes;
pub mod rational;
pub mod resultant;
pub mod univariate;

pub use bivar::{BivarPoly, RationalBivar};
pub use bivariate::{find_small_roots_bivariate, find_small_roots_bivariate_with, BivariateLattice, ColumnIndex};
pub use config::{EliminationConfig, LLLConfig, SearchConfig};
pub use crt::{extended_gcd, integer_nth_root, mod_inverse, CrtBasis};
pub use determinant::Determinant;
pub use elimination::{lagrange_interpolate, resultant_by_elimination, resultant_by_elimination_with, Elimination};
pub use error::{CoppersmithError, CoppersmithResult};
pub use lattice::{reduce, GramSchmidt, LLLStats, LatticeBasis, LLL};
pub use matrix::Matrix;
pub use poly::IntPoly;
pub use primes::PrimeGenerator;
pub use rational::Rational;
pub use resultant::{resultant, sylvester_matrix};
pub use univariate::{find_small_roots_univariate, find_small_roots_univariate_with, UnivariateLattice};
