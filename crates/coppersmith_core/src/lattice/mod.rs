//! Exact lattice basis reduction
//!
//! - [`LatticeBasis`]: integer row vectors
//! - [`GramSchmidt`]: rational orthogonalisation state
//! - [`LLL`]: δ-LLL over exact rationals, plus the [`reduce`] entry point
//!
//! # Example
//!
//! ```
//! use coppersmith_core::lattice::{LatticeBasis, LLL};
//! use coppersmith_core::LLLConfig;
//!
//! let basis = LatticeBasis::from_rows(&[vec![1i64, 0, 3], vec![0, 1, 5], vec![0, 0, 7]]).unwrap();
//! let (reduced, _stats) = LLL::reduce(&basis, &LLLConfig::default()).unwrap();
//! assert!(LLL::is_reduced(&reduced, &LLLConfig::default()));
//! ```

pub mod basis;
pub mod gram_schmidt;
pub mod lll;

pub use basis::LatticeBasis;
pub use gram_schmidt::GramSchmidt;
pub use lll::{reduce, LLLStats, LLL};
