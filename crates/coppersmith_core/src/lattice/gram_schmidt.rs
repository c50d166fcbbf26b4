//! Gram-Schmidt orthogonalization over exact rationals
//!
//! Given basis B = [b_0, ..., b_{n-1}], compute orthogonal vectors b*_i and coefficients μ_ij:
//!
//! ```text
//! b*_0 = b_0
//! b*_i = b_i - Σ_{j<i} μ_ij b*_j
//! μ_ij = <b_i, b*_j> / <b*_j, b*_j>      (0 when <b*_j, b*_j> = 0)
//! ```
//!
//! The zero-norm guard keeps linearly dependent inputs from dividing by zero.

use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::basis::LatticeBasis;
use crate::rational::Rational;

/// Exact dot product of two rational vectors
pub fn dot(a: &[Rational], b: &[Rational]) -> Rational {
    a.iter()
        .zip(b.iter())
        .fold(Rational::zero(), |acc, (x, y)| &acc + &(x * y))
}

/// Dot product of an integer vector with a rational one
pub fn dot_int(a: &[BigInt], b: &[Rational]) -> Rational {
    a.iter()
        .zip(b.iter())
        .filter(|(x, y)| !x.is_zero() && !y.is_zero())
        .fold(Rational::zero(), |acc, (x, y)| &acc + &y.scale(x))
}

/// v -= c * w, in place
pub fn sub_scaled(v: &mut [Rational], c: &Rational, w: &[Rational]) {
    if c.is_zero() {
        return;
    }
    for (vi, wi) in v.iter_mut().zip(w.iter()) {
        if !wi.is_zero() {
            *vi = &*vi - &(c * wi);
        }
    }
}

/// Gram-Schmidt orthogonalization data (exact rational representation)
#[derive(Debug, Clone)]
pub struct GramSchmidt {
    /// Orthogonalized vectors b*_i
    pub u: Vec<Vec<Rational>>,
    /// Gram-Schmidt coefficients μ_ij (i > j)
    /// Stored as lower triangular matrix: mu[i][j] for j < i
    pub mu: Vec<Vec<Rational>>,
    /// Squared norms ||b*_i||^2
    pub b_star_norms_sq: Vec<Rational>,
    pub n: usize,
}

impl GramSchmidt {
    pub fn compute(basis: &LatticeBasis) -> Self {
        let n = basis.n;
        let mut u: Vec<Vec<Rational>> = Vec::with_capacity(n);
        let mut mu: Vec<Vec<Rational>> = Vec::with_capacity(n);
        let mut b_star_norms_sq: Vec<Rational> = Vec::with_capacity(n);

        for i in 0..n {
            let b_i = basis.get(i);
            let mut u_i: Vec<Rational> = b_i.iter().map(Rational::from).collect();
            let mut mu_i = Vec::with_capacity(i);

            for j in 0..i {
                let mu_ij = if b_star_norms_sq[j].is_zero() {
                    Rational::zero()
                } else {
                    &dot_int(b_i, &u[j]) / &b_star_norms_sq[j]
                };
                sub_scaled(&mut u_i, &mu_ij, &u[j]);
                mu_i.push(mu_ij);
            }

            b_star_norms_sq.push(dot(&u_i, &u_i));
            u.push(u_i);
            mu.push(mu_i);
        }

        Self {
            u,
            mu,
            b_star_norms_sq,
            n,
        }
    }

    /// Get μ_ij, defined only for j < i
    pub fn get_mu(&self, i: usize, j: usize) -> &Rational {
        assert!(j < i, "μ_ij only defined for j < i");
        &self.mu[i][j]
    }

    pub fn get_norm_sq(&self, i: usize) -> &Rational {
        &self.b_star_norms_sq[i]
    }

    /// Check if μ_ij needs size reduction (|μ_ij| > 1/2)
    pub fn needs_size_reduction(&self, i: usize, j: usize) -> bool {
        let mu = self.get_mu(i, j);
        // |μ| > 1/2  ⟺  |2*num| > den
        let two_num: BigInt = &mu.numerator * 2;
        two_num.abs() > mu.denominator
    }

    /// Check the Lovász condition at position k:
    ///
    /// ```text
    /// ||b*_k||^2 ≥ (δ - μ_{k,k-1}^2) ||b*_{k-1}||^2
    /// ```
    pub fn check_lovasz(&self, k: usize, delta: &Rational) -> bool {
        if k == 0 {
            return true;
        }
        let mu_sq = self.mu[k][k - 1].square();
        let rhs = &(delta - &mu_sq) * &self.b_star_norms_sq[k - 1];
        self.b_star_norms_sq[k] >= rhs
    }

    /// Update μ after size reduction b_k = b_k - q * b_j.
    ///
    /// b*_k is unchanged by this step, so only row k of μ moves.
    pub fn update_size_reduction(&mut self, k: usize, j: usize, q: &BigInt) {
        self.mu[k][j] = &self.mu[k][j] - &Rational::from(q);
        for i in 0..j {
            let prod = self.mu[j][i].scale(q);
            self.mu[k][i] = &self.mu[k][i] - &prod;
        }
    }
}
