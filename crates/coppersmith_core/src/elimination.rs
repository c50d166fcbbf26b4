//! Eliminating y from two bivariate polynomials
//!
//! The resultant R(x) = Res_y(G1, G2) is never expanded symbolically. It is
//! sampled at small integers x0 (Sylvester determinant of the two
//! specialisations) and rebuilt by Lagrange interpolation.
//!
//! Both inputs are multiplied once by the lcm of their coefficient
//! denominators before sampling. That factor is the same at every x0, so the
//! samples all lie on one polynomial, `c1^dy2 * c2^dy1 * R(x)`, and the
//! primitive part of the interpolant is R up to sign.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use tracing::{debug, trace};

use crate::bivar::RationalBivar;
use crate::config::EliminationConfig;
use crate::rational::Rational;
use crate::resultant::resultant;

/// Outcome of eliminating y
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Elimination {
    /// Ascending integer coefficients of R(x), primitive and trimmed.
    /// An identically-zero resultant is `[0]`.
    Resolved(Vec<BigInt>),
    /// The window ran out of usable sample points.
    Exhausted { collected: usize, needed: usize },
}

impl Elimination {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, Elimination::Exhausted { .. })
    }

    pub fn coefficients(&self) -> Option<&[BigInt]> {
        match self {
            Elimination::Resolved(c) => Some(c),
            Elimination::Exhausted { .. } => None,
        }
    }

    /// Collapse to a single coefficient sequence, reporting exhaustion as `[0]`
    pub fn into_coefficients(self) -> Vec<BigInt> {
        match self {
            Elimination::Resolved(c) => c,
            Elimination::Exhausted { .. } => vec![BigInt::zero()],
        }
    }
}

/// Eliminate y from `g1`, `g2` with the default sampling window
pub fn resultant_by_elimination(
    g1: &RationalBivar,
    g2: &RationalBivar,
    x_bound: &BigInt,
    y_bound: &BigInt,
) -> Elimination {
    resultant_by_elimination_with(g1, g2, x_bound, y_bound, &EliminationConfig::default())
}

/// Eliminate y from `g1`, `g2`, sampling x0 in `[-(X + margin), X + margin]`.
///
/// Samples are x values, so only `x_bound` sizes the window.
pub fn resultant_by_elimination_with(
    g1: &RationalBivar,
    g2: &RationalBivar,
    x_bound: &BigInt,
    y_bound: &BigInt,
    config: &EliminationConfig,
) -> Elimination {
    let needed = sample_count(g1, g2);

    let h1 = g1.scale(&g1.denominator_lcm());
    let h2 = g2.scale(&g2.denominator_lcm());

    let reach = if x_bound.is_positive() { x_bound.clone() } else { BigInt::zero() };
    let limit = reach + BigInt::from(config.window_margin);
    let mut samples: Vec<(BigInt, BigInt)> = Vec::with_capacity(needed);

    for x0 in OutwardScan::new(limit) {
        let p1 = integer_coeffs(&h1.specialize_x(&x0));
        let p2 = integer_coeffs(&h2.specialize_x(&x0));

        if p1.iter().all(Zero::is_zero) || p2.iter().all(Zero::is_zero) {
            trace!(%x0, "skipping sample: specialisation vanishes");
            continue;
        }

        let value = resultant(&p1, &p2);
        samples.push((x0, value));
        if samples.len() >= needed {
            break;
        }
    }

    if samples.len() < needed {
        debug!(
            collected = samples.len(),
            needed,
            %x_bound,
            %y_bound,
            "elimination exhausted its sampling window"
        );
        return Elimination::Exhausted {
            collected: samples.len(),
            needed,
        };
    }

    let coeffs = primitive_part(&lagrange_interpolate(&samples));
    debug!(samples = samples.len(), degree = coeffs.len() - 1, "eliminated y");
    Elimination::Resolved(coeffs)
}

/// D + 1 where D = deg_y(G1)·deg_x(G2) + deg_y(G2)·deg_x(G1), floored at 0.
///
/// The zero polynomial counts as degree −1.
fn sample_count(g1: &RationalBivar, g2: &RationalBivar) -> usize {
    let deg = |d: Option<u32>| d.map_or(-1, i64::from);
    let bound = deg(g1.degree_y()) * deg(g2.degree_x()) + deg(g2.degree_y()) * deg(g1.degree_x());
    bound.max(0) as usize + 1
}

/// Coefficients already cleared of denominators
fn integer_coeffs(coeffs: &[Rational]) -> Vec<BigInt> {
    coeffs.iter().map(Rational::floor).collect()
}

/// Sample points 0, −1, 1, −2, 2, … with |x0| ≤ limit
struct OutwardScan {
    next: BigInt,
    limit: BigInt,
}

impl OutwardScan {
    fn new(limit: BigInt) -> Self {
        Self {
            next: BigInt::zero(),
            limit,
        }
    }
}

impl Iterator for OutwardScan {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        if self.next.abs() > self.limit {
            return None;
        }
        let current = self.next.clone();
        self.next = if current.is_positive() {
            -(&current + BigInt::one())
        } else if current.is_negative() {
            -&current
        } else {
            -BigInt::one()
        };
        Some(current)
    }
}

/// Polynomial through `points` (distinct x values), as ascending rational
/// coefficients of length `points.len()`. No points gives `[0]`.
pub fn lagrange_interpolate(points: &[(BigInt, BigInt)]) -> Vec<Rational> {
    let n = points.len();
    if n == 0 {
        return vec![Rational::zero()];
    }

    let mut coeffs = vec![Rational::zero(); n];
    for (i, (xi, yi)) in points.iter().enumerate() {
        if yi.is_zero() {
            continue;
        }

        // basis numerator Π_{j≠i} (x − xj) and its value at xi
        let mut basis: Vec<BigInt> = vec![BigInt::one()];
        let mut denom = BigInt::one();
        for (j, (xj, _)) in points.iter().enumerate() {
            if i == j {
                continue;
            }
            let mut next = vec![BigInt::zero(); basis.len() + 1];
            for (k, c) in basis.iter().enumerate() {
                next[k + 1] += c;
                next[k] -= c * xj;
            }
            basis = next;
            denom *= xi - xj;
        }

        let weight = Rational::new(yi.clone(), denom);
        for (slot, c) in coeffs.iter_mut().zip(basis.iter()) {
            if !c.is_zero() {
                *slot = &*slot + &weight.scale(c);
            }
        }
    }
    coeffs
}

/// Clear denominators, divide by the content, drop trailing zeros
pub(crate) fn primitive_part(coeffs: &[Rational]) -> Vec<BigInt> {
    let lcm = coeffs
        .iter()
        .fold(BigInt::one(), |acc, c| acc.lcm(&c.denominator));
    let mut ints: Vec<BigInt> = coeffs.iter().map(|c| c.scale(&lcm).numerator).collect();

    while ints.len() > 1 && ints.last().map_or(false, Zero::is_zero) {
        ints.pop();
    }

    let content = ints.iter().fold(BigInt::zero(), |acc, c| acc.gcd(c));
    if content > BigInt::one() {
        for c in ints.iter_mut() {
            *c = &*c / &content;
        }
    }
    if ints.is_empty() {
        ints.push(BigInt::zero());
    }
    ints
}
