//! Chinese Remainder Theorem over arbitrary coprime moduli
//!
//! Garner's mixed-radix reconstruction with precomputed partial products and
//! inverses, plus the integer helpers the broadcast demonstration needs.

use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_traits::{One, Signed, Zero};

use crate::error::{CoppersmithError, CoppersmithResult};

/// Extended Euclid: returns (g, x, y) with a·x + b·y = g = gcd(a, b), g ≥ 0
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = old_r.div_floor(&r);
        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);
        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);
        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    if old_r.is_negative() {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    }
}

/// a⁻¹ mod m in [0, m), or `None` when gcd(a, m) ≠ 1
pub fn mod_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    let (g, x, _) = extended_gcd(&a.mod_floor(m), m);
    if g.is_one() {
        Some(x.mod_floor(m))
    } else {
        None
    }
}

/// ⌊n^(1/k)⌋ for n ≥ 0 and k ≥ 1
pub fn integer_nth_root(n: &BigInt, k: u32) -> CoppersmithResult<BigInt> {
    if n.is_negative() {
        return Err(CoppersmithError::NegativeRadicand(n.clone()));
    }
    if k == 0 {
        return Err(CoppersmithError::ZeroRootDegree);
    }
    Ok(Roots::nth_root(n, k))
}

/// Pairwise-coprime moduli with Garner precomputation
#[derive(Debug, Clone)]
pub struct CrtBasis {
    pub moduli: Vec<BigInt>,
    /// Product of all moduli (M)
    pub product: BigInt,
    /// partial_products[i] = moduli[0] · … · moduli[i-1]
    pub partial_products: Vec<BigInt>,
    /// garner_inverses[i] = partial_products[i]⁻¹ mod moduli[i]
    pub garner_inverses: Vec<BigInt>,
}

impl CrtBasis {
    pub fn new(moduli: Vec<BigInt>) -> CoppersmithResult<Self> {
        if let Some(bad) = moduli.iter().find(|m| !m.is_positive()) {
            return Err(CoppersmithError::NonPositiveModulus(bad.clone()));
        }
        for (i, a) in moduli.iter().enumerate() {
            for b in &moduli[i + 1..] {
                if !a.gcd(b).is_one() {
                    return Err(CoppersmithError::NotCoprime {
                        a: a.clone(),
                        b: b.clone(),
                    });
                }
            }
        }

        let k = moduli.len();
        let mut partial_products = vec![BigInt::one(); k];
        for i in 1..k {
            partial_products[i] = &partial_products[i - 1] * &moduli[i - 1];
        }
        let product = moduli.iter().fold(BigInt::one(), |acc, m| acc * m);

        let mut garner_inverses = vec![BigInt::zero(); k];
        for i in 1..k {
            garner_inverses[i] = mod_inverse(&partial_products[i], &moduli[i]).ok_or_else(|| {
                CoppersmithError::NotCoprime {
                    a: partial_products[i].clone(),
                    b: moduli[i].clone(),
                }
            })?;
        }

        Ok(Self {
            moduli,
            product,
            partial_products,
            garner_inverses,
        })
    }

    pub fn len(&self) -> usize {
        self.moduli.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moduli.is_empty()
    }

    /// The unique x in [0, M) with x ≡ residues[i] (mod moduli[i])
    pub fn reconstruct(&self, residues: &[BigInt]) -> CoppersmithResult<BigInt> {
        if residues.len() != self.len() {
            return Err(CoppersmithError::ResidueCount {
                residues: residues.len(),
                moduli: self.len(),
            });
        }
        if residues.is_empty() {
            return Ok(BigInt::zero());
        }

        let mut result = residues[0].mod_floor(&self.moduli[0]);
        for i in 1..residues.len() {
            let mi = &self.moduli[i];
            // t = (r_i - result) · inv mod m_i
            let diff = (&residues[i] - &result).mod_floor(mi);
            let t = (diff * &self.garner_inverses[i]).mod_floor(mi);
            result += &self.partial_products[i] * t;
        }
        Ok(result)
    }

    /// Reconstruction in the symmetric range (−M/2, M/2]
    pub fn reconstruct_signed(&self, residues: &[BigInt]) -> CoppersmithResult<BigInt> {
        let unsigned = self.reconstruct(residues)?;
        let half = &self.product / 2;
        Ok(if unsigned > half {
            unsigned - &self.product
        } else {
            unsigned
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(v: i64) -> BigInt {
        BigInt::from(v)
    }

    #[test]
    fn test_extended_gcd() {
        let (g, x, y) = extended_gcd(&big(240), &big(46));
        assert_eq!(g, big(2));
        assert_eq!(big(240) * &x + big(46) * &y, g);

        let (g, x, y) = extended_gcd(&big(-15), &big(10));
        assert_eq!(g, big(5));
        assert_eq!(big(-15) * &x + big(10) * &y, g);

        let (g, _, _) = extended_gcd(&big(0), &big(0));
        assert_eq!(g, big(0));
    }

    #[test]
    fn test_mod_inverse() {
        assert_eq!(mod_inverse(&big(3), &big(11)), Some(big(4)));
        assert_eq!(mod_inverse(&big(-3), &big(11)), Some(big(7)));
        assert_eq!(mod_inverse(&big(6), &big(9)), None);
    }

    #[test]
    fn test_crt_reconstruction() {
        let basis = CrtBasis::new(vec![big(3), big(5), big(7)]).unwrap();
        assert_eq!(basis.product, big(105));

        // x = 52: 52 mod 3 = 1, mod 5 = 2, mod 7 = 3
        let x = basis.reconstruct(&[big(1), big(2), big(3)]).unwrap();
        assert_eq!(x, big(52));
    }

    #[test]
    fn test_signed_reconstruction() {
        let basis = CrtBasis::new(vec![big(1_000_003), big(998_244_353)]).unwrap();
        let x = big(-12345);
        let residues: Vec<BigInt> = basis.moduli.iter().map(|m| x.mod_floor(m)).collect();
        assert_eq!(basis.reconstruct_signed(&residues).unwrap(), x);
    }

    #[test]
    fn test_crt_errors() {
        assert_eq!(
            CrtBasis::new(vec![big(6), big(35), big(10)]).unwrap_err(),
            CoppersmithError::NotCoprime { a: big(6), b: big(10) }
        );
        assert_eq!(
            CrtBasis::new(vec![big(5), big(0)]).unwrap_err(),
            CoppersmithError::NonPositiveModulus(big(0))
        );
        let basis = CrtBasis::new(vec![big(5), big(7)]).unwrap();
        assert_eq!(
            basis.reconstruct(&[big(1)]),
            Err(CoppersmithError::ResidueCount { residues: 1, moduli: 2 })
        );
    }

    #[test]
    fn test_integer_nth_root() {
        assert_eq!(integer_nth_root(&big(26), 3).unwrap(), big(2));
        assert_eq!(integer_nth_root(&big(27), 3).unwrap(), big(3));
        assert_eq!(integer_nth_root(&big(0), 5).unwrap(), big(0));

        let m = BigInt::parse_bytes(b"123456789012345678901", 10).unwrap();
        let cube = &m * &m * &m;
        assert_eq!(integer_nth_root(&cube, 3).unwrap(), m);
        assert_eq!(integer_nth_root(&(cube - 1), 3).unwrap(), &m - 1);

        assert_eq!(
            integer_nth_root(&big(-8), 3),
            Err(CoppersmithError::NegativeRadicand(big(-8)))
        );
        assert_eq!(integer_nth_root(&big(8), 0), Err(CoppersmithError::ZeroRootDegree));
    }
}
