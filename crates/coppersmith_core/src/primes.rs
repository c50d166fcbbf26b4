//! Small random primes and toy RSA moduli
//!
//! Primality is plain trial division, so this is only meant for the
//! demonstration moduli (a few dozen bits), never for real key sizes.

use num_bigint::BigInt;
use rand::Rng;

use crate::error::{CoppersmithError, CoppersmithResult};

/// Random prime generator for demonstration moduli
pub struct PrimeGenerator;

impl PrimeGenerator {
    /// Uniform random prime with exactly `bits` bits (2 ≤ bits ≤ 63)
    pub fn random_prime<R: Rng + ?Sized>(bits: u32, rng: &mut R) -> CoppersmithResult<u64> {
        if !(2..=63).contains(&bits) {
            return Err(CoppersmithError::InvalidBitLength(bits));
        }
        let top = 1u64 << (bits - 1);
        let mask = (top << 1) - 1;

        loop {
            let candidate = (rng.gen::<u64>() & mask) | top | 1;
            if Self::is_prime(candidate) {
                return Ok(candidate);
            }
        }
    }

    /// N = p·q with p, q distinct primes of `bits / 2` bits each
    pub fn rsa_modulus<R: Rng + ?Sized>(
        bits: u32,
        rng: &mut R,
    ) -> CoppersmithResult<(BigInt, BigInt, BigInt)> {
        let half = bits / 2;
        // 2-bit primes leave no room for a distinct pair
        if half < 3 {
            return Err(CoppersmithError::InvalidBitLength(half));
        }
        let p = Self::random_prime(half, rng)?;
        let q = loop {
            let q = Self::random_prime(half, rng)?;
            if q != p {
                break q;
            }
        };
        let (p, q) = (BigInt::from(p), BigInt::from(q));
        let n = &p * &q;
        Ok((p, q, n))
    }

    /// Trial-division primality test
    pub fn is_prime(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        if n % 2 == 0 {
            return n == 2;
        }
        let mut f = 3u64;
        while f * f <= n {
            if n % f == 0 {
                return false;
            }
            f += 2;
        }
        true
    }
}
