//! Demonstration scenarios
//!
//! Each scenario plants a small secret, runs the matching search and reports
//! whether the secret came back, with a SHA-256 fingerprint of the result so
//! runs under one seed can be compared byte for byte.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use std::fmt::Display;
use std::time::Instant;
use tracing::{info, warn};

use coppersmith_core::{
    find_small_roots_bivariate, find_small_roots_univariate, integer_nth_root, BivarPoly, CoppersmithError,
    CrtBasis, PrimeGenerator,
};

use crate::{CliError, Scenario};

/// Result from a scenario run
#[derive(Debug, Clone)]
pub struct ScenarioResult {
    pub name: &'static str,
    pub recovered: bool,
    /// Labelled values for display, in order
    pub report: Vec<(&'static str, String)>,
    pub total_ms: f64,
    pub result_hash: String,
}

pub fn run_scenario(scenario: Scenario, seed: u64) -> Result<ScenarioResult, CliError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let start = Instant::now();

    let (name, recovered, report, hashed) = match scenario {
        Scenario::SmallRoot => small_root(&mut rng)?,
        Scenario::RsaSmallE => rsa_small_e(&mut rng)?,
        Scenario::Bivariate => bivariate(&mut rng)?,
        Scenario::FactorHighBits => factor_high_bits(&mut rng)?,
        Scenario::Hastad => hastad(&mut rng)?,
        Scenario::IntegerBaseline => integer_baseline(),
    };

    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    if recovered {
        info!(scenario = name, seed, total_ms, "planted value recovered");
    } else {
        warn!(scenario = name, seed, "planted value not recovered; try larger lattice parameters");
    }

    Ok(ScenarioResult {
        name,
        recovered,
        report,
        total_ms,
        result_hash: compute_result_hash(&hashed),
    })
}

type Outcome = (&'static str, bool, Vec<(&'static str, String)>, String);

/// Compute SHA256 hash of a scenario's result for deterministic comparison
fn compute_result_hash(result: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(result.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn list<T: Display>(items: &[T]) -> String {
    let parts: Vec<String> = items.iter().map(|x| x.to_string()).collect();
    format!("[{}]", parts.join(", "))
}

fn pairs(items: &[(BigInt, BigInt)]) -> String {
    let parts: Vec<String> = items.iter().map(|(x, y)| format!("({}, {})", x, y)).collect();
    format!("[{}]", parts.join(", "))
}

/// f(x) = x^2 + c over a product of two 14-bit primes, |r| < 2^8
fn small_root(rng: &mut StdRng) -> Result<Outcome, CliError> {
    let (_, _, n) = PrimeGenerator::rsa_modulus(28, rng)?;
    let bound = BigInt::from(256);
    let r = BigInt::from(rng.gen_range(-128i64..128));
    let c = (-(&r * &r)).mod_floor(&n);

    let f = vec![c, BigInt::zero(), BigInt::one()];
    let roots = find_small_roots_univariate(&f, &n, &bound, 3, 3)?;

    let recovered = roots.contains(&r);
    let found = list(&roots);
    let report = vec![
        ("N", n.to_string()),
        ("X", bound.to_string()),
        ("planted r", r.to_string()),
        ("roots found", found.clone()),
    ];
    Ok(("small-root", recovered, report, found))
}

/// m^3 ≡ c (mod N) with m < N^(1/3): m is a small root of x^3 - c
fn rsa_small_e(rng: &mut StdRng) -> Result<Outcome, CliError> {
    let (_, _, n) = PrimeGenerator::rsa_modulus(36, rng)?;
    let bound = integer_nth_root(&n, 3)?;
    let message = (&bound / BigInt::from(4)).max(BigInt::from(2));
    let c = message.modpow(&BigInt::from(3), &n);

    let f = vec![-c.clone(), BigInt::zero(), BigInt::zero(), BigInt::one()];
    let roots = find_small_roots_univariate(&f, &n, &bound, 4, 3)?;

    let recovered = roots.contains(&message);
    let found = list(&roots);
    let report = vec![
        ("N", n.to_string()),
        ("e", "3".to_string()),
        ("c", c.to_string()),
        ("X", bound.to_string()),
        ("message", message.to_string()),
        ("roots found", found.clone()),
    ];
    Ok(("rsa-small-e", recovered, report, found))
}

/// F(x, y) = x^2 + y + c over 499 * 547 with a planted (r, s)
fn bivariate(rng: &mut StdRng) -> Result<Outcome, CliError> {
    let n = BigInt::from(499 * 547);
    let (x_bound, y_bound) = (BigInt::from(24), BigInt::from(24));
    let r = BigInt::from(rng.gen_range(-12i64..12));
    let s = BigInt::from(rng.gen_range(-12i64..12));
    let c = (-(&r * &r + &s)).mod_floor(&n);

    let f = BivarPoly::from_terms(vec![(2, 0, BigInt::one()), (0, 1, BigInt::one()), (0, 0, c)])?;
    let roots = find_small_roots_bivariate(&f, &n, &x_bound, &y_bound, 2, 2, 2)?;

    let planted = (r, s);
    let recovered = roots.contains(&planted);
    let found = pairs(&roots);
    let report = vec![
        ("N", n.to_string()),
        ("X, Y", format!("{}, {}", x_bound, y_bound)),
        ("planted (r, s)", format!("({}, {})", planted.0, planted.1)),
        ("roots found", found.clone()),
    ];
    Ok(("bivariate", recovered, report, found))
}

/// Factor N = p·q knowing the high bits of p: F(x, y) = (p0 + x)(q0 + y) − N
fn factor_high_bits(rng: &mut StdRng) -> Result<Outcome, CliError> {
    const PRIME_BITS: u32 = 24;
    let known = PRIME_BITS * 3 / 5;
    let unknown = PRIME_BITS - known;

    let p = BigInt::from(PrimeGenerator::random_prime(PRIME_BITS, rng)?);
    let q = BigInt::from(PrimeGenerator::random_prime(PRIME_BITS, rng)?);
    let n = &p * &q;

    let p0 = (&p >> unknown) << unknown;
    let q0 = &n / &p0;
    let x_bound = BigInt::one() << unknown;
    // q0 overshoots q by about q·x/p0, the same order as x
    let y_bound = &x_bound * 2;

    let f = BivarPoly::from_terms(vec![
        (1, 1, BigInt::one()),
        (1, 0, q0.clone()),
        (0, 1, p0.clone()),
        (0, 0, &p0 * &q0 - &n),
    ])?;
    let roots = find_small_roots_bivariate(&f, &n, &x_bound, &y_bound, 2, 2, 2)?;

    let factors: Vec<(BigInt, BigInt)> = roots
        .iter()
        .map(|(x, y)| (&p0 + x, &q0 + y))
        .filter(|(pp, qq)| pp * qq == n && !pp.is_one() && !qq.is_one())
        .collect();
    let recovered = factors.iter().any(|(pp, qq)| pp == &p && qq == &q);

    let found = pairs(&factors);
    let report = vec![
        ("N", n.to_string()),
        ("p0 (high bits)", p0.to_string()),
        ("q0 = N / p0", q0.to_string()),
        ("X, Y", format!("{}, {}", x_bound, y_bound)),
        ("true (x, y)", format!("({}, {})", &p - &p0, &q - &q0)),
        ("roots found", roots.len().to_string()),
        ("factorisations", found.clone()),
    ];
    Ok(("factor-high-bits", recovered, report, found))
}

/// Broadcast of one message under e = 3 to three coprime moduli
fn hastad(rng: &mut StdRng) -> Result<Outcome, CliError> {
    let basis = loop {
        let moduli = (0..3)
            .map(|_| PrimeGenerator::rsa_modulus(40, rng).map(|(_, _, n)| n))
            .collect::<Result<Vec<_>, _>>()?;
        match CrtBasis::new(moduli) {
            Ok(basis) => break basis,
            Err(CoppersmithError::NotCoprime { .. }) => continue,
            Err(e) => return Err(e.into()),
        }
    };

    let cube_bound = integer_nth_root(&basis.product, 3)?;
    let message = (&cube_bound / BigInt::from(4)).max(BigInt::from(2));
    let e = BigInt::from(3);
    let ciphertexts: Vec<BigInt> = basis.moduli.iter().map(|n| message.modpow(&e, n)).collect();

    // m^3 < N1·N2·N3, so the CRT combination is m^3 itself
    let combined = basis.reconstruct(&ciphertexts)?;
    let recovered_message = integer_nth_root(&combined, 3)?;

    let recovered = recovered_message == message;
    let report = vec![
        ("N1, N2, N3", list(&basis.moduli)),
        ("message", message.to_string()),
        ("C", combined.to_string()),
        ("recovered m", recovered_message.to_string()),
    ];
    Ok(("hastad", recovered, report, recovered_message.to_string()))
}

/// No modulus: roots of x^2 − r^2 by direct search, for comparison
fn integer_baseline() -> Outcome {
    let r: i64 = 17;
    let bound: i64 = 64;
    let roots: Vec<i64> = (-bound + 1..bound).filter(|x| x * x - r * r == 0).collect();

    let recovered = roots.contains(&r);
    let found = list(&roots);
    let report = vec![
        ("X", bound.to_string()),
        ("planted r", r.to_string()),
        ("brute-force roots", found.clone()),
    ];
    ("integer-baseline", recovered, report, found)
}
