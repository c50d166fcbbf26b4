//! LLL Lattice Reduction Benchmark
//!
//! Times exact LLL on seeded random square bases and checks every output is
//! δ-reduced with an unchanged |det|.

use num_traits::Signed;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tracing::debug;

use coppersmith_core::{Determinant, LLLConfig, LatticeBasis, Matrix, LLL};

use crate::CliError;

/// Results from a single LLL benchmark run
#[derive(Debug, Clone)]
pub struct LLLBenchResult {
    pub n: usize,
    pub bits: u32,
    pub ms: f64,
    pub gs_ms: f64,
    pub swaps: usize,
    pub iterations: usize,
    pub size_reductions: usize,
    pub verified: bool,
}

pub fn run_lll_benchmark(
    max_dim: usize,
    max_bits: u32,
    seed: u64,
    export: Option<&Path>,
) -> Result<Vec<LLLBenchResult>, CliError> {
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║               Exact LLL Lattice Reduction Benchmark          ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Max dimension: {}, Max bits: {}, seed: {}", max_dim, max_bits, seed);
    println!();

    // Test configurations: (n, bits)
    let configs: Vec<(usize, u32)> = vec![(4, 8), (6, 8), (8, 8), (8, 12), (10, 12), (12, 16), (15, 16), (20, 20)]
        .into_iter()
        .filter(|&(n, b)| n <= max_dim && b <= max_bits)
        .collect();

    let mut rng = StdRng::seed_from_u64(seed);
    let config = LLLConfig::default();
    let mut results = Vec::with_capacity(configs.len());

    println!("┌──────┬──────┬────────────┬────────────┬────────────┬────────────┬──────────┐");
    println!("│  n   │ bits │  Time (ms) │  GS (ms)   │   Swaps    │ Iterations │ Verified │");
    println!("├──────┼──────┼────────────┼────────────┼────────────┼────────────┼──────────┤");

    for &(n, bits) in &configs {
        let result = benchmark_lll(n, bits, &config, &mut rng)?;
        let verified_str = if result.verified { "✓" } else { "✗" };
        println!(
            "│ {:>4} │ {:>4} │ {:>10.2} │ {:>10.2} │ {:>10} │ {:>10} │    {}     │",
            n, bits, result.ms, result.gs_ms, result.swaps, result.iterations, verified_str
        );
        results.push(result);
    }

    println!("└──────┴──────┴────────────┴────────────┴────────────┴────────────┴──────────┘");
    println!();

    if let Some(path) = export {
        export_lll_results(path, &results)?;
        println!("Results exported to: {}", path.display());
    }

    Ok(results)
}

fn benchmark_lll(
    n: usize,
    bits: u32,
    config: &LLLConfig,
    rng: &mut StdRng,
) -> Result<LLLBenchResult, CliError> {
    let basis = LatticeBasis::random(n, n, bits, rng);

    let start = Instant::now();
    let (reduced, stats) = LLL::reduce(&basis, config)?;
    let ms = start.elapsed().as_secs_f64() * 1000.0;

    let before = Determinant::bareiss(&as_matrix(&basis))?;
    let after = Determinant::bareiss(&as_matrix(&reduced))?;
    let verified = LLL::is_reduced(&reduced, config) && before.abs() == after.abs();
    debug!(n, bits, swaps = stats.swaps, verified, "benchmark case finished");

    Ok(LLLBenchResult {
        n,
        bits,
        ms,
        gs_ms: stats.gs_time * 1000.0,
        swaps: stats.swaps,
        iterations: stats.iterations,
        size_reductions: stats.size_reductions,
        verified,
    })
}

fn as_matrix(basis: &LatticeBasis) -> Matrix<num_bigint::BigInt> {
    Matrix::from_rows(&basis.vectors)
}

/// Export LLL benchmark results to CSV
fn export_lll_results(path: &Path, results: &[LLLBenchResult]) -> Result<(), CliError> {
    let io_err = |source| CliError::Export {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(io_err)?;
    writeln!(file, "n,bits,ms,gs_ms,swaps,iterations,size_reductions,verified").map_err(io_err)?;

    for r in results {
        writeln!(
            file,
            "{},{},{:.6},{:.6},{},{},{},{}",
            r.n, r.bits, r.ms, r.gs_ms, r.swaps, r.iterations, r.size_reductions, r.verified
        )
        .map_err(io_err)?;
    }
    Ok(())
}
