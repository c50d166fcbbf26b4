//! Coppersmith CLI
//!
//! Small-root search modulo a composite N, exact LLL, and replayable demos.
//!
//! # Usage
//! ```bash
//! # x^2 - 64 mod 499*547 with |x| < 24
//! coppersmith univariate --coeffs 272889,0,1 --modulus 272953 --bound 24
//!
//! # x^2 + y + 4 mod 499*547 with |x|, |y| < 24
//! coppersmith bivariate --terms "2,0:1;0,1:1;0,0:4" --modulus 272953 --x-bound 24 --y-bound 24
//!
//! # LLL-reduce a matrix given row by row
//! coppersmith reduce --rows "201,37;1648,297"
//!
//! # Replay a demonstration
//! coppersmith demo --scenario rsa-small-e --seed 2025
//! ```

mod input;
mod lll_bench;
mod scenarios;

use clap::{Parser, Subcommand, ValueEnum};
use num_bigint::BigInt;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use coppersmith_core::{
    find_small_roots_bivariate_with, find_small_roots_univariate_with, reduce, CoppersmithError, LLLConfig,
    Rational, SearchConfig,
};

#[derive(Parser)]
#[command(name = "coppersmith")]
#[command(about = "Exact lattice small-root search for polynomials modulo N")]
#[command(version)]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Small roots of a univariate polynomial mod N
    Univariate {
        /// Ascending coefficients c0,c1,...
        #[arg(long)]
        coeffs: String,

        /// Modulus N
        #[arg(long)]
        modulus: BigInt,

        /// Root bound X (|x| < X)
        #[arg(long)]
        bound: BigInt,

        /// Multiplicity of the N-power layers
        #[arg(long, default_value = "3")]
        m: u32,

        /// Number of x-shifts of f^m
        #[arg(long, default_value = "3")]
        t: u32,

        /// Lovász parameter
        #[arg(long, default_value = "3/4")]
        delta: Rational,
    },

    /// Small roots of a bivariate polynomial mod N
    Bivariate {
        /// Terms "ix,iy:c;ix,iy:c"
        #[arg(long)]
        terms: String,

        /// Modulus N
        #[arg(long)]
        modulus: BigInt,

        /// Bound on |x|
        #[arg(long)]
        x_bound: BigInt,

        /// Bound on |y|
        #[arg(long)]
        y_bound: BigInt,

        #[arg(long, default_value = "2")]
        m: u32,

        #[arg(long, default_value = "2")]
        tx: u32,

        #[arg(long, default_value = "2")]
        ty: u32,

        /// Lovász parameter
        #[arg(long, default_value = "3/4")]
        delta: Rational,

        /// Extra sample points on each side of the x window during elimination
        #[arg(long, default_value = "3")]
        window_margin: u64,
    },

    /// LLL-reduce an integer matrix
    Reduce {
        /// Rows "a,b,c;d,e,f"
        #[arg(long)]
        rows: String,

        /// Lovász parameter
        #[arg(long, default_value = "3/4")]
        delta: Rational,
    },

    /// Replay a demonstration scenario
    Demo {
        #[arg(long, value_enum)]
        scenario: Scenario,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Benchmark exact LLL on random bases
    LllBench {
        /// Maximum lattice dimension
        #[arg(long, default_value = "12")]
        max_dim: usize,

        /// Maximum entry bit size
        #[arg(long, default_value = "16")]
        max_bits: u32,

        /// RNG seed
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Export results to CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Scenario {
    /// x^2 + c with a planted small root
    SmallRoot,
    /// RSA with e = 3 and a short message
    RsaSmallE,
    /// x^2 + y + c with a planted small pair
    Bivariate,
    /// Factoring N from the high bits of p
    FactorHighBits,
    /// Håstad broadcast, e = 3
    Hastad,
    /// Integer roots by direct search, no modulus
    IntegerBaseline,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error("invalid integer {0:?}")]
    InvalidInteger(String),

    #[error("invalid term {0:?}, expected ix,iy:c")]
    InvalidTerm(String),

    #[error("failed to write {}: {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoppersmithError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn search_config(delta: Rational, window_margin: u64) -> Result<SearchConfig, CliError> {
    let mut config = SearchConfig {
        lll: LLLConfig::with_delta(delta)?,
        ..SearchConfig::default()
    };
    config.elimination.window_margin = window_margin;
    Ok(config)
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Univariate {
            coeffs,
            modulus,
            bound,
            m,
            t,
            delta,
        } => {
            let f = input::parse_int_list(&coeffs)?;
            let config = search_config(delta, 3)?;
            debug!(degree = f.len().saturating_sub(1), m, t, "univariate search");

            let roots = find_small_roots_univariate_with(&f, &modulus, &bound, m, t, &config)?;
            println!("Roots ({}):", roots.len());
            for r in &roots {
                println!("  x = {}", r);
            }
        }
        Commands::Bivariate {
            terms,
            modulus,
            x_bound,
            y_bound,
            m,
            tx,
            ty,
            delta,
            window_margin,
        } => {
            let f = input::parse_terms(&terms)?;
            let config = search_config(delta, window_margin)?;
            debug!(%f, m, tx, ty, "bivariate search");

            let roots = find_small_roots_bivariate_with(&f, &modulus, &x_bound, &y_bound, m, tx, ty, &config)?;
            println!("Roots ({}):", roots.len());
            for (x0, y0) in &roots {
                println!("  (x, y) = ({}, {})", x0, y0);
            }
        }
        Commands::Reduce { rows, delta } => {
            let rows = input::parse_rows(&rows)?;
            for row in reduce(&rows, &delta)? {
                let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
                println!("[{}]", cells.join(", "));
            }
        }
        Commands::Demo { scenario, seed } => {
            let result = scenarios::run_scenario(scenario, seed)?;
            println!("Scenario: {}", result.name);
            for (label, value) in &result.report {
                println!("  {:<16} {}", label, value);
            }
            println!("  {:<16} {}", "recovered", if result.recovered { "yes" } else { "no" });
            println!("  {:<16} {:.2} ms", "time", result.total_ms);
            println!("  {:<16} {}", "sha256", result.result_hash);
        }
        Commands::LllBench {
            max_dim,
            max_bits,
            seed,
            export,
        } => {
            lll_bench::run_lll_benchmark(max_dim, max_bits, seed, export.as_deref())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_flags_parse_into_typed_values() {
        let cli = Cli::try_parse_from([
            "coppersmith",
            "univariate",
            "--coeffs",
            "272889,0,1",
            "--modulus",
            "272953",
            "--bound",
            "24",
        ])
        .unwrap();
        match cli.command {
            Commands::Univariate {
                modulus, bound, delta, ..
            } => {
                assert_eq!(modulus, BigInt::from(272953));
                assert_eq!(bound, BigInt::from(24));
                assert_eq!(delta, Rational::ratio(3, 4));
            }
            _ => panic!("expected the univariate subcommand"),
        }
    }

    #[test]
    fn test_malformed_numbers_rejected_by_parser() {
        let bad_modulus = Cli::try_parse_from([
            "coppersmith",
            "univariate",
            "--coeffs",
            "1,1",
            "--modulus",
            "12x",
            "--bound",
            "3",
        ]);
        assert!(bad_modulus.is_err());

        let bad_delta = Cli::try_parse_from(["coppersmith", "reduce", "--rows", "1,0;0,1", "--delta", "1/0"]);
        assert!(bad_delta.is_err());
    }

    #[test]
    fn test_reduce_flag_delta() {
        let cli = Cli::try_parse_from(["coppersmith", "reduce", "--rows", "2,0;1,1", "--delta", "99/100"]).unwrap();
        assert!(matches!(cli.command, Commands::Reduce { ref delta, .. } if *delta == Rational::ratio(99, 100)));
    }
}
