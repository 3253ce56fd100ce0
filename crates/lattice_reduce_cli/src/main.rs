//! Lattice Reduce CLI
//!
//! Basis reduction and closest-vector decoding from the command line.
//!
//! # Usage
//! ```bash
//! # LLL-reduce a square basis
//! lattice-reduce reduce --rows "1 1 1; -1 0 2; 3 5 6"
//!
//! # Two-vector Gaussian reduction with the full step trace
//! lattice-reduce gauss --v1 "66586820 65354729" --v2 "6513996 6393464"
//!
//! # Babai closest-vector decoding
//! lattice-reduce cvp --rows "2 0; 0 2" --target "4 2"
//!
//! # Subset-sum via lattice embedding
//! lattice-reduce subset-sum --weights "1 2 3 9" --target 6
//!
//! # Gauss attack on a congruential public key
//! lattice-reduce attack --random
//! ```

mod input;

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use lattice_reduce_core::{
    attack, closest_vector, encrypt, reduce_pair, AttackOutcome, KeyPair, Lll, LllConfig,
    ReductionReport, SubsetSumOutcome, SubsetSumProblem,
};

#[derive(Parser)]
#[command(name = "lattice-reduce")]
#[command(about = "Lattice basis reduction, closest-vector decoding, and lattice-embedding solvers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// LLL-reduce a square basis
    Reduce {
        /// Inline matrix, rows separated by ';' (e.g. "1 1; 0 1")
        #[arg(long, conflicts_with = "file")]
        rows: Option<String>,

        /// Read the matrix from a file, one row per line
        #[arg(long)]
        file: Option<PathBuf>,

        /// Lovász parameter δ
        #[arg(long, default_value = "0.99")]
        delta: f64,

        /// Print a basis snapshot for every iteration
        #[arg(long)]
        trace: bool,

        /// Export quality metrics to CSV
        #[arg(long)]
        export: Option<PathBuf>,
    },

    /// Two-vector Gaussian reduction with a replayable step trace
    Gauss {
        /// First vector, whitespace-separated
        #[arg(long)]
        v1: String,

        /// Second vector, whitespace-separated
        #[arg(long)]
        v2: String,
    },

    /// Babai closest-vector decoding
    Cvp {
        /// Inline square basis, rows separated by ';'
        #[arg(long, conflicts_with = "file")]
        rows: Option<String>,

        /// Read the basis from a file, one row per line
        #[arg(long)]
        file: Option<PathBuf>,

        /// Target vector, whitespace-separated
        #[arg(long)]
        target: String,
    },

    /// Solve a subset-sum instance via lattice embedding
    SubsetSum {
        /// Item weights, whitespace-separated
        #[arg(long)]
        weights: String,

        /// Target sum
        #[arg(long)]
        target: f64,
    },

    /// Gauss-reduction attack on a congruential public key
    Attack {
        /// Public modulus q
        #[arg(long, requires = "h", conflicts_with = "random")]
        q: Option<i128>,

        /// Public value h
        #[arg(long, requires = "q")]
        h: Option<i128>,

        /// Generate a random key pair first and attack it
        #[arg(long)]
        random: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Reduce { rows, file, delta, trace, export } => {
            run_reduce(rows, file, delta, trace, export)
        }
        Commands::Gauss { v1, v2 } => run_gauss(&v1, &v2),
        Commands::Cvp { rows, file, target } => run_cvp(rows, file, &target),
        Commands::SubsetSum { weights, target } => run_subset_sum(&weights, target),
        Commands::Attack { q, h, random } => run_attack(q, h, random),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(msg) => {
            eprintln!("error: {}", msg);
            ExitCode::FAILURE
        }
    }
}

fn load_basis(rows: Option<String>, file: Option<PathBuf>) -> Result<lattice_reduce_core::Basis, String> {
    match (rows, file) {
        (Some(s), _) => input::parse_matrix(&s),
        (None, Some(path)) => input::read_matrix(&path),
        (None, None) => Err("provide a basis with --rows or --file".into()),
    }
}

fn print_report(report: &ReductionReport) {
    println!("Reduced basis:");
    print!("{}", report.basis);
    println!();
    println!("Swaps:                   {}", report.stats.swaps);
    println!("Iterations:              {}", report.stats.iterations);
    println!("Hadamard ratio (before): {:.6}", report.hadamard_before);
    println!("Hadamard ratio (after):  {:.6}", report.hadamard_after);
    for w in &report.warnings {
        println!("warning: {}", w);
    }
}

fn run_reduce(
    rows: Option<String>,
    file: Option<PathBuf>,
    delta: f64,
    trace: bool,
    export: Option<PathBuf>,
) -> Result<(), String> {
    let basis = load_basis(rows, file)?;
    let config = LllConfig { delta, record_trace: trace, ..Default::default() };
    let report = Lll::reduce_with_report(&basis, &config).map_err(|e| e.to_string())?;

    if trace {
        for (i, snapshot) in report.trace.iter().enumerate() {
            println!("-- iteration {} --", i + 1);
            print!("{}", snapshot);
        }
        println!();
    }
    print_report(&report);

    if let Some(path) = export {
        export_report(&path, &report).map_err(|e| e.to_string())?;
        println!("\nMetrics exported to: {}", path.display());
    }
    Ok(())
}

fn export_report(path: &PathBuf, report: &ReductionReport) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    writeln!(file, "metric,value")?;
    writeln!(file, "swaps,{}", report.stats.swaps)?;
    writeln!(file, "iterations,{}", report.stats.iterations)?;
    writeln!(file, "size_reductions,{}", report.stats.size_reductions)?;
    writeln!(file, "converged,{}", report.stats.converged)?;
    writeln!(file, "hadamard_before,{:.6}", report.hadamard_before)?;
    writeln!(file, "hadamard_after,{:.6}", report.hadamard_after)?;
    Ok(())
}

fn run_gauss(v1: &str, v2: &str) -> Result<(), String> {
    let v1 = input::parse_vector(v1)?;
    let v2 = input::parse_vector(v2)?;
    let reduction = reduce_pair(v1, v2).map_err(|e| e.to_string())?;

    for (i, (a, b)) in reduction.steps.iter().enumerate() {
        println!("Step {}: v1 = {}, v2 = {}", i, a, b);
    }
    println!();
    println!("Reduced pair: v1 = {}, v2 = {}", reduction.v1, reduction.v2);
    println!("Angle between them: {:.2}°", reduction.v1.angle_degrees(&reduction.v2));
    Ok(())
}

fn run_cvp(rows: Option<String>, file: Option<PathBuf>, target: &str) -> Result<(), String> {
    let basis = load_basis(rows, file)?;
    let target = input::parse_vector(target)?;
    let cv = closest_vector(&basis, &target).map_err(|e| e.to_string())?;

    println!("Closest lattice vector: {}", cv.vector);
    println!("Distance to target:     {:.6}", cv.distance);
    Ok(())
}

fn run_subset_sum(weights: &str, target: f64) -> Result<(), String> {
    let weights = input::parse_vector(weights)?.components;
    let problem = SubsetSumProblem::new(weights, target).map_err(|e| e.to_string())?;
    let result = problem.solve(&LllConfig::default()).map_err(|e| e.to_string())?;

    match result.outcome {
        SubsetSumOutcome::Solution { selected, sum, .. } => {
            println!("Solution found: weights {:?} sum to {}", selected, sum);
        }
        SubsetSumOutcome::NoSolution => {
            println!("No solution found (the embedding search is heuristic; a satisfiable");
            println!("instance can still come back empty).");
        }
    }
    println!();
    println!("Swaps:                   {}", result.report.stats.swaps);
    println!("Hadamard ratio (before): {:.6}", result.report.hadamard_before);
    println!("Hadamard ratio (after):  {:.6}", result.report.hadamard_after);
    for w in &result.report.warnings {
        println!("warning: {}", w);
    }
    Ok(())
}

fn run_attack(q: Option<i128>, h: Option<i128>, random: bool) -> Result<(), String> {
    let public = if random {
        let mut rng = rand::thread_rng();
        let kp = KeyPair::generate(&mut rng);
        println!("Generated key pair:");
        println!("  q = {}", kp.public.q);
        println!("  h = {}", kp.public.h);
        println!("  (secret: f = {}, g = {})", kp.private.f, kp.private.g);

        // Show the scheme working before breaking it.
        let m = 42;
        if let Ok(e) = encrypt(&kp.public, m, 101) {
            println!("  sample ciphertext for m = {}: e = {}", m, e);
        }
        println!();
        kp.public
    } else {
        match (q, h) {
            (Some(q), Some(h)) => lattice_reduce_core::PublicKey { q, h },
            _ => return Err("provide --q and --h, or use --random".into()),
        }
    };

    let result = attack(&public).map_err(|e| e.to_string())?;

    println!("Gauss reduction trace:");
    for (i, (v1, v2)) in result.trace.iter().enumerate() {
        println!("  Step {}: v1 = {}, v2 = {}", i, v1, v2);
    }
    println!();
    match result.outcome {
        AttackOutcome::Recovered { f, g } => {
            println!("Attack succeeded: recovered private pair f = {}, g = {}", f, g);
        }
        AttackOutcome::Failed => {
            println!("Attack failed: no reduced row met the size and coprimality bounds.");
        }
    }
    Ok(())
}
