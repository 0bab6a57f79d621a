use clap::{Parser, ValueEnum};
use impurity_pca::output::{write_results_csv, write_summary_csv};
use impurity_pca::{summarize, Preset, SimulationConfig, SweepEngine, ZeroVariancePolicy};
use log::{error, info};
use std::io;
use std::process;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ZeroVarianceArg {
    Error,
    ZeroEigenvalue,
}

impl From<ZeroVarianceArg> for ZeroVariancePolicy {
    fn from(arg: ZeroVarianceArg) -> Self {
        match arg {
            ZeroVarianceArg::Error => ZeroVariancePolicy::Error,
            ZeroVarianceArg::ZeroEigenvalue => ZeroVariancePolicy::ZeroEigenvalue,
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "impurity_pca",
    version,
    about = "Simulates how PCA retention rules under-count latent dimensions in impure measures."
)]
struct Args {
    /// Which preset sweep to run.
    #[arg(value_enum)]
    preset: Preset,

    /// Replications per configuration (default 1000).
    #[arg(long, value_name = "N")]
    replications: Option<usize>,

    /// Master random seed. Drawn from the OS if omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads. Defaults to one per logical core.
    #[arg(long, value_name = "T")]
    threads: Option<usize>,

    /// Print every replication row instead of the per-group summary.
    #[arg(long)]
    raw: bool,

    /// Handling of zero-variance score columns.
    #[arg(long, value_enum, default_value_t = ZeroVarianceArg::Error)]
    zero_variance: ZeroVarianceArg,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = SimulationConfig {
        seed: args.seed,
        num_threads: args.threads,
        zero_variance_policy: args.zero_variance.into(),
    };
    let grid = args.preset.grid(args.replications);
    info!(
        "Running {:?}: {} configurations x {} replications.",
        args.preset,
        grid.num_configurations(),
        grid.num_replications
    );

    let outcome = match SweepEngine::new(config).run_grid(&grid) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Invalid sweep: {}", e);
            process::exit(1);
        }
    };
    for failure in &outcome.failures {
        error!("Configuration {:?} failed: {}", failure.configuration, failure.error);
    }

    let stdout = io::stdout().lock();
    let written = if args.raw {
        write_results_csv(&outcome.table, stdout)
    } else {
        write_summary_csv(&summarize(&outcome.table), stdout)
    };
    if let Err(e) = written {
        error!("Failed to write results: {}", e);
        process::exit(1);
    }

    if !outcome.is_complete() {
        error!(
            "{} of {} configurations failed (seed {}).",
            outcome.failures.len(),
            outcome.num_configurations,
            outcome.seed
        );
        process::exit(1);
    }
}
