//! SnowGrad CLI: extract SnowStorm nuisance-parameter gradients from
//! multisim Monte Carlo sets.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use sg_core::{
    check_no_collision, gradient_path, partition, split_counts, write_gradient, Binning,
    EventSet, Observable, SplitConfig, SplitRequest,
};

#[derive(Parser)]
#[command(name = "snowgrad")]
#[command(about = "SnowGrad - SnowStorm nuisance-parameter gradient extraction")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,

    /// Multisim Monte Carlo sets to process
    #[arg(short, long, num_args = 1..)]
    infiles: Vec<PathBuf>,

    /// Output directory for gradient tables
    #[arg(short, long, default_value = ".")]
    outpath: PathBuf,

    /// Maximum number of MC events to use per partition (negative = unbounded)
    #[arg(short = 'n', long = "max_events", default_value = "-1")]
    max_events: i64,

    /// Mode indices to calculate (empty = all available)
    #[arg(short, long, num_args = 1..)]
    modes: Vec<usize>,

    /// Point in nuisance space to split at
    #[arg(short, long, default_value = "0")]
    splitpoint: f64,

    /// Split along the phase axis
    #[arg(short = 'p', long)]
    phases: bool,

    /// Split along the amplitude axis
    #[arg(short = 'a', long)]
    amplitudes: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    let config = SplitRequest {
        infiles: cli.infiles,
        outpath: cli.outpath,
        modes: cli.modes,
        split_point: cli.splitpoint,
        split_phases: cli.phases,
        split_amplitudes: cli.amplitudes,
        max_events: cli.max_events,
    }
    .validate()?;

    run_split(&config)
}

/// Sequential per-mode driver: partition, histogram, write.
fn run_split(config: &SplitConfig) -> Result<()> {
    tracing::info!(files = config.infiles.len(), "loading Monte Carlo sets");
    let events = EventSet::load(&config.infiles)?;
    tracing::info!(
        events = events.n_events(),
        modes = events.n_modes(),
        "Monte Carlo sets loaded"
    );

    for &mode in &config.resolve_modes(&events) {
        // Anti-clobber guard before any computation for this mode. The first
        // collision aborts the whole run.
        for observable in Observable::ALL {
            check_no_collision(&gradient_path(&config.outpath, config.axis, observable, mode))?;
        }

        tracing::info!(mode, axis = config.axis.tag(), "splitting mode");
        for observable in Observable::ALL {
            let (values, weights) = partition(
                &events,
                observable,
                config.axis,
                mode,
                config.split_point,
                config.cap,
            )?;
            tracing::debug!(mode, observable = observable.tag(), selected = values.len(), "partitioned");

            let hist = split_counts(&Binning::for_observable(observable), &values, &weights)?;
            let path = gradient_path(&config.outpath, config.axis, observable, mode);
            tracing::info!(path = %path.display(), "saving gradient");
            write_gradient(&path, &hist)?;
        }
    }

    tracing::info!("gradient extraction complete");
    Ok(())
}
