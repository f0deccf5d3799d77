// USAGE  show_argohistory aoml/1900143/profiles/D1900143_300.nc

use anyhow::{Context, Result};
use argo_core::logger;
use argo_history::{write_dataset_report, NcProfile, Verbosity};
use clap::Parser;
use std::{
    io::{self, BufWriter, Write},
    path::PathBuf,
    time::Instant,
};

#[derive(Debug, Parser)]
#[command(name = "show_argohistory")]
#[command(about = "Print Argo profile HISTORY")]
struct Args {
    /// NetCDF file to scan
    ncfile: PathBuf,

    /// Print every field of each history group
    #[arg(long, short)]
    detailed: bool,

    /// Enable debug logging on stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let t0 = Instant::now();
    let profile = NcProfile::open(&args.ncfile)
        .with_context(|| format!("opening {}", args.ncfile.display()))?;

    let verbosity = if args.detailed {
        Verbosity::Detailed
    } else {
        Verbosity::Compact
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let n_prof = write_dataset_report(&mut out, &profile, verbosity)
        .with_context(|| format!("reading history of {}", args.ncfile.display()))?;
    out.flush()?;

    tracing::debug!(n_prof, elapsed = ?t0.elapsed(), "report written");
    Ok(())
}
