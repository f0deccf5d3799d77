// USAGE  argo_index /path/to/gdac [--file argo_profile_detailled_index.txt] [--jobs 8]

use anyhow::{Context, Result};
use argo_core::logger;
use argo_index::{load, summary, Jobs, LoadOptions, DEFAULT_INDEX};
use clap::Parser;
use std::{
    io::{self, Write},
    path::PathBuf,
};

#[derive(Debug, Parser)]
#[command(name = "argo_index")]
#[command(about = "Load an Argo detailed index and summarize it")]
struct Args {
    /// Directory holding the index file
    droot: PathBuf,

    /// Index file name inside DROOT
    #[arg(long, short, default_value = DEFAULT_INDEX)]
    file: String,

    /// Always parse the text index, ignoring any cache
    #[arg(long)]
    no_cache: bool,

    /// Where cached copies of the index are kept
    #[arg(long, default_value = ".")]
    cache_dir: PathBuf,

    /// Worker threads, one per CPU by default
    #[arg(long, short)]
    jobs: Option<usize>,

    /// Enable debug logging on stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let opts = LoadOptions {
        cache: !args.no_cache,
        cache_dir: args.cache_dir.clone(),
    };
    let rows = load(&args.droot, &args.file, &opts)
        .with_context(|| format!("loading {}", args.droot.join(&args.file).display()))?;

    let s = summary::summarize(&rows, Jobs::from(args.jobs))?;
    let mut out = io::stdout().lock();
    summary::write_summary(&mut out, &s)?;
    out.flush()?;
    Ok(())
}
