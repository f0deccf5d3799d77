//! Loading the detailed index, with a local cache for fast reloads.

use tracing::{debug, info};
use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    time::Instant,
};

use crate::error::{IndexError, Result};
use crate::record::IndexRecord;

pub const DEFAULT_INDEX: &str = "argo_profile_detailled_index.txt";

/// Comment lines before the CSV header.
pub const HEADER_LINES: usize = 8;

pub const CACHE_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub cache: bool,
    pub cache_dir: PathBuf,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            cache: true,
            cache_dir: PathBuf::from("."),
        }
    }
}

/// Parse an index file: skip the comment header, then header row + records.
pub fn read(path: &Path) -> Result<Vec<IndexRecord>> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = String::new();
    for _ in 0..HEADER_LINES {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let rows = rdr
        .deserialize()
        .collect::<std::result::Result<Vec<IndexRecord>, csv::Error>>()?;
    Ok(rows)
}

/// Cache file for `droot/ifile`: the path without its extension, stripped of
/// separators, `-` and `_`, placed in `cache_dir`.
pub fn cache_path(droot: &Path, ifile: &str, cache_dir: &Path) -> PathBuf {
    let stem = Path::new(ifile).with_extension("");
    let key: String = droot
        .join(stem)
        .to_string_lossy()
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '-' | '_'))
        .collect();
    cache_dir.join(format!("{key}.{CACHE_EXTENSION}"))
}

fn read_cache(store: &Path) -> Result<Vec<IndexRecord>> {
    let reader = BufReader::new(File::open(store)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Sibling file the cache is written to before being renamed into place.
pub fn partial_cache_path(store: &Path) -> PathBuf {
    let mut name = store.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn write_json(path: &Path, rows: &[IndexRecord]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, rows)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;
    Ok(())
}

/// A cache file only appears once fully written, so an interrupted run
/// never leaves a truncated cache behind for the next `load`.
fn write_cache(store: &Path, rows: &[IndexRecord]) -> Result<()> {
    if let Some(parent) = store.parent() {
        fs::create_dir_all(parent)?;
    }
    let partial = partial_cache_path(store);
    let written = write_json(&partial, rows)
        .and_then(|()| fs::rename(&partial, store).map_err(IndexError::from));
    if written.is_err() {
        let _ = fs::remove_file(&partial);
    }
    written
}

/// Load `droot/ifile`, through the cache when `opts.cache` is set.
pub fn load(droot: &Path, ifile: &str, opts: &LoadOptions) -> Result<Vec<IndexRecord>> {
    let index = droot.join(ifile);
    let t0 = Instant::now();

    if !opts.cache {
        info!("Loading Argo index file {}", index.display());
        return read(&index);
    }

    let store = cache_path(droot, ifile, &opts.cache_dir);
    let rows = if store.is_file() {
        info!("Loading cached Argo index file {}", store.display());
        read_cache(&store)?
    } else {
        info!("Loading and caching Argo index file {}", index.display());
        let rows = read(&index)?;
        write_cache(&store, &rows)?;
        debug!(cache = %store.display(), "index cache written");
        rows
    };
    debug!(rows = rows.len(), elapsed = ?t0.elapsed(), "index loaded");
    Ok(rows)
}
