//! Map a function over index rows on a worker pool.

use rayon::prelude::*;

use crate::error::{IndexError, Result};

/// Worker count for [`par_traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Jobs {
    /// One worker per CPU.
    #[default]
    Auto,
    Fixed(usize),
}

impl Jobs {
    pub fn count(self) -> usize {
        match self {
            Jobs::Auto => num_cpus::get(),
            Jobs::Fixed(n) => n.max(1),
        }
    }
}

impl From<Option<usize>> for Jobs {
    fn from(n: Option<usize>) -> Self {
        n.map_or(Jobs::Auto, Jobs::Fixed)
    }
}

/// Split into `n` contiguous chunks; the first `len % n` get one extra row.
/// Never yields more chunks than rows, and at least one.
pub fn split_even<T>(rows: Vec<T>, n: usize) -> Vec<Vec<T>> {
    let n = n.clamp(1, rows.len().max(1));
    let base = rows.len() / n;
    let extra = rows.len() % n;

    let mut it = rows.into_iter();
    (0..n)
        .map(|i| it.by_ref().take(base + usize::from(i < extra)).collect())
        .collect()
}

/// Apply `f` to every row, one chunk per worker, keeping row order.
///
/// The first failing row aborts the call.
pub fn par_traverse<T, U, E, F>(rows: Vec<T>, f: F, jobs: Jobs) -> Result<Vec<U>>
where
    T: Send,
    U: Send,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
    F: Fn(T) -> std::result::Result<U, E> + Sync,
{
    let threads = jobs.count();
    let chunks = split_even(rows, threads);
    tracing::debug!(threads, partitions = chunks.len(), "traversing rows");

    let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
    let mapped: Vec<Vec<U>> = pool.install(|| {
        chunks
            .into_par_iter()
            .map(|chunk| {
                chunk
                    .into_iter()
                    .map(|row| f(row).map_err(|e| IndexError::Transform(e.into())))
                    .collect::<Result<Vec<U>>>()
            })
            .collect::<Result<Vec<_>>>()
    })?;

    Ok(mapped.into_iter().flatten().collect())
}
