//! The Argo detailed profile index: loading, caching and parallel traversal.

pub mod error;
pub mod index;
pub mod record;
pub mod summary;
pub mod traverse;

pub use error::{IndexError, Result};
pub use index::{cache_path, load, partial_cache_path, read, LoadOptions, DEFAULT_INDEX};
pub use record::IndexRecord;
pub use traverse::{par_traverse, Jobs};
