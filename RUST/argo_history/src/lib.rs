//! Read the HISTORY section of Argo profile files and print it.

pub mod dataset;
pub mod error;
pub mod history;
#[cfg(feature = "netcdf")]
pub mod netcdf_source;

pub use dataset::{HistoryRecord, MemoryProfile, ProfileSource};
pub use error::{DatasetError, Result};
pub use history::{write_dataset_report, ProfileHistory, QcTest, Verbosity};
#[cfg(feature = "netcdf")]
pub use netcdf_source::NcProfile;
