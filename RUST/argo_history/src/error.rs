use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[cfg(feature = "netcdf")]
    #[error("NetCDF error: {0}")]
    Netcdf(#[from] netcdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing variable: {0}")]
    MissingVariable(String),

    #[error("Missing dimension: {0}")]
    MissingDimension(String),

    #[error("Invalid date in {field}: '{value}'")]
    InvalidDate { field: String, value: String },

    #[error("No profile {i_prof}")]
    NoProfile { i_prof: usize },

    #[error("No history entry {n_history} for profile {i_prof}")]
    OutOfRange { i_prof: usize, n_history: usize },
}

pub type Result<T> = std::result::Result<T, DatasetError>;
