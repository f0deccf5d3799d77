use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Cache serialization error: {0}")]
    Cache(#[from] serde_json::Error),

    #[error("Worker pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Row transform failed: {0}")]
    Transform(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, IndexError>;
