//! Building blocks shared by the Argo profile tools.

pub mod delta;
pub mod logger;
pub mod qctest;
pub mod reftable;

pub use delta::format_delta;
pub use qctest::QcTestError;
