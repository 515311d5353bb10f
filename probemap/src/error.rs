use thiserror::Error;

/// Errors that can occur when working with a probing table
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeError {
    /// A required argument was absent or a construction parameter is unusable
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

pub type Result<T> = std::result::Result<T, ProbeError>;
