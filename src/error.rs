//! Error types for the punch detection library.
//!
//! Missing tracking data is not an error: it flows through the pipeline as
//! `None`. These variants cover configuration mistakes and collaborator
//! failures only.

use thiserror::Error;

/// Main error type for the library
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid input parameters provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Sliding-window filter construction or reconfiguration error
    #[error("Filter error: {0}")]
    FilterError(String),

    /// Sensor collaborator failed to deliver a frame
    #[error("Sensor error: {0}")]
    SensorError(String),

    /// Recorded skeleton stream could not be read or written
    #[error("Recording error: {0}")]
    RecordingError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Convenience type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
