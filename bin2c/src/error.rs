//! Top-level error type for bin2c
//!

use std::path::PathBuf;

use crate::config::error::ConfigError;

/// Process exit status used for I/O failures.
pub const IO_EXIT_CODE: u8 = 1;
/// Process exit status used for usage and configuration errors.
pub const USAGE_EXIT_CODE: u8 = 2;

/// Errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input file could not be opened for reading.
    #[error("failed to open file for reading: {}: {0}", .1.display())]
    ReadOpenFailed(#[source] std::io::Error, PathBuf),
    /// The output file could not be created or truncated for writing.
    #[error("failed to open file for writing: {}: {0}", .1.display())]
    WriteOpenFailed(#[source] std::io::Error, PathBuf),
    /// Reading the input or writing the generated source failed midway.
    #[error("I/O error while encoding: {0}")]
    Io(#[from] std::io::Error),
    /// The encoder options are invalid or contradict each other.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
    /// The settings file or environment could not be loaded.
    #[error("could not load settings: {0}")]
    Settings(#[from] config::ConfigError),
}

impl Error {
    /// The process exit status the binary reports for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::ReadOpenFailed(..) | Error::WriteOpenFailed(..) | Error::Io(_) => IO_EXIT_CODE,
            Error::InvalidConfig(_) | Error::Settings(_) => USAGE_EXIT_CODE,
        }
    }
}
