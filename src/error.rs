use std::path::PathBuf;
use thiserror::Error;

/// Exit code for driver, open, copy, and flush failures.
pub const EXIT_COLLABORATOR: u8 = 10;
/// Exit code for missing arguments and invalid configuration.
pub const EXIT_USAGE: u8 = 20;
/// Exit code for a yes/no flag that is not one of the accepted tokens.
pub const EXIT_FLAG: u8 = 30;

/// Errors raised while copying a dataset and remapping its metadata.
///
/// Every variant maps to a process exit code through [`Error::exit_code`].
/// Only [`Error::Write`] is recoverable: the remapper collects it per tag
/// instead of aborting.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Driver {0} not found")]
    DriverNotFound(String),

    #[error("Format {0} is not writeable")]
    DriverNotWritable(String),

    #[error("Unable to open dataset {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    #[error("Unable to copy dataset to {path}: {reason}")]
    Copy { path: PathBuf, reason: String },

    #[error("Unable to flush dataset {path}: {reason}")]
    Flush { path: PathBuf, reason: String },

    #[error("Failed to set {key} in {domain} domain: {reason}")]
    Write {
        domain: String,
        key: String,
        reason: String,
    },

    #[error("{0} metadata write(s) failed")]
    WriteFailures(usize),

    #[error("Missing parameter: {0}\nUsage: gtiff-metadata <INPUT> <OUTPUT> <N|Y> <N|Y>")]
    MissingArguments(&'static str),

    #[error("Use N,n,no,Y,y,yes for yes/no parameter (got {0:?})")]
    InvalidFlag(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// The process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::MissingArguments(_) | Error::Config(_) => EXIT_USAGE,
            Error::InvalidFlag(_) => EXIT_FLAG,
            Error::DriverNotFound(_)
            | Error::DriverNotWritable(_)
            | Error::Open { .. }
            | Error::Copy { .. }
            | Error::Flush { .. }
            | Error::Write { .. }
            | Error::WriteFailures(_) => EXIT_COLLABORATOR,
        }
    }
}
