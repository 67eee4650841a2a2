use std::io;
use thiserror::Error;

/// Error type for svclust-io operations.
#[derive(Error, Debug)]
pub enum OutputError {
    /// IO error occurred during file operations.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A cluster refers to an evidence pass that was not handed to the writer.
    #[error("Cluster {0} refers to an unknown evidence pass")]
    UnknownPass(String),

    /// Several stores share the pass name a cluster refers to.
    #[error("Evidence pass '{0}' is not unique")]
    AmbiguousPass(String),
}

/// Result type alias for svclust-io operations.
pub type Result<T> = std::result::Result<T, OutputError>;
