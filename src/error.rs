use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while discovering or reading source files
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan root {} does not exist", .0.display())]
    RootNotFound(PathBuf),

    #[error("scan root {} is not a directory", .0.display())]
    RootNotDirectory(PathBuf),

    #[error("cannot read scan root {}: {source}", .path.display())]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 text (line {line})", .path.display())]
    Decode { path: PathBuf, line: usize },

    #[error("invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl ScanError {
    /// Discovery errors abort the run before anything was scanned
    pub fn is_discovery(&self) -> bool {
        matches!(
            self,
            ScanError::RootNotFound(_)
                | ScanError::RootNotDirectory(_)
                | ScanError::RootUnreadable { .. }
                | ScanError::Walk { .. }
        )
    }
}
