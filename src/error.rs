use thiserror::Error;

/// Crate-wide error type. Each variant corresponds to one of the error
/// kinds enumerated by the object-store and command-layer contracts.
#[derive(Debug, Error)]
pub enum Error {
    #[error("not a git repository (or any of the parent directories): {0}")]
    NotARepository(String),

    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("'{0}' is neither a regular file nor a directory")]
    InvalidPathKind(String),

    #[error("object {0} not found")]
    ObjectMissing(String),

    #[error("object {0} is corrupt: {1}")]
    ObjectCorrupt(String, String),

    #[error("malformed index: {0}")]
    MalformedIndex(String),

    #[error("branch '{0}' has no commits yet")]
    UnbornBranch(String),

    #[error("branch '{0}' not found")]
    BranchNotFound(String),

    #[error("commit message is required")]
    MessageRequired,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
