use std::path::PathBuf;
use thiserror::Error;

use gitviz_core::CommitId;

/// Repository-level failures. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not a git repository: {0}")]
    NotARepository(PathBuf),
    #[error("HEAD not found at {0}")]
    HeadMissing(PathBuf),
    #[error("malformed HEAD: {0}")]
    MalformedHead(String),
    #[error("ref not found: {0}")]
    RefNotFound(String),
    #[error("malformed ref {name}: {reason}")]
    MalformedRef { name: String, reason: String },
    #[error("object directory not found: {0}")]
    ObjectsDirMissing(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures confined to a single loose object. The walker logs these and
/// moves on.
#[derive(Debug, Error)]
pub enum ObjectError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("decode error in {id}: {reason}")]
    Decode { id: CommitId, reason: String },
    #[error("malformed commit {id}: {reason}")]
    MalformedCommit { id: CommitId, reason: String },
}

impl ObjectError {
    pub fn decode(id: &CommitId, reason: impl Into<String>) -> Self {
        Self::Decode {
            id: id.clone(),
            reason: reason.into(),
        }
    }

    pub fn malformed(id: &CommitId, reason: impl Into<String>) -> Self {
        Self::MalformedCommit {
            id: id.clone(),
            reason: reason.into(),
        }
    }
}
