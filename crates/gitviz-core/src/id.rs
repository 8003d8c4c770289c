use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CoreError;

/// Length of the abbreviated id shown in graph labels.
pub const SHORT_ID_LEN: usize = 7;

const SHA1_HEX_LEN: usize = 40;
const SHA256_HEX_LEN: usize = 64;

/// Hex digest naming a commit. Opaque: ids read from object paths or parent
/// lines are kept verbatim, only HEAD/ref contents go through [`CommitId::parse`].
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitId(String);

impl CommitId {
    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Validate a full-length hex id (SHA-1 or SHA-256).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let s = s.trim();
        if s.len() != SHA1_HEX_LEN && s.len() != SHA256_HEX_LEN {
            return Err(CoreError::InvalidCommitId(format!(
                "expected {SHA1_HEX_LEN} or {SHA256_HEX_LEN} hex chars, got {}",
                s.len()
            )));
        }
        hex::decode(s).map_err(|e| CoreError::InvalidCommitId(e.to_string()))?;
        Ok(Self(s.to_ascii_lowercase()))
    }

    /// Rebuild an id from a loose object path: shard directory name followed
    /// by the file name, e.g. `ab` + `cdef...` -> `abcdef...`.
    pub fn from_shard(shard: &str, file_name: &str) -> Self {
        let mut hex = String::with_capacity(shard.len() + file_name.len());
        hex.push_str(shard);
        hex.push_str(file_name);
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `len` characters of the id.
    pub fn prefix(&self, len: usize) -> &str {
        match self.0.char_indices().nth(len) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }

    pub fn short(&self) -> &str {
        self.prefix(SHORT_ID_LEN)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitId({})", self.0)
    }
}

impl From<&str> for CommitId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
