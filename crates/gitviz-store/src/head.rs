use gitviz_core::CommitId;

use crate::layout::RepoLayout;
use crate::refs;
use crate::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadState {
    Symbolic { ref_name: String },
    Detached { target: CommitId },
}

pub fn read_head(layout: &RepoLayout) -> Result<HeadState, StoreError> {
    let path = layout.head_file();
    if !path.is_file() {
        return Err(StoreError::HeadMissing(path));
    }
    let content = std::fs::read_to_string(&path)?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(StoreError::MalformedHead("HEAD is empty".into()));
    }
    if let Some(ref_name) = trimmed.strip_prefix("ref:") {
        let ref_name = ref_name.trim();
        if ref_name.is_empty() {
            return Err(StoreError::MalformedHead("symbolic HEAD without a target".into()));
        }
        Ok(HeadState::Symbolic {
            ref_name: ref_name.to_string(),
        })
    } else {
        let target =
            CommitId::parse(trimmed).map_err(|e| StoreError::MalformedHead(e.to_string()))?;
        Ok(HeadState::Detached { target })
    }
}

/// Resolve HEAD to a commit id. An unborn branch is an error: there is
/// nothing to mark as current.
pub fn resolve_head(layout: &RepoLayout) -> Result<CommitId, StoreError> {
    match read_head(layout)? {
        HeadState::Symbolic { ref_name } => {
            refs::read_ref(layout, &ref_name)?.ok_or(StoreError::RefNotFound(ref_name))
        }
        HeadState::Detached { target } => Ok(target),
    }
}
