use std::path::{Component, Path};

use gitviz_core::CommitId;

use crate::layout::RepoLayout;
use crate::StoreError;

const SYMREF_PREFIX: &str = "ref:";
const MAX_SYMREF_DEPTH: usize = 5;

/// Resolve a ref name such as `refs/heads/main` to the commit it points at.
/// Loose ref files win over `packed-refs`; symbolic refs are followed.
pub fn read_ref(layout: &RepoLayout, name: &str) -> Result<Option<CommitId>, StoreError> {
    read_ref_at_depth(layout, name, 0)
}

fn read_ref_at_depth(
    layout: &RepoLayout,
    name: &str,
    depth: usize,
) -> Result<Option<CommitId>, StoreError> {
    validate_ref_name(name)?;
    let path = layout.git_dir().join(name);
    if !path.is_file() {
        return find_packed_ref(layout, name);
    }

    let content = std::fs::read_to_string(&path)?;
    let trimmed = content.trim();
    if let Some(target) = trimmed.strip_prefix(SYMREF_PREFIX) {
        if depth >= MAX_SYMREF_DEPTH {
            return Err(StoreError::MalformedRef {
                name: name.to_string(),
                reason: "symbolic ref chain too deep".into(),
            });
        }
        return read_ref_at_depth(layout, target.trim(), depth + 1);
    }

    let id = CommitId::parse(trimmed).map_err(|e| StoreError::MalformedRef {
        name: name.to_string(),
        reason: e.to_string(),
    })?;
    Ok(Some(id))
}

/// Look `name` up in `packed-refs`. Peeled (`^...`) and comment lines are skipped.
pub fn find_packed_ref(layout: &RepoLayout, name: &str) -> Result<Option<CommitId>, StoreError> {
    let path = layout.packed_refs_file();
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)?;
    for line in content.lines() {
        if line.starts_with('#') || line.starts_with('^') {
            continue;
        }
        let Some((hex, ref_name)) = line.split_once(' ') else {
            continue;
        };
        if ref_name.trim() == name {
            let id = CommitId::parse(hex).map_err(|e| StoreError::MalformedRef {
                name: name.to_string(),
                reason: format!("packed-refs: {e}"),
            })?;
            return Ok(Some(id));
        }
    }
    Ok(None)
}

fn validate_ref_name(name: &str) -> Result<(), StoreError> {
    let path = Path::new(name);
    if name.is_empty() || path.is_absolute() {
        return Err(StoreError::MalformedRef {
            name: name.to_string(),
            reason: "must be a relative path".into(),
        });
    }
    for component in path.components() {
        if !matches!(component, Component::Normal(_)) {
            return Err(StoreError::MalformedRef {
                name: name.to_string(),
                reason: "cannot contain '.', '..', or root components".into(),
            });
        }
    }
    Ok(())
}
