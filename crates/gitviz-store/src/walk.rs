use gitviz_core::{Commit, CommitId, CommitTable, DateFilter};

use crate::error::ObjectError;
use crate::head::resolve_head;
use crate::layout::RepoLayout;
use crate::loose::{self, RawObject};
use crate::object::{decode_object, Decoded};
use crate::parse::parse_commit;
use crate::StoreError;

/// What one loose object turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Commit(Commit),
    /// Tree, blob or tag.
    NotACommit(String),
    /// A valid commit dated after the cutoff.
    Excluded(Commit),
}

/// decode -> classify -> parse -> filter, stopping at the first non-commit outcome.
pub fn classify_object(
    raw: &RawObject,
    filter: Option<&DateFilter>,
) -> Result<Classified, ObjectError> {
    let body = match decode_object(&raw.id, &raw.bytes)? {
        Decoded::Commit(body) => body,
        Decoded::Other(kind) => return Ok(Classified::NotACommit(kind)),
    };
    let commit = parse_commit(raw.id.clone(), &body)?;
    match filter {
        Some(filter) if !filter.admits(&commit.date) => Ok(Classified::Excluded(commit)),
        _ => Ok(Classified::Commit(commit)),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub commits: usize,
    pub not_commits: usize,
    pub excluded: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct WalkState {
    pub table: CommitTable,
    pub stats: WalkStats,
}

/// Reducer for the object walk: fold one read result into the table.
/// Per-object failures are logged and counted, never propagated.
pub fn fold_object(
    mut state: WalkState,
    object: Result<RawObject, ObjectError>,
    filter: Option<&DateFilter>,
) -> WalkState {
    let classified = object.and_then(|raw| classify_object(&raw, filter));
    match classified {
        Ok(Classified::Commit(commit)) => {
            tracing::debug!("parsed commit {} dated {}", commit.id, commit.date);
            if let Some(previous) = state.table.insert(commit) {
                tracing::debug!("commit {} seen twice", previous.id);
            } else {
                state.stats.commits += 1;
            }
        }
        Ok(Classified::NotACommit(kind)) => {
            tracing::trace!("skipping {} object", kind);
            state.stats.not_commits += 1;
        }
        Ok(Classified::Excluded(commit)) => {
            tracing::debug!("commit {} dated {} is past the cutoff", commit.id, commit.date);
            state.stats.excluded += 1;
        }
        Err(e) => {
            tracing::warn!("skipping object: {}", e);
            state.stats.skipped += 1;
        }
    }
    state
}

#[derive(Debug, Clone)]
pub struct Walk {
    pub table: CommitTable,
    pub head: CommitId,
    pub stats: WalkStats,
}

/// Resolve HEAD, then fold every loose object into a commit table.
pub fn walk_repository(
    layout: &RepoLayout,
    filter: Option<&DateFilter>,
) -> Result<Walk, StoreError> {
    let head = resolve_head(layout)?;
    tracing::info!("current commit: {}", head);

    let state = loose::read_objects(layout)?
        .fold(WalkState::default(), |state, object| {
            fold_object(state, object, filter)
        });

    let WalkState { table, stats } = state;
    tracing::info!(
        commits = stats.commits,
        not_commits = stats.not_commits,
        excluded = stats.excluded,
        skipped = stats.skipped,
        "object walk finished"
    );
    Ok(Walk { table, head, stats })
}
