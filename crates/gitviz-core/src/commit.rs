use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::{self, HashMap};
use std::collections::BTreeSet;

use crate::id::CommitId;
use crate::time::AuthorTime;
use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: CommitId,
    /// Declaration order, no duplicates.
    pub parents: Vec<CommitId>,
    /// Back-filled by the ancestry linker.
    pub children: BTreeSet<CommitId>,
    pub author_time: AuthorTime,
    pub date: DateTime<Utc>,
}

impl Commit {
    pub fn new(
        id: CommitId,
        parents: Vec<CommitId>,
        author_time: AuthorTime,
    ) -> Result<Self, CoreError> {
        let date = author_time.date()?;
        Ok(Self {
            id,
            parents,
            children: BTreeSet::new(),
            author_time,
            date,
        })
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }
}

/// All commits discovered in one run, keyed by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitTable {
    commits: HashMap<CommitId, Commit>,
}

impl CommitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a commit, returning the one previously stored under its id.
    pub fn insert(&mut self, commit: Commit) -> Option<Commit> {
        self.commits.insert(commit.id.clone(), commit)
    }

    pub fn get(&self, id: &CommitId) -> Option<&Commit> {
        self.commits.get(id)
    }

    pub fn get_mut(&mut self, id: &CommitId) -> Option<&mut Commit> {
        self.commits.get_mut(id)
    }

    pub fn contains(&self, id: &CommitId) -> bool {
        self.commits.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &CommitId> {
        self.commits.keys()
    }

    pub fn iter(&self) -> hash_map::Values<'_, CommitId, Commit> {
        self.commits.values()
    }
}

impl FromIterator<Commit> for CommitTable {
    fn from_iter<I: IntoIterator<Item = Commit>>(iter: I) -> Self {
        let mut table = Self::new();
        for commit in iter {
            table.insert(commit);
        }
        table
    }
}

impl IntoIterator for CommitTable {
    type Item = Commit;
    type IntoIter = hash_map::IntoValues<CommitId, Commit>;

    fn into_iter(self) -> Self::IntoIter {
        self.commits.into_values()
    }
}

impl<'a> IntoIterator for &'a CommitTable {
    type Item = &'a Commit;
    type IntoIter = hash_map::Values<'a, CommitId, Commit>;

    fn into_iter(self) -> Self::IntoIter {
        self.commits.values()
    }
}
