pub mod error;
pub mod head;
pub mod layout;
pub mod loose;
pub mod object;
pub mod parse;
pub mod refs;
pub mod walk;

pub use error::{ObjectError, StoreError};
pub use head::HeadState;
pub use walk::{Walk, WalkStats};

use std::path::Path;

use gitviz_core::DateFilter;

use crate::layout::RepoLayout;

/// Read-only view of a git repository's loose object store.
pub struct GitRepo {
    layout: RepoLayout,
}

impl GitRepo {
    /// Open the repository at `root` (a work tree or a bare git directory).
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let layout = RepoLayout::discover(root)?;
        Ok(Self { layout })
    }

    pub fn layout(&self) -> &RepoLayout {
        &self.layout
    }

    /// Resolve HEAD and collect every loose commit dated on or before `filter`.
    pub fn walk(&self, filter: Option<&DateFilter>) -> Result<Walk, StoreError> {
        walk::walk_repository(&self.layout, filter)
    }
}
