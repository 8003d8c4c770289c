use gitviz_core::{CommitId, CommitTable};

/// Back-fill `children` from every commit's `parents`. Parents missing from
/// the table (filtered out, shallow clone) are ignored. Running it again is
/// a no-op.
pub fn link_ancestry(mut table: CommitTable) -> CommitTable {
    let links: Vec<(CommitId, CommitId)> = table
        .iter()
        .flat_map(|commit| {
            commit
                .parents
                .iter()
                .filter(|parent| table.contains(parent))
                .map(|parent| (parent.clone(), commit.id.clone()))
        })
        .collect();

    tracing::debug!("linking {} parent/child pairs", links.len());
    for (parent, child) in links {
        if let Some(parent) = table.get_mut(&parent) {
            parent.children.insert(child);
        }
    }
    table
}

/// Every child listed under a parent must name that parent back.
pub fn is_consistent(table: &CommitTable) -> bool {
    table.iter().all(|parent| {
        parent.children.iter().all(|child| {
            table
                .get(child)
                .is_some_and(|c| c.parents.contains(&parent.id))
        })
    })
}
