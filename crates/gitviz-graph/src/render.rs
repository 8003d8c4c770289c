use serde::Serialize;

use gitviz_core::{Commit, CommitId, CommitTable};

use crate::{GraphError, RenderConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The commit HEAD points at.
    Head,
    /// Has at least one child in the table.
    Ancestor,
    /// No children in the table: a branch tip, or its children were filtered out.
    Leaf,
}

impl Role {
    pub fn classify(is_current: bool, has_children: bool) -> Self {
        if is_current {
            Role::Head
        } else if has_children {
            Role::Ancestor
        } else {
            Role::Leaf
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeDecl {
    pub id: CommitId,
    /// 1-based position in date order.
    pub ordinal: usize,
    pub label: String,
    pub role: Role,
    pub color: String,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeDecl {
    pub parent: CommitId,
    pub child: CommitId,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PresentationGraph {
    pub rankdir: String,
    pub nodes: Vec<NodeDecl>,
    pub edges: Vec<EdgeDecl>,
}

impl PresentationGraph {
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &CommitId) -> Option<&NodeDecl> {
        self.nodes.iter().find(|n| &n.id == id)
    }
}

/// Commits sorted by date, ties broken by id.
pub fn date_order(table: &CommitTable) -> Vec<&Commit> {
    let mut commits: Vec<&Commit> = table.iter().collect();
    commits.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    commits
}

/// Build the presentation graph for a linked commit table.
///
/// Fails only when `config` does not validate.
pub fn render(
    table: &CommitTable,
    current: &CommitId,
    config: &RenderConfig,
) -> Result<PresentationGraph, GraphError> {
    config.validate()?;

    let ordered = date_order(table);
    let mut nodes = Vec::with_capacity(ordered.len());
    let mut edges = Vec::new();

    for (index, commit) in ordered.into_iter().enumerate() {
        let ordinal = index + 1;
        let role = Role::classify(&commit.id == current, !commit.children.is_empty());
        let label = format!(
            "#{}\n{}\n{}",
            ordinal,
            commit.id.prefix(config.short_id_len),
            commit.date.format(&config.date_format)
        );
        nodes.push(NodeDecl {
            id: commit.id.clone(),
            ordinal,
            label,
            role,
            color: config.color_for(role).to_string(),
            style: config.node_style.clone(),
        });
        edges.extend(
            commit
                .parents
                .iter()
                .filter(|parent| table.contains(parent))
                .map(|parent| EdgeDecl {
                    parent: parent.clone(),
                    child: commit.id.clone(),
                }),
        );
    }

    if !table.contains(current) {
        tracing::info!("current commit {} is not in the rendered set", current);
    }

    Ok(PresentationGraph {
        rankdir: config.rankdir.clone(),
        nodes,
        edges,
    })
}
