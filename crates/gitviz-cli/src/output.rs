use std::fmt::Display;

use gitviz_core::CommitId;
use gitviz_graph::PresentationGraph;
use gitviz_store::WalkStats;

/// Format a key-value pair for display.
pub fn kv(key: &str, value: impl Display) -> String {
    format!("{key:>12}: {value}")
}

/// Format a header line.
pub fn header(title: &str) -> String {
    format!("=== {title} ===")
}

/// Human-readable run summary, one line per entry.
pub fn summary(head: &CommitId, stats: &WalkStats, graph: &PresentationGraph) -> String {
    let head_note = if graph.node(head).is_some() {
        head.short().to_string()
    } else {
        format!("{} (not rendered)", head.short())
    };
    [
        header("commit graph"),
        kv("head", head_note),
        kv("commits", graph.nodes.len()),
        kv("edges", graph.edges.len()),
        kv("excluded", stats.excluded),
        kv("skipped", stats.skipped),
    ]
    .join("\n")
}
