use std::fmt::Write as _;
use std::path::Path;

use crate::render::PresentationGraph;
use crate::GraphError;

/// Serialize to Graphviz DOT: nodes in date order, then edges.
pub fn to_dot(graph: &PresentationGraph) -> String {
    let mut out = String::from("digraph {\n");
    if !graph.rankdir.is_empty() {
        let _ = writeln!(out, "\trankdir={}", graph.rankdir);
    }
    for node in &graph.nodes {
        let _ = writeln!(
            out,
            "\t{} [label={} color={} style={}]",
            quote(node.id.as_str()),
            quote(&node.label),
            quote(&node.color),
            quote(&node.style),
        );
    }
    for edge in &graph.edges {
        let _ = writeln!(
            out,
            "\t{} -> {}",
            quote(edge.parent.as_str()),
            quote(edge.child.as_str())
        );
    }
    out.push_str("}\n");
    out
}

/// Double-quoted DOT string; line breaks become `\n` escapes.
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

/// Write DOT text verbatim to `path`, creating parent directories.
pub fn save_dot(dot: &str, path: &Path) -> Result<(), GraphError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, dot)?;
    Ok(())
}
