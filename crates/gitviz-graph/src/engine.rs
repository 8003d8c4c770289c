use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::GraphError;

pub const DEFAULT_ENGINE: &str = "dot";

/// Pipe DOT text through a Graphviz engine, e.g. `dot -Tpng -o out.png`.
pub fn render_with_engine(
    dot: &str,
    engine: &str,
    format: &str,
    output: &Path,
) -> Result<(), GraphError> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let mut child = Command::new(engine)
        .arg(format!("-T{format}"))
        .arg("-o")
        .arg(output)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| GraphError::EngineUnavailable {
            engine: engine.to_string(),
            source,
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(dot.as_bytes()) {
            // The engine may exit before reading everything; its status says why.
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }

    let finished = child.wait_with_output()?;
    if !finished.status.success() {
        return Err(GraphError::Engine {
            engine: engine.to_string(),
            status: finished.status.to_string(),
            stderr: String::from_utf8_lossy(&finished.stderr).trim().to_string(),
        });
    }
    tracing::debug!("{} rendered {} output", engine, format);
    Ok(())
}
