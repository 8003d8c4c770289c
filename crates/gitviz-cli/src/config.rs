use std::path::{Path, PathBuf};

use gitviz_graph::RenderConfig;

/// Find the enclosing git repository by walking up from the current directory.
pub fn find_repo_root() -> anyhow::Result<PathBuf> {
    let cwd = std::env::current_dir()?;
    find_repo_root_from(&cwd)
}

pub fn find_repo_root_from(start: &Path) -> anyhow::Result<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        if dir.join(".git").exists() {
            return Ok(dir);
        }
        if !dir.pop() {
            anyhow::bail!(
                "not in a git repository (no .git found above {}); pass --repo-path",
                start.display()
            );
        }
    }
}

/// Render settings from `--config`, or the defaults.
pub fn load_render_config(path: Option<&Path>) -> anyhow::Result<RenderConfig> {
    match path {
        Some(path) => RenderConfig::load(path)
            .map_err(|e| anyhow::anyhow!("loading config {}: {}", path.display(), e)),
        None => Ok(RenderConfig::default()),
    }
}
