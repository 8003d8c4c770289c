use std::path::{Path, PathBuf};

use crate::StoreError;

const GITDIR_PREFIX: &str = "gitdir:";

#[derive(Debug, Clone)]
pub struct RepoLayout {
    git_dir: PathBuf,
}

impl RepoLayout {
    /// Layout rooted directly at a git directory (bare repository or `.git`).
    pub fn new(git_dir: &Path) -> Self {
        Self {
            git_dir: git_dir.to_path_buf(),
        }
    }

    /// Locate the git directory for `root`: `root/.git` (a directory or a
    /// `gitdir:` pointer file), or `root` itself when it is bare.
    pub fn discover(root: &Path) -> Result<Self, StoreError> {
        let dot_git = root.join(".git");
        if dot_git.is_dir() {
            return Ok(Self::new(&dot_git));
        }
        if dot_git.is_file() {
            let content = std::fs::read_to_string(&dot_git)?;
            let target = content
                .trim()
                .strip_prefix(GITDIR_PREFIX)
                .map(str::trim)
                .ok_or_else(|| StoreError::NotARepository(root.to_path_buf()))?;
            let target = Path::new(target);
            let git_dir = if target.is_absolute() {
                target.to_path_buf()
            } else {
                root.join(target)
            };
            return Ok(Self::new(&git_dir));
        }
        if root.join("HEAD").is_file() && root.join("objects").is_dir() {
            return Ok(Self::new(root));
        }
        Err(StoreError::NotARepository(root.to_path_buf()))
    }

    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    pub fn head_file(&self) -> PathBuf {
        self.git_dir.join("HEAD")
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    pub fn refs_dir(&self) -> PathBuf {
        self.git_dir.join("refs")
    }

    pub fn packed_refs_file(&self) -> PathBuf {
        self.git_dir.join("packed-refs")
    }

    /// Create the minimal directory skeleton (`objects/`, `refs/heads/`).
    pub fn create_dirs(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(self.objects_dir())?;
        std::fs::create_dir_all(self.refs_dir().join("heads"))?;
        Ok(())
    }
}
