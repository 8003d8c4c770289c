use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use gitviz_core::CommitId;

use crate::error::ObjectError;
use crate::layout::RepoLayout;
use crate::StoreError;

/// One file found under the object directory, with its bytes.
#[derive(Debug, Clone)]
pub struct RawObject {
    pub id: CommitId,
    pub bytes: Vec<u8>,
}

pub fn loose_object_path(layout: &RepoLayout, id: &CommitId) -> PathBuf {
    let shard = id.prefix(2);
    let rest = &id.as_str()[shard.len()..];
    layout.objects_dir().join(shard).join(rest)
}

/// Id of the object stored at `path`: parent directory name + file name.
pub fn object_id_from_path(path: &Path) -> CommitId {
    let shard = path
        .parent()
        .and_then(Path::file_name)
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    let file = path
        .file_name()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    CommitId::from_shard(&shard, &file)
}

/// Shard directories are named by the first two hex digits of an id.
fn is_shard_dir(name: &str) -> bool {
    name.len() == 2 && name.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Every file inside a shard directory (`objects/xx/...`), in file-name order.
///
/// `pack/`, `info/` and stray files at the top level are never listed. A
/// missing object directory is fatal. Entries that cannot be listed are
/// logged and skipped.
pub fn list_object_files(layout: &RepoLayout) -> Result<Vec<PathBuf>, StoreError> {
    let objects_dir = layout.objects_dir();
    if !objects_dir.is_dir() {
        return Err(StoreError::ObjectsDirMissing(objects_dir));
    }

    let walker = WalkDir::new(&objects_dir)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() != 1
                || (entry.file_type().is_dir()
                    && is_shard_dir(&entry.file_name().to_string_lossy()))
        });

    let mut files = Vec::new();
    for entry in walker {
        match entry {
            Ok(entry) if entry.depth() == 2 && entry.file_type().is_file() => {
                files.push(entry.into_path())
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("skipping unreadable object entry: {}", e),
        }
    }
    Ok(files)
}

pub fn read_object_file(path: &Path) -> Result<RawObject, ObjectError> {
    let bytes = std::fs::read(path).map_err(|source| ObjectError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(RawObject {
        id: object_id_from_path(path),
        bytes,
    })
}

/// Lazily read every loose object file.
pub fn read_objects(
    layout: &RepoLayout,
) -> Result<impl Iterator<Item = Result<RawObject, ObjectError>>, StoreError> {
    let files = list_object_files(layout)?;
    Ok(files.into_iter().map(|path| read_object_file(&path)))
}

/// Store already-encoded object bytes at the loose path for `id`.
pub fn write_loose_object(
    layout: &RepoLayout,
    id: &CommitId,
    data: &[u8],
) -> Result<(), StoreError> {
    let path = loose_object_path(layout, id);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, data)?;
    Ok(())
}
