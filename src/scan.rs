//! Image directory scanning.
//!
//! Stage 1 of the generator. Walks the image root recursively and yields
//! every file whose name ends with one of the configured extensions:
//!
//! ```text
//! src/img/                     # Image root
//! ├── cat.png                  # → "cat.png"
//! ├── notes.txt                # not an image, ignored
//! ├── animals/
//! │   ├── fox-1.png            # → "animals/fox-1.png"
//! │   └── fox-2.PNG            # suffix match is case-sensitive, ignored
//! └── empty/                   # contributes nothing
//! ```
//!
//! Relative paths always use `/`, whatever the platform separator, because
//! they end up inside URLs.
//!
//! The root must exist and be a directory; an unreadable entry anywhere in
//! the tree aborts the scan. Nothing is skipped for being hidden. An image
//! whose path is not valid UTF-8 cannot be written into a URL faithfully, so
//! it aborts the scan too.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Image directory not found: {0}")]
    NotFound(PathBuf),
    #[error("Image root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Image path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
}

/// An image file discovered under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEntry {
    /// Path relative to the image root, `/`-separated.
    pub relative_path: String,
}

/// Recursively collect image files under `root`.
///
/// Entries come back in `walkdir`'s per-directory name order. Callers that
/// need a canonical order sort afterwards.
pub fn scan(root: &Path, extensions: &[String]) -> Result<Vec<ImageEntry>, ScanError> {
    check_root(root)?;

    let mut images = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !is_file(&entry) {
            continue;
        }

        // Extensions are UTF-8, so a lossy name still matches on its suffix.
        if !has_image_extension(&entry.file_name().to_string_lossy(), extensions) {
            debug!(path = %entry.path().display(), "skipping non-image file");
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let relative_path = to_url_path(relative)
            .ok_or_else(|| ScanError::NonUtf8Path(entry.path().to_path_buf()))?;
        images.push(ImageEntry { relative_path });
    }

    debug!(root = %root.display(), count = images.len(), "scan complete");
    Ok(images)
}

fn check_root(root: &Path) -> Result<(), ScanError> {
    match std::fs::metadata(root) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(ScanError::NotADirectory(root.to_path_buf())),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(ScanError::NotFound(root.to_path_buf()))
        }
        Err(source) => Err(ScanError::Io {
            path: root.to_path_buf(),
            source,
        }),
    }
}

/// Regular files, plus symlinks that resolve to a file.
fn is_file(entry: &walkdir::DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}

/// Case-sensitive suffix match against the configured extensions.
pub fn has_image_extension(file_name: &str, extensions: &[String]) -> bool {
    extensions.iter().any(|ext| file_name.ends_with(ext.as_str()))
}

/// Join path components with `/`. `None` if any component is not UTF-8.
fn to_url_path(relative: &Path) -> Option<String> {
    let parts = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;
    Some(parts.join("/"))
}
