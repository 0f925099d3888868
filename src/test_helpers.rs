//! Shared test utilities.
//!
//! Builds throwaway image trees and provides a default generator setup so
//! tests can read like the scenario they describe:
//!
//! ```rust
//! let tmp = image_tree(&["animals/fox-1.png", "animals/fox-2.png"]);
//! let manifest = build_with(tmp.path(), TagPolicy::TopDirectory);
//! assert_eq!(manifest.options, vec!["animals"]);
//! ```

use std::fs;
use std::path::Path;
use tempfile::TempDir;

use crate::manifest::{Manifest, ManifestBuilder, Order};
use crate::scan::scan;
use crate::config::ManifestConfig;
use crate::tags::{RootFiles, TagPolicy};

/// Base URL used throughout the tests.
pub const TEST_BASE: &str = "/web/avatars/avatars/";

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp directory holding one small file per relative path.
///
/// Parent directories are created as needed.
pub fn image_tree(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    add_files(tmp.path(), paths);
    tmp
}

/// Add files to an existing tree.
pub fn add_files(root: &Path, paths: &[&str]) {
    for rel in paths {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"fake image").unwrap();
    }
}

// =========================================================================
// Pipeline shortcuts
// =========================================================================

/// Scan `root` with default extensions and assemble a sorted manifest.
pub fn build_with(root: &Path, policy: TagPolicy) -> Manifest {
    build_full(root, policy, RootFiles::FileName, Order::Sorted)
}

/// Scan and assemble with every policy spelled out.
pub fn build_full(root: &Path, policy: TagPolicy, root_files: RootFiles, order: Order) -> Manifest {
    let entries = scan(root, &ManifestConfig::default().extensions).unwrap();
    ManifestBuilder::new(TEST_BASE, policy)
        .root_files(root_files)
        .order(order)
        .extend(entries)
        .build()
}
