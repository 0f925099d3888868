//! Manifest assembly.
//!
//! Stage 2 of the generator. Turns scanned [`ImageEntry`] values into the two
//! lists the front end consumes:
//!
//! - `src_images`: `base + relative_path` for every image
//! - `options`: the set of category tags (see [`crate::tags`])
//!
//! Both lists are deduplicated. With [`Order::Sorted`] (the default) they are
//! sorted by byte value, so unchanged input always produces identical
//! output. [`Order::Discovered`] keeps first-seen scan order instead, which
//! depends on the filesystem; [`Manifest::is_sorted`] tells the two apart.
//!
//! Oddities in the input that do not stop the run are collected as
//! [`ManifestWarning`]s for the CLI to report.

use crate::config::ManifestConfig;
use crate::scan::{self, ImageEntry, ScanError};
use crate::tags::{RootFiles, TagOutcome, TagPolicy};
use crate::url::{self, UrlError, UrlSource};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum AssembleError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("Base URL error: {0}")]
    Url(#[from] UrlError),
}

/// Ordering applied to both output lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Order {
    /// Lexicographic by byte value.
    #[default]
    Sorted,
    /// First-seen scan order.
    Discovered,
}

/// Non-fatal observation made while assembling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestWarning {
    /// A file directly under the root, tagged with `top-directory`.
    RootLevelFile { path: String, tagged: bool },
    /// The tag policy produced an empty tag; the image has no tag.
    EmptyTag { path: String },
    /// The base URL does not end with `/`.
    BaseUrlWithoutTrailingSlash { base: String },
}

impl fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestWarning::RootLevelFile { path, tagged: true } => write!(
                f,
                "{path} is not inside a directory; using the file name as its tag"
            ),
            ManifestWarning::RootLevelFile { path, tagged: false } => {
                write!(f, "{path} is not inside a directory; no tag derived")
            }
            ManifestWarning::EmptyTag { path } => {
                write!(f, "{path} yields an empty tag; no tag derived")
            }
            ManifestWarning::BaseUrlWithoutTrailingSlash { base } => write!(
                f,
                "base URL {base:?} does not end with '/'; paths are appended as-is"
            ),
        }
    }
}

/// The generated pair of lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    /// Full image URLs.
    pub src_images: Vec<String>,
    /// Category tags, never empty strings.
    pub options: Vec<String>,
    /// Non-fatal issues found while assembling.
    pub warnings: Vec<ManifestWarning>,
}

impl Manifest {
    /// True when both lists are in canonical (sorted) order.
    pub fn is_sorted(&self) -> bool {
        is_strictly_ascending(&self.src_images) && is_strictly_ascending(&self.options)
    }
}

fn is_strictly_ascending(items: &[String]) -> bool {
    items.windows(2).all(|pair| pair[0] < pair[1])
}

/// Insertion-ordered set of strings.
#[derive(Debug, Default)]
struct UniqueList {
    seen: HashSet<String>,
    items: Vec<String>,
}

impl UniqueList {
    fn insert(&mut self, value: String) {
        if self.seen.insert(value.clone()) {
            self.items.push(value);
        }
    }

    fn into_vec(self, order: Order) -> Vec<String> {
        let mut items = self.items;
        if order == Order::Sorted {
            items.sort();
        }
        items
    }
}

/// Accumulates scanned entries into a [`Manifest`].
#[derive(Debug)]
pub struct ManifestBuilder {
    base: String,
    policy: TagPolicy,
    root_files: RootFiles,
    order: Order,
    images: UniqueList,
    options: UniqueList,
    warnings: Vec<ManifestWarning>,
}

impl ManifestBuilder {
    pub fn new(base: impl Into<String>, policy: TagPolicy) -> Self {
        Self {
            base: base.into(),
            policy,
            root_files: RootFiles::default(),
            order: Order::default(),
            images: UniqueList::default(),
            options: UniqueList::default(),
            warnings: Vec::new(),
        }
    }

    pub fn root_files(mut self, root_files: RootFiles) -> Self {
        self.root_files = root_files;
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.order = order;
        self
    }

    /// Add one image: its URL always, its tag when the policy yields one.
    pub fn add(&mut self, entry: &ImageEntry) {
        self.images
            .insert(format!("{}{}", self.base, entry.relative_path));

        match self.policy.extract(&entry.relative_path) {
            TagOutcome::Tag(tag) => self.options.insert(tag),
            TagOutcome::RootLevel(name) => {
                let tagged = self.root_files == RootFiles::FileName;
                if tagged {
                    self.options.insert(name);
                }
                self.warnings.push(ManifestWarning::RootLevelFile {
                    path: entry.relative_path.clone(),
                    tagged,
                });
            }
            TagOutcome::Empty => {
                debug!(path = %entry.relative_path, "empty tag");
                self.warnings.push(ManifestWarning::EmptyTag {
                    path: entry.relative_path.clone(),
                });
            }
        }
    }

    pub fn extend(mut self, entries: impl IntoIterator<Item = ImageEntry>) -> Self {
        for entry in entries {
            self.add(&entry);
        }
        self
    }

    pub fn build(self) -> Manifest {
        let mut warnings = Vec::with_capacity(self.warnings.len() + 1);
        if url::needs_trailing_slash(&self.base) {
            warnings.push(ManifestWarning::BaseUrlWithoutTrailingSlash {
                base: self.base.clone(),
            });
        }
        warnings.extend(self.warnings);

        Manifest {
            src_images: self.images.into_vec(self.order),
            options: self.options.into_vec(self.order),
            warnings,
        }
    }
}

/// Scan the configured image root and assemble the manifest for `source`.
///
/// The base URL is resolved before touching the filesystem so that a bad
/// version argument fails fast.
pub fn assemble(config: &ManifestConfig, source: &UrlSource) -> Result<Manifest, AssembleError> {
    let base = source.resolve()?;
    let entries = scan::scan(&config.images_dir, &config.extensions)?;

    let manifest = ManifestBuilder::new(base, config.tags.policy)
        .root_files(config.tags.root_files)
        .order(config.order)
        .extend(entries)
        .build();

    info!(
        images = manifest.src_images.len(),
        options = manifest.options.len(),
        warnings = manifest.warnings.len(),
        "manifest assembled"
    );
    Ok(manifest)
}
