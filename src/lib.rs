//! # Gallery Manifest
//!
//! Build-time generator for the constants module of the avatar gallery front
//! end. The image directory is the data source: every image file becomes a
//! URL in `srcImages`, and every image contributes a category tag to
//! `options`.
//!
//! # Pipeline
//!
//! ```text
//! 1. Scan      src/img/    →  [ImageEntry]          (recursive walk, suffix match)
//! 2. Assemble  entries     →  Manifest              (base URL + tags, dedupe, sort)
//! 3. Render    Manifest    →  src/js/constants.js   (ES module template)
//! ```
//!
//! Every run recomputes everything from the filesystem; nothing is cached
//! between runs. With the default sorted order, unchanged input always
//! yields a byte-identical file.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the image root and yields image entries |
//! | [`tags`] | Category tag policies (`filename-prefix`, `top-directory`) |
//! | [`url`] | Base URL sources: static, verbatim, version template |
//! | [`manifest`] | Stage 2: dedupes and orders URLs and tags, collects warnings |
//! | [`render`] | Stage 3: renders the ES module and writes it |
//! | [`generate`] | Runs all three stages |
//! | [`config`] | Layered `manifest.toml` loading and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Policies Are Configuration
//!
//! The generator grew out of several copies of one script that disagreed on
//! whether lists are sorted, where tags come from, and how the base URL is
//! built. Each of those is an explicit setting here (`order`, `tags.policy`,
//! `tags.root_files`, `url.base`, `url.template`) or a subcommand choice, so
//! two runs with the same config always mean the same thing.

pub mod config;
pub mod generate;
pub mod manifest;
pub mod output;
pub mod render;
pub mod scan;
pub mod tags;
pub mod url;

#[cfg(test)]
pub(crate) mod test_helpers;
