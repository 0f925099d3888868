//! JavaScript module rendering and output.
//!
//! Stage 3 of the generator. The manifest becomes an ES module exporting a
//! single constants object:
//!
//! ```text
//!
//! export const constants = {
//!
//!     srcImages: [
//!     "/web/avatars/avatars/animals/fox-1.png"
//! ],
//!     options: [
//!     "fox"
//! ]
//!
//! }
//! ```
//!
//! The arrays are JSON with a 4-space indent, spliced in after the field
//! name without re-indenting, and non-ASCII text is written as-is. Empty
//! lists render as `[]`. An optional JSDoc block precedes the export.
//!
//! Writing truncates the target and writes it in one call. The write is not
//! atomic and the parent directory must already exist.

use crate::config::OutputConfig;
use crate::manifest::Manifest;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

const JSDOC_HEADER: &str = "/**
 * Image catalogue for the avatar picker.
 *
 * Generated by gallery-manifest from the image directory; edits are lost on
 * the next run.
 *
 * @typedef {Object} Constants
 * @property {Array<string>} srcImages - Full URL of every available image.
 * @property {Array<string>} options - Category tags used to filter images.
 *
 * @const {Constants}
 */
";

/// Serialize `items` as a JSON array indented by four spaces.
pub fn json_array(items: &[String]) -> Result<String, RenderError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    items.serialize(&mut ser)?;
    // serde_json only ever emits valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Render the full module text for `manifest`.
pub fn render_module(manifest: &Manifest, output: &OutputConfig) -> Result<String, RenderError> {
    let src_images = json_array(&manifest.src_images)?;
    let options = json_array(&manifest.options)?;
    let header = if output.header { JSDOC_HEADER } else { "" };

    Ok(format!(
        "\n{header}export const {name} = {{\n\n    srcImages: {src_images},\n    options: {options}\n\n}}\n",
        name = output.export_name,
    ))
}

/// Overwrite `path` with `contents`.
pub fn write_module(path: &Path, contents: &str) -> Result<(), RenderError> {
    fs::write(path, contents).map_err(|source| RenderError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = contents.len(), "module written");
    Ok(())
}
