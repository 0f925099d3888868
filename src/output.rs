//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` and a
//! `print_*` wrapper. Format functions are pure, so tests assert on lines
//! instead of capturing stdout.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Images (src/img)
//! 001 /web/avatars/avatars/animals/fox-1.png
//! 002 /web/avatars/avatars/animals/fox-2.png
//!
//! Options
//! 001 fox
//!
//! 2 images, 1 option
//! ```
//!
//! ## Generate
//!
//! ```text
//! 2 images, 1 option
//! File src/js/constants.js updated successfully.
//! ```
//!
//! Warnings go to stderr, one `warning:` line each.

use crate::generate::Generated;
use crate::manifest::{Manifest, ManifestWarning};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// One-line count summary.
pub fn summary_line(manifest: &Manifest) -> String {
    format!(
        "{}, {}",
        plural(manifest.src_images.len(), "image"),
        plural(manifest.options.len(), "option")
    )
}

fn indexed_section(lines: &mut Vec<String>, title: String, items: &[String]) {
    lines.push(title);
    for (i, item) in items.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), item));
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the `check` command output: both lists and a summary.
pub fn format_check_output(manifest: &Manifest, images_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    indexed_section(
        &mut lines,
        format!("Images ({})", images_dir.display()),
        &manifest.src_images,
    );
    lines.push(String::new());
    indexed_section(&mut lines, "Options".to_string(), &manifest.options);
    lines.push(String::new());
    lines.push(summary_line(manifest));
    lines
}

pub fn print_check_output(manifest: &Manifest, images_dir: &Path) {
    for line in format_check_output(manifest, images_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// generate
// ============================================================================

/// Format the output of a successful generation run.
pub fn format_generate_output(generated: &Generated) -> Vec<String> {
    vec![
        summary_line(&generated.manifest),
        format!(
            "File {} updated successfully.",
            generated.output_path.display()
        ),
    ]
}

pub fn print_generate_output(generated: &Generated) {
    for line in format_generate_output(generated) {
        println!("{}", line);
    }
}

// ============================================================================
// warnings
// ============================================================================

pub fn format_warnings(warnings: &[ManifestWarning]) -> Vec<String> {
    warnings.iter().map(|w| format!("warning: {w}")).collect()
}

/// Print warnings to stderr.
pub fn print_warnings(warnings: &[ManifestWarning]) {
    for line in format_warnings(warnings) {
        eprintln!("{}", line);
    }
}
