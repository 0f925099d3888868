//! End-to-end run: scan → assemble → render → write.
//!
//! Everything that can fail before the write (base URL, scan, rendering)
//! fails before the output file is opened, so an aborted run leaves a
//! previous file untouched. Only an I/O failure during the write itself can
//! leave a truncated file behind.

use crate::config::ManifestConfig;
use crate::manifest::{self, AssembleError, Manifest};
use crate::render::{self, RenderError};
use crate::url::UrlSource;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Assemble(#[from] AssembleError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// What a successful run produced.
#[derive(Debug)]
pub struct Generated {
    pub manifest: Manifest,
    pub output_path: PathBuf,
}

/// Regenerate the constants module described by `config` using `source`
/// for the base URL.
pub fn generate(config: &ManifestConfig, source: &UrlSource) -> Result<Generated, GenerateError> {
    let manifest = manifest::assemble(config, source)?;
    let contents = render::render_module(&manifest, &config.output)?;
    render::write_module(&config.output.path, &contents)?;

    Ok(Generated {
        manifest,
        output_path: config.output.path.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::ScanError;
    use crate::tags::TagPolicy;
    use crate::test_helpers::*;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(images: &TempDir, out: &TempDir) -> ManifestConfig {
        let mut config = ManifestConfig::default();
        config.images_dir = images.path().to_path_buf();
        config.output.path = out.path().join("constants.js");
        config
    }

    #[test]
    fn writes_module_with_both_lists() {
        let images = image_tree(&["animals/fox-1.png", "animals/fox-2.png"]);
        let out = TempDir::new().unwrap();
        let mut config = config_for(&images, &out);
        config.output.header = false;

        let generated = generate(&config, &UrlSource::Static(TEST_BASE.into())).unwrap();
        assert_eq!(generated.output_path, out.path().join("constants.js"));

        let text = fs::read_to_string(&generated.output_path).unwrap();
        assert!(text.contains("\"/web/avatars/avatars/animals/fox-1.png\""));
        assert!(text.contains("options: [\n    \"fox\"\n]"));
    }

    #[test]
    fn sorted_runs_are_byte_identical() {
        let images = image_tree(&["z/z-1.png", "a/b-1.jpg", "m/m-1.gif", "a/a-1.svg"]);
        let out = TempDir::new().unwrap();
        let config = config_for(&images, &out);
        let source = UrlSource::Static(TEST_BASE.into());

        generate(&config, &source).unwrap();
        let first = fs::read(&config.output.path).unwrap();
        generate(&config, &source).unwrap();
        let second = fs::read(&config.output.path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn empty_image_dir_writes_empty_arrays() {
        let images = image_tree(&[]);
        let out = TempDir::new().unwrap();
        let config = config_for(&images, &out);

        generate(&config, &UrlSource::Static(TEST_BASE.into())).unwrap();
        let text = fs::read_to_string(&config.output.path).unwrap();
        assert!(text.contains("srcImages: [],\n    options: []"));
    }

    #[test]
    fn missing_image_dir_leaves_output_untouched() {
        let out = TempDir::new().unwrap();
        let mut config = ManifestConfig::default();
        config.images_dir = out.path().join("no-such-dir");
        config.output.path = out.path().join("constants.js");
        fs::write(&config.output.path, "previous").unwrap();

        let err = generate(&config, &UrlSource::Static(TEST_BASE.into())).unwrap_err();
        assert!(matches!(
            err,
            GenerateError::Assemble(AssembleError::Scan(ScanError::NotFound(_)))
        ));
        assert_eq!(fs::read_to_string(&config.output.path).unwrap(), "previous");
    }

    #[test]
    fn missing_output_dir_is_render_error() {
        let images = image_tree(&["fox-1.png"]);
        let out = TempDir::new().unwrap();
        let mut config = config_for(&images, &out);
        config.output.path = out.path().join("js/constants.js");

        let err = generate(&config, &UrlSource::Static(TEST_BASE.into())).unwrap_err();
        assert!(matches!(err, GenerateError::Render(RenderError::Write { .. })));
    }

    #[test]
    fn top_directory_policy_flows_through() {
        let images = image_tree(&["animals/fox-1.png", "animals/fox-2.png"]);
        let out = TempDir::new().unwrap();
        let mut config = config_for(&images, &out);
        config.tags.policy = TagPolicy::TopDirectory;

        let generated = generate(&config, &UrlSource::Static(TEST_BASE.into())).unwrap();
        assert_eq!(generated.manifest.options, vec!["animals"]);
    }
}
