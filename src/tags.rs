//! Category tag derivation.
//!
//! Every image contributes at most one tag to the `options` list. Two
//! policies exist, selected by `tags.policy`:
//!
//! | Policy | `animals/fox-1.png` | `cat.png` (in root) |
//! |--------|---------------------|---------------------|
//! | `filename-prefix` | `fox` | `cat.png` |
//! | `top-directory` | `animals` | root-level, see [`RootFiles`] |
//!
//! Under `filename-prefix` a name with no `-` is its own tag, extension
//! included. Under `top-directory` a file sitting directly in the image root
//! has no directory to take its tag from; the extractor reports that case
//! instead of guessing, and [`RootFiles`] decides what the assembler does
//! with it.

use serde::{Deserialize, Serialize};

/// Which part of an image's path becomes its category tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TagPolicy {
    /// File name up to (not including) the first `-`.
    #[default]
    FilenamePrefix,
    /// First segment of the path relative to the image root.
    TopDirectory,
}

/// Handling of root-level files under [`TagPolicy::TopDirectory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RootFiles {
    /// Use the file name itself as the tag.
    #[default]
    #[serde(rename = "filename")]
    FileName,
    /// List the image but contribute no tag.
    Skip,
}

/// Result of deriving a tag from one relative path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// A usable, non-empty tag.
    Tag(String),
    /// `top-directory` applied to a file directly under the root. Carries
    /// the file name, which is what the first path segment degenerates to.
    RootLevel(String),
    /// The policy produced an empty string (e.g. `-foo.png`).
    Empty,
}

impl TagPolicy {
    /// Derive the tag for an image at `relative_path` (`/`-separated).
    pub fn extract(self, relative_path: &str) -> TagOutcome {
        match self {
            TagPolicy::FilenamePrefix => {
                let file_name = file_name(relative_path);
                let prefix = file_name.split('-').next().unwrap_or_default();
                non_empty(prefix)
            }
            TagPolicy::TopDirectory => match relative_path.split_once('/') {
                Some((first, _)) => non_empty(first),
                None if relative_path.is_empty() => TagOutcome::Empty,
                None => TagOutcome::RootLevel(relative_path.to_string()),
            },
        }
    }
}

fn file_name(relative_path: &str) -> &str {
    relative_path
        .rsplit_once('/')
        .map(|(_, name)| name)
        .unwrap_or(relative_path)
}

fn non_empty(tag: &str) -> TagOutcome {
    if tag.is_empty() {
        TagOutcome::Empty
    } else {
        TagOutcome::Tag(tag.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(value: &str) -> TagOutcome {
        TagOutcome::Tag(value.to_string())
    }

    // =========================================================================
    // filename-prefix
    // =========================================================================

    #[test]
    fn prefix_before_first_dash() {
        let policy = TagPolicy::FilenamePrefix;
        assert_eq!(policy.extract("animals/fox-1.png"), tag("fox"));
        assert_eq!(policy.extract("animals/fox-2.png"), tag("fox"));
        assert_eq!(policy.extract("marvel-iron-man.jpg"), tag("marvel"));
    }

    #[test]
    fn prefix_ignores_dashes_in_directories() {
        let policy = TagPolicy::FilenamePrefix;
        assert_eq!(policy.extract("star-wars/yoda.png"), tag("yoda.png"));
    }

    #[test]
    fn prefix_without_dash_is_whole_file_name() {
        assert_eq!(TagPolicy::FilenamePrefix.extract("cat.png"), tag("cat.png"));
    }

    #[test]
    fn prefix_leading_dash_is_empty() {
        assert_eq!(TagPolicy::FilenamePrefix.extract("misc/-odd.png"), TagOutcome::Empty);
    }

    // =========================================================================
    // top-directory
    // =========================================================================

    #[test]
    fn top_directory_is_first_segment() {
        let policy = TagPolicy::TopDirectory;
        assert_eq!(policy.extract("animals/fox-1.png"), tag("animals"));
        assert_eq!(policy.extract("disney/pixar/woody.png"), tag("disney"));
    }

    #[test]
    fn top_directory_root_file_is_reported() {
        assert_eq!(
            TagPolicy::TopDirectory.extract("fox-1.png"),
            TagOutcome::RootLevel("fox-1.png".to_string())
        );
    }

    #[test]
    fn top_directory_empty_path_is_empty() {
        assert_eq!(TagPolicy::TopDirectory.extract(""), TagOutcome::Empty);
    }

    #[test]
    fn policies_deserialize_from_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: TagPolicy,
            root_files: RootFiles,
        }
        let w: Wrapper =
            toml::from_str("policy = \"top-directory\"\nroot_files = \"skip\"").unwrap();
        assert_eq!(w.policy, TagPolicy::TopDirectory);
        assert_eq!(w.root_files, RootFiles::Skip);

        let w: Wrapper =
            toml::from_str("policy = \"filename-prefix\"\nroot_files = \"filename\"").unwrap();
        assert_eq!(w.policy, TagPolicy::FilenamePrefix);
        assert_eq!(w.root_files, RootFiles::FileName);
    }
}
