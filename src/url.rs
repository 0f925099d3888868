//! Base URL resolution.
//!
//! Every image URL is `base + relative_path`, plain concatenation. The base
//! comes from one of three sources, matching the three ways the generator is
//! invoked:
//!
//! - **Static**: the configured `url.base`.
//! - **Verbatim**: a prefix passed on the command line.
//! - **Version**: a version identifier substituted into `url.template`.
//!
//! ## Version Templates
//!
//! `{version}` expands to the argument. `{ref}` expands to `tags` when the
//! version starts with `v` (a release tag such as `v1.2.3`) and to `heads`
//! otherwise (a branch such as `main`):
//!
//! ```text
//! .../refs/{ref}/{version}/src/img/
//!   v1.2.3 → .../refs/tags/v1.2.3/src/img/
//!   main   → .../refs/heads/main/src/img/
//! ```
//!
//! A template without `{ref}` simply never branches.
//!
//! The base is expected to end with `/`. That is not enforced here; callers
//! can check [`needs_trailing_slash`] and warn.

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UrlError {
    #[error("version must not be empty")]
    EmptyVersion,
}

/// Git ref namespace for release tags.
pub const TAGS_REF: &str = "tags";
/// Git ref namespace for branches.
pub const HEADS_REF: &str = "heads";

/// Where the base URL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlSource {
    /// Fixed prefix from configuration.
    Static(String),
    /// Prefix given on the command line, used as-is.
    Verbatim(String),
    /// Prefix computed from a version identifier.
    Version {
        template: VersionTemplate,
        version: String,
    },
}

impl UrlSource {
    /// Produce the base URL string.
    pub fn resolve(&self) -> Result<String, UrlError> {
        match self {
            UrlSource::Static(base) | UrlSource::Verbatim(base) => Ok(base.clone()),
            UrlSource::Version { template, version } => template.render(version),
        }
    }
}

/// A URL template with `{version}` and optional `{ref}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTemplate(String);

impl VersionTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Substitute `version` (and its ref namespace) into the template.
    pub fn render(&self, version: &str) -> Result<String, UrlError> {
        if version.is_empty() {
            return Err(UrlError::EmptyVersion);
        }
        Ok(self
            .0
            .replace("{ref}", ref_for_version(version))
            .replace("{version}", version))
    }
}

/// `tags` for versions starting with `v`, `heads` for everything else.
pub fn ref_for_version(version: &str) -> &'static str {
    if version.starts_with('v') {
        TAGS_REF
    } else {
        HEADS_REF
    }
}

/// True when simple concatenation with a relative path would glue the last
/// base segment onto the first path segment.
pub fn needs_trailing_slash(base: &str) -> bool {
    !base.is_empty() && !base.ends_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    const GIT_TEMPLATE: &str =
        "https://raw.githubusercontent.com/kalibrado/jf-avatars/refs/{ref}/{version}/src/img/";

    #[test]
    fn release_version_selects_tags() {
        let url = VersionTemplate::new(GIT_TEMPLATE).render("v1.2.3").unwrap();
        assert_eq!(
            url,
            "https://raw.githubusercontent.com/kalibrado/jf-avatars/refs/tags/v1.2.3/src/img/"
        );
    }

    #[test]
    fn branch_name_selects_heads() {
        let url = VersionTemplate::new(GIT_TEMPLATE).render("main").unwrap();
        assert_eq!(
            url,
            "https://raw.githubusercontent.com/kalibrado/jf-avatars/refs/heads/main/src/img/"
        );
    }

    #[test]
    fn ref_branching_is_case_sensitive() {
        assert_eq!(ref_for_version("v2"), TAGS_REF);
        assert_eq!(ref_for_version("V2"), HEADS_REF);
        assert_eq!(ref_for_version("1.0.0"), HEADS_REF);
    }

    #[test]
    fn flat_template_ignores_ref() {
        let template = VersionTemplate::new("https://cdn.jsdelivr.net/gh/kalibrado/jf-avatars@{version}/src/img/");
        assert_eq!(
            template.render("v1.0.0").unwrap(),
            "https://cdn.jsdelivr.net/gh/kalibrado/jf-avatars@v1.0.0/src/img/"
        );
        assert_eq!(
            template.render("main").unwrap(),
            "https://cdn.jsdelivr.net/gh/kalibrado/jf-avatars@main/src/img/"
        );
    }

    #[test]
    fn version_with_placeholder_text_is_not_reexpanded() {
        let url = VersionTemplate::new("/{version}/").render("{ref}").unwrap();
        assert_eq!(url, "/{ref}/");
    }

    #[test]
    fn empty_version_is_error() {
        assert_eq!(
            VersionTemplate::new(GIT_TEMPLATE).render(""),
            Err(UrlError::EmptyVersion)
        );
    }

    #[test]
    fn static_and_verbatim_sources_pass_through() {
        assert_eq!(
            UrlSource::Static("/web/avatars/avatars/".into()).resolve().unwrap(),
            "/web/avatars/avatars/"
        );
        assert_eq!(
            UrlSource::Verbatim("https://x.test/img".into()).resolve().unwrap(),
            "https://x.test/img"
        );
    }

    #[test]
    fn version_source_renders_template() {
        let source = UrlSource::Version {
            template: VersionTemplate::new(GIT_TEMPLATE),
            version: "develop".into(),
        };
        assert!(source.resolve().unwrap().contains("/refs/heads/develop/"));
    }

    #[test]
    fn trailing_slash_check() {
        assert!(!needs_trailing_slash("/web/avatars/"));
        assert!(needs_trailing_slash("https://x.test/img"));
        assert!(!needs_trailing_slash(""));
    }
}
