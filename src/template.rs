//! Template resolution by convention.
//!
//! Routing never reads template files itself — it only decides *which*
//! template a page should use. That decision is this module's single trait
//! method, so the pure route-expansion logic stays unit-testable without a
//! filesystem, and hosts can swap in their own lookup (embedded assets, a
//! database, a template-engine registry).
//!
//! The stock resolver, [`FsTemplates`], probes conventional locations on
//! disk, most specific first:
//!
//! 1. `{root}/{object}/{key}/{action}.{ext}` — per-instance override, only
//!    when a concrete key is known
//! 2. `{root}/{object}/{action}.{ext}`
//! 3. `{root}/{action}.{ext}` — shared across objects
//! 4. the built-in scaffold page for the route's arity
//!
//! Resolution normally runs once, when the menu is mounted, so requests do
//! no filesystem I/O. Step 1 is the exception: the key is not known until a
//! request arrives, so per-instance overrides require opting in to
//! per-request resolution (`Toto::resolve_per_request`). The probe is a
//! read-only existence check and is safe to run from concurrent requests.

use std::path::PathBuf;

use crate::route::Arity;

/// The outcome of template resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateRef {
    /// A hand-written template file found at a conventional location.
    File(PathBuf),
    /// No hand-written page exists; render the generic scaffold.
    Scaffold(Arity),
}

/// Maps a route to the template that should render it.
pub trait TemplateResolver: Send + Sync {
    /// Resolves the template for `(object, action)` at the given arity.
    ///
    /// `key` is `Some` only when resolving at request time for an instance
    /// route; resolvers may use it to honor per-instance overrides.
    /// Implementations never fail — the scaffold is always a valid answer.
    fn resolve(&self, object: &str, action: &str, arity: Arity, key: Option<&str>) -> TemplateRef;
}

/// Resolver used when no template root is configured: every page scaffolds.
pub struct NoTemplates;

impl TemplateResolver for NoTemplates {
    fn resolve(&self, _: &str, _: &str, arity: Arity, _: Option<&str>) -> TemplateRef {
        TemplateRef::Scaffold(arity)
    }
}

/// The conventional filesystem resolver.
pub struct FsTemplates {
    root: PathBuf,
    ext: String,
}

impl FsTemplates {
    /// Probes for `.html` files under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_ext(root, "html")
    }

    /// Probes for `.{ext}` files under `root` — use this when the host's
    /// template engine has its own suffix (`hbs`, `tera`, …).
    pub fn with_ext(root: impl Into<PathBuf>, ext: impl Into<String>) -> Self {
        Self { root: root.into(), ext: ext.into() }
    }
}

impl TemplateResolver for FsTemplates {
    fn resolve(&self, object: &str, action: &str, arity: Arity, key: Option<&str>) -> TemplateRef {
        let file = format!("{action}.{}", self.ext);
        if arity == Arity::Instance {
            if let Some(key) = key {
                let candidate = self.root.join(object).join(key).join(&file);
                if candidate.is_file() {
                    return TemplateRef::File(candidate);
                }
            }
        }
        let candidate = self.root.join(object).join(&file);
        if candidate.is_file() {
            return TemplateRef::File(candidate);
        }
        let candidate = self.root.join(&file);
        if candidate.is_file() {
            return TemplateRef::File(candidate);
        }
        TemplateRef::Scaffold(arity)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn unknown_everything_scaffolds() {
        let dir = tempfile::tempdir().unwrap();
        let templates = FsTemplates::new(dir.path());
        assert_eq!(
            templates.resolve("beer", "search", Arity::Collection, None),
            TemplateRef::Scaffold(Arity::Collection),
        );
        assert_eq!(
            templates.resolve("beer", "picture", Arity::Instance, Some("42")),
            TemplateRef::Scaffold(Arity::Instance),
        );
    }

    #[test]
    fn object_specific_template_beats_shared() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("beer")).unwrap();
        fs::write(dir.path().join("browse.html"), "shared").unwrap();
        fs::write(dir.path().join("beer/browse.html"), "specific").unwrap();

        let templates = FsTemplates::new(dir.path());
        assert_eq!(
            templates.resolve("beer", "browse", Arity::Collection, None),
            TemplateRef::File(dir.path().join("beer/browse.html")),
        );
        // another object falls through to the shared one
        assert_eq!(
            templates.resolve("pub", "browse", Arity::Collection, None),
            TemplateRef::File(dir.path().join("browse.html")),
        );
    }

    #[test]
    fn per_instance_override_needs_a_key() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("beer/42")).unwrap();
        fs::write(dir.path().join("beer/42/picture.html"), "override").unwrap();

        let templates = FsTemplates::new(dir.path());
        assert_eq!(
            templates.resolve("beer", "picture", Arity::Instance, Some("42")),
            TemplateRef::File(dir.path().join("beer/42/picture.html")),
        );
        // registration-time resolution has no key and must not see it
        assert_eq!(
            templates.resolve("beer", "picture", Arity::Instance, None),
            TemplateRef::Scaffold(Arity::Instance),
        );
    }

    #[test]
    fn custom_extension_is_honored() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("map.hbs"), "{{pins}}").unwrap();

        let templates = FsTemplates::with_ext(dir.path(), "hbs");
        assert_eq!(
            templates.resolve("pub", "map", Arity::Collection, None),
            TemplateRef::File(dir.path().join("map.hbs")),
        );
    }
}
