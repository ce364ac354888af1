//! Menu → route-table expansion.
//!
//! This is the one genuinely interesting transform in the crate: a validated
//! [`Menu`] becomes a flat list of route descriptors. Expansion is a pure
//! function of the menu, the path prefix, and the template resolver — it
//! registers nothing, opens no sockets, and (with [`NoTemplates`]) touches
//! no filesystem, which is what makes the properties below unit-testable.
//!
//! Per object `o`, in menu order:
//!
//! | route | answers with |
//! |---|---|
//! | `{prefix}/{o}/{m}` for each many-action `m` | collection page |
//! | `{prefix}/{o}` | redirect to `{prefix}/{o}/{many[0]}` |
//! | `{prefix}/{o}/{n}/{*key}` for each one-action `n` | instance page |
//! | `{prefix}/{o}/default/{*key}` | redirect to `{prefix}/{o}/{one[0]}/{key}` |
//!
//! plus, once, `{prefix}/` redirecting to the first object. The `{*key}`
//! capture is a trailing catch-all: a key may itself contain `/`.
//!
//! List order is a strict invariant. The first many-action is the object's
//! default; swapping two actions swaps both the tab order and the redirect
//! target.
//!
//! An object whose `one` list is empty gets no default alias route: the
//! alias would have no target. Expansion logs a warning and moves on rather
//! than failing the whole menu.
//!
//! [`NoTemplates`]: crate::template::NoTemplates

use tracing::warn;

use crate::menu::Menu;
use crate::template::{TemplateRef, TemplateResolver};

/// Whether a route addresses the whole collection or a single instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    /// No instance selected: list, search, create.
    Collection,
    /// A single instance addressed by the trailing key: view, edit.
    Instance,
}

impl Arity {
    /// Name of the generic scaffold for this arity.
    pub fn scaffold_name(self) -> &'static str {
        match self {
            Self::Collection => "plural",
            Self::Instance => "single",
        }
    }
}

/// What a generated route does when matched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteKind {
    /// Renders a page: dispatch to a registered controller, else the
    /// resolved template, else the scaffold.
    Page {
        object: String,
        action: String,
        arity: Arity,
        template: TemplateRef,
    },
    /// Answers `302 Found`. A literal `{key}` in the target is replaced by
    /// the captured key at request time.
    Redirect { target: String },
}

/// One generated route: a matchit pattern plus its behavior.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TabRoute {
    /// Route pattern in matchit syntax (`{*key}` is the trailing capture).
    pub path: String,
    pub kind: RouteKind,
}

impl TabRoute {
    fn page(path: String, object: &str, action: &str, arity: Arity, template: TemplateRef) -> Self {
        Self {
            path,
            kind: RouteKind::Page {
                object: object.to_owned(),
                action: action.to_owned(),
                arity,
                template,
            },
        }
    }

    fn redirect(path: String, target: String) -> Self {
        Self { path, kind: RouteKind::Redirect { target } }
    }
}

/// Expands `menu` into its full route table.
///
/// `prefix` must be empty or start with `/` and not end with one —
/// [`Toto::prefix`](crate::Toto::prefix) normalizes this. Templates are
/// resolved here, once, with no key; per-instance overrides are a
/// request-time concern.
///
/// Expanding the same menu twice yields an identical vector, so remounting
/// against a fresh router never accumulates routes.
pub fn expand(menu: &Menu, prefix: &str, templates: &dyn TemplateResolver) -> Vec<TabRoute> {
    let mut routes = Vec::new();

    routes.push(TabRoute::redirect(
        format!("{prefix}/"),
        format!("{prefix}/{}", menu.first().name()),
    ));
    if !prefix.is_empty() {
        // serve the bare prefix too, so `/admin` works like `/admin/`
        routes.push(TabRoute::redirect(
            prefix.to_owned(),
            format!("{prefix}/{}", menu.first().name()),
        ));
    }

    for entry in menu.entries() {
        let object = entry.name();

        for action in entry.many() {
            let template = templates.resolve(object, action, Arity::Collection, None);
            routes.push(TabRoute::page(
                format!("{prefix}/{object}/{action}"),
                object,
                action,
                Arity::Collection,
                template,
            ));
        }
        // menu validation guarantees many() is non-empty
        routes.push(TabRoute::redirect(
            format!("{prefix}/{object}"),
            format!("{prefix}/{object}/{}", entry.many()[0]),
        ));

        for action in entry.one() {
            let template = templates.resolve(object, action, Arity::Instance, None);
            routes.push(TabRoute::page(
                format!("{prefix}/{object}/{action}/{{*key}}"),
                object,
                action,
                Arity::Instance,
                template,
            ));
        }
        match entry.one().first() {
            Some(first) => routes.push(TabRoute::redirect(
                format!("{prefix}/{object}/default/{{*key}}"),
                format!("{prefix}/{object}/{first}/{{key}}"),
            )),
            None => warn!(object, "no instance actions, skipping default alias route"),
        }
    }

    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::Menu;
    use crate::template::NoTemplates;

    fn beer_pub() -> Menu {
        Menu::builder()
            .object("beer", ["search", "browse"], ["picture"])
            .object("pub", ["map"], ["info"])
            .build()
            .unwrap()
    }

    fn paths(routes: &[TabRoute]) -> Vec<&str> {
        routes.iter().map(|r| r.path.as_str()).collect()
    }

    fn redirect_target<'a>(routes: &'a [TabRoute], path: &str) -> &'a str {
        match &routes.iter().find(|r| r.path == path).expect("route exists").kind {
            RouteKind::Redirect { target } => target,
            other => panic!("{path} is not a redirect: {other:?}"),
        }
    }

    #[test]
    fn route_count_per_object() {
        // per object: 1 redirect + |many| + |one| + alias-iff-one-nonempty,
        // plus the global root
        let routes = expand(&beer_pub(), "", &NoTemplates);
        assert_eq!(routes.len(), 1 + (1 + 2 + 1 + 1) + (1 + 1 + 1 + 1));
    }

    #[test]
    fn full_beer_pub_surface() {
        let routes = expand(&beer_pub(), "", &NoTemplates);
        assert_eq!(
            paths(&routes),
            [
                "/",
                "/beer/search",
                "/beer/browse",
                "/beer",
                "/beer/picture/{*key}",
                "/beer/default/{*key}",
                "/pub/map",
                "/pub",
                "/pub/info/{*key}",
                "/pub/default/{*key}",
            ],
        );
        assert_eq!(redirect_target(&routes, "/"), "/beer");
        assert_eq!(redirect_target(&routes, "/beer"), "/beer/search");
        assert_eq!(redirect_target(&routes, "/pub"), "/pub/map");
        assert_eq!(redirect_target(&routes, "/beer/default/{*key}"), "/beer/picture/{key}");
    }

    #[test]
    fn default_follows_declaration_order() {
        let reordered = Menu::builder()
            .object("beer", ["browse", "search"], Vec::<String>::new())
            .build()
            .unwrap();
        let routes = expand(&reordered, "", &NoTemplates);
        assert_eq!(redirect_target(&routes, "/beer"), "/beer/browse");
    }

    #[test]
    fn empty_one_list_skips_the_alias() {
        let menu = Menu::builder()
            .object("pub", ["map"], Vec::<String>::new())
            .build()
            .unwrap();
        let routes = expand(&menu, "", &NoTemplates);
        assert!(!routes.iter().any(|r| r.path.contains("/default/")));
        assert_eq!(paths(&routes), ["/", "/pub/map", "/pub"]);
    }

    #[test]
    fn prefix_is_prepended_everywhere() {
        let routes = expand(&beer_pub(), "/admin", &NoTemplates);
        assert!(routes.iter().all(|r| r.path.starts_with("/admin")));
        assert_eq!(redirect_target(&routes, "/admin/"), "/admin/beer");
        assert_eq!(redirect_target(&routes, "/admin"), "/admin/beer");
        assert_eq!(redirect_target(&routes, "/admin/beer"), "/admin/beer/search");
    }

    #[test]
    fn expansion_is_idempotent() {
        let menu = beer_pub();
        assert_eq!(expand(&menu, "", &NoTemplates), expand(&menu, "", &NoTemplates));
    }

    #[test]
    fn pages_scaffold_without_templates() {
        let routes = expand(&beer_pub(), "", &NoTemplates);
        for route in &routes {
            if let RouteKind::Page { arity, template, .. } = &route.kind {
                assert_eq!(*template, TemplateRef::Scaffold(*arity));
            }
        }
    }
}
