//! [`Toto`]: the builder that turns a menu into a mounted router.
//!
//! ```rust
//! use toto::{Menu, NavContext, Request, Response, Toto};
//!
//! async fn map(_req: Request, _ctx: NavContext) -> Response {
//!     Response::html("<ul><li>The Crown</li></ul>")
//! }
//!
//! let menu = Menu::builder()
//!     .object("beer", ["search", "browse"], ["picture"])
//!     .object("pub", ["map"], ["info"])
//!     .build()
//!     .unwrap();
//!
//! let app = Toto::new(menu)
//!     .controller("pub", "map", map)
//!     .into_router()
//!     .unwrap();
//! // Server::bind("0.0.0.0:3000").serve(app)
//! ```
//!
//! Every route the expansion produced is registered here exactly once, all
//! before the server starts. The resulting [`Router`] is immutable and
//! shared read-only across connection tasks; handlers reach the menu,
//! registry, resolver and renderer through one `Arc`, and build a fresh
//! [`NavContext`] per request — no state crosses requests.

use std::sync::Arc;

use http::Method;
use tracing::{debug, info, warn};

use crate::context::{Instance, ModelFactory, NavContext};
use crate::controller::Controllers;
use crate::error::Error;
use crate::menu::Menu;
use crate::render::{self, BasicRenderer, Renderer};
use crate::request::Request;
use crate::response::Response;
use crate::route::{Arity, RouteKind, TabRoute, expand};
use crate::router::Router;
use crate::template::{NoTemplates, TemplateRef, TemplateResolver};

/// Builder for a menu-driven application.
pub struct Toto {
    menu: Menu,
    prefix: String,
    namespace: String,
    templates: Arc<dyn TemplateResolver>,
    renderer: Option<Arc<dyn Renderer>>,
    controllers: Controllers,
    model: ModelFactory,
    resolve_per_request: bool,
}

impl Toto {
    /// Starts from a validated menu, with no prefix, no templates, no
    /// controllers — every page scaffolds until the host adds pieces.
    pub fn new(menu: Menu) -> Self {
        Self {
            menu,
            prefix: String::new(),
            namespace: String::new(),
            templates: Arc::new(NoTemplates),
            renderer: None,
            controllers: Controllers::new(),
            model: Arc::new(|key: &str| Instance::wrap(key)),
            resolve_per_request: false,
        }
    }

    /// Mounts every generated route under `prefix` (normalized to a leading
    /// and no trailing slash; `""` and `"/"` both mean the root).
    pub fn prefix(mut self, prefix: &str) -> Self {
        let trimmed = prefix.trim_matches('/');
        self.prefix = if trimmed.is_empty() { String::new() } else { format!("/{trimmed}") };
        self
    }

    /// Namespace qualifying conventional controller type names on scaffold
    /// pages (see [`conventional_type_name`](crate::conventional_type_name)).
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Replaces the template resolver (default: everything scaffolds).
    pub fn templates(mut self, resolver: impl TemplateResolver + 'static) -> Self {
        self.templates = Arc::new(resolver);
        self
    }

    /// Replaces the renderer (default: [`BasicRenderer`]).
    pub fn renderer(mut self, renderer: impl Renderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Replaces the model factory that expands a key into an [`Instance`]
    /// (default: a pure wrap of the key).
    pub fn model(mut self, factory: impl Fn(&str) -> Instance + Send + Sync + 'static) -> Self {
        self.model = Arc::new(factory);
        self
    }

    /// Re-resolves templates on every request instead of once at mount time.
    ///
    /// Off by default: mount-time resolution keeps requests free of
    /// filesystem probes and makes behavior predictable. Turn it on when
    /// per-instance override templates (`templates/{object}/{key}/…`) must
    /// be picked up, since those depend on a key no one knows until the
    /// request arrives.
    pub fn resolve_per_request(mut self, yes: bool) -> Self {
        self.resolve_per_request = yes;
        self
    }

    /// Registers a hand-written controller for `(object, action)`; such a
    /// page never falls through to templates or the scaffold.
    pub fn controller<F, Fut, R>(mut self, object: &str, action: &str, handler: F) -> Self
    where
        F: Fn(Request, NavContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = R> + Send + 'static,
        R: crate::response::IntoResponse + Send + 'static,
    {
        self.controllers.register(object, action, handler);
        self
    }

    /// Expands the menu and registers the result on a fresh router.
    pub fn into_router(self) -> Result<Router, Error> {
        self.mount(Router::new())
    }

    /// Expands the menu and registers the result on an existing router, so
    /// hand-written routes and a menu can share one tree.
    pub fn mount(self, mut router: Router) -> Result<Router, Error> {
        let routes = expand(&self.menu, &self.prefix, self.templates.as_ref());
        info!(routes = routes.len(), prefix = %self.prefix, "mounting menu");

        let renderer: Arc<dyn Renderer> = match self.renderer {
            Some(renderer) => renderer,
            None => Arc::new(BasicRenderer::new(self.namespace.clone())),
        };
        let shared = Arc::new(Shared {
            menu: self.menu,
            prefix: self.prefix,
            namespace: self.namespace,
            templates: self.templates,
            renderer,
            controllers: self.controllers,
            model: self.model,
            resolve_per_request: self.resolve_per_request,
        });

        for route in routes {
            debug!(path = %route.path, "registering menu route");
            router = register(router, &shared, route)?;
        }
        Ok(router)
    }
}

/// Mount-time state shared read-only by every generated handler.
struct Shared {
    menu: Menu,
    prefix: String,
    namespace: String,
    templates: Arc<dyn TemplateResolver>,
    renderer: Arc<dyn Renderer>,
    controllers: Controllers,
    model: ModelFactory,
    resolve_per_request: bool,
}

/// The per-route slice of a page descriptor, owned by its handler closure.
struct PageSpec {
    object: String,
    action: String,
    arity: Arity,
    template: TemplateRef,
}

fn register(router: Router, shared: &Arc<Shared>, route: TabRoute) -> Result<Router, Error> {
    match route.kind {
        RouteKind::Redirect { target } => {
            router.try_on(Method::GET, &route.path, move |req: Request| {
                let target = match req.param("key") {
                    Some(key) => target.replace("{key}", key),
                    None => target.clone(),
                };
                async move { Response::redirect(&target) }
            })
        }
        RouteKind::Page { object, action, arity, template } => {
            let shared = Arc::clone(shared);
            let page = Arc::new(PageSpec { object, action, arity, template });
            router.try_on(Method::GET, &route.path, move |req: Request| {
                let shared = Arc::clone(&shared);
                let page = Arc::clone(&page);
                async move { serve_page(shared, page, req).await }
            })
        }
    }
}

/// One matched page request: build the context, prefer the controller, fall
/// back to the template, and scaffold rather than ever answering 5xx.
async fn serve_page(shared: Arc<Shared>, page: Arc<PageSpec>, req: Request) -> Response {
    let key = req.param("key").map(str::to_owned);
    let instance = key.as_deref().map(|k| (shared.model)(k));
    let ctx = NavContext {
        object: page.object.clone(),
        action: page.action.clone(),
        arity: page.arity,
        key,
        instance,
        prefix: shared.prefix.clone(),
    };

    if let Some(controller) = shared.controllers.get(&page.object, &page.action) {
        return controller.call(req, ctx).await;
    }

    let template = if shared.resolve_per_request {
        shared
            .templates
            .resolve(&page.object, &page.action, page.arity, ctx.key.as_deref())
    } else {
        page.template.clone()
    };

    match shared.renderer.render(&shared.menu, &ctx, &template) {
        Ok(html) => Response::html(html),
        Err(e) => {
            warn!(
                object = %page.object,
                action = %page.action,
                "render failed, serving scaffold: {e}"
            );
            let body = render::scaffold_body(&ctx, page.arity, &shared.namespace);
            Response::html(render::layout(&shared.menu, &ctx, &body))
        }
    }
}
