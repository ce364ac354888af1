//! The controller registry: explicit `(object, action)` → handler mapping.
//!
//! Dynamic languages resolve controllers by reflecting on a class named
//! after the object. Here the mapping is data: the host registers each
//! handler once at startup, routing consults the registry and nothing else.
//! [`conventional_type_name`] documents the naming convention for hosts
//! that generate their registrations (and for the scaffold pages, which
//! show the handler you *could* write).
//!
//! A controller is shaped like a route handler plus the navigation context:
//!
//! ```rust
//! use toto::{NavContext, Request, Response};
//!
//! async fn browse(_req: Request, ctx: NavContext) -> Response {
//!     Response::html(format!("all the {}s", ctx.object))
//! }
//! ```
//!
//! On instance pages `ctx.instance` holds the value the key expanded into.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::context::NavContext;
use crate::handler::BoxFuture;
use crate::request::Request;
use crate::response::IntoResponse;

/// Type-erased controller, same erasure scheme as route handlers but with
/// the [`NavContext`] threaded through.
pub(crate) trait ErasedController: Send + Sync {
    fn call(&self, req: Request, ctx: NavContext) -> BoxFuture;
}

struct FnController<F>(F);

impl<F, Fut, R> ErasedController for FnController<F>
where
    F: Fn(Request, NavContext) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request, ctx: NavContext) -> BoxFuture {
        let fut = (self.0)(req, ctx);
        Box::pin(async move { fut.await.into_response() })
    }
}

pub(crate) type BoxedController = Arc<dyn ErasedController>;

/// Registry of hand-written page handlers, keyed by `(object, action)`.
///
/// Routes without an entry here fall through to template resolution.
#[derive(Default)]
pub struct Controllers {
    actions: HashMap<(String, String), BoxedController>,
}

impl Controllers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `object`'s `action` page. Registering the
    /// same pair twice keeps the latest handler.
    pub fn register<F, Fut, R>(&mut self, object: &str, action: &str, handler: F)
    where
        F: Fn(Request, NavContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = R> + Send + 'static,
        R: IntoResponse + Send + 'static,
    {
        self.actions.insert(
            (object.to_owned(), action.to_owned()),
            Arc::new(FnController(handler)),
        );
    }

    pub fn contains(&self, object: &str, action: &str) -> bool {
        self.actions.contains_key(&(object.to_owned(), action.to_owned()))
    }

    pub(crate) fn get(&self, object: &str, action: &str) -> Option<BoxedController> {
        self.actions
            .get(&(object.to_owned(), action.to_owned()))
            .map(Arc::clone)
    }
}

/// The conventional controller type name for an object.
///
/// Splits `object` on non-alphanumeric separators, capitalizes each
/// segment, concatenates, and qualifies with `namespace` when one is set:
/// `conventional_type_name("app", "beer_style")` → `"app::BeerStyle"`.
pub fn conventional_type_name(namespace: &str, object: &str) -> String {
    let mut name = String::new();
    for segment in object.split(|c: char| !c.is_ascii_alphanumeric()) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.push_str(chars.as_str());
        }
    }
    if namespace.is_empty() {
        name
    } else {
        format!("{namespace}::{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::Response;
    use crate::route::Arity;

    fn ctx(object: &str, action: &str) -> NavContext {
        NavContext {
            object: object.to_owned(),
            action: action.to_owned(),
            arity: Arity::Collection,
            key: None,
            instance: None,
            prefix: String::new(),
        }
    }

    #[tokio::test]
    async fn registered_controller_is_found_and_called() {
        let mut controllers = Controllers::new();
        controllers.register("beer", "browse", |_req, ctx: NavContext| async move {
            Response::text(format!("{}:{}", ctx.object, ctx.action))
        });

        assert!(controllers.contains("beer", "browse"));
        assert!(!controllers.contains("beer", "search"));

        let handler = controllers.get("beer", "browse").unwrap();
        let res = handler.call(Request::get("/beer/browse"), ctx("beer", "browse")).await;
        assert_eq!(res.body(), b"beer:browse");
    }

    #[test]
    fn type_name_transform() {
        assert_eq!(conventional_type_name("", "beer"), "Beer");
        assert_eq!(conventional_type_name("", "beer_style"), "BeerStyle");
        assert_eq!(conventional_type_name("", "tasting-note"), "TastingNote");
        assert_eq!(conventional_type_name("app", "pub"), "app::Pub");
    }
}
