//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. Build it
//! once at startup — usually by handing a menu to [`Toto`](crate::Toto) and
//! chaining any extra hand-written routes on the result — then pass it to
//! [`Server::serve`](crate::Server::serve).

use std::collections::HashMap;
use std::sync::Arc;

use http::{Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// The application router.
///
/// Each registration method returns `self` so calls chain naturally:
///
/// ```rust,no_run
/// use toto::{Request, Response, Router};
///
/// # async fn export(_: Request) -> Response { Response::text("") }
/// let app = Router::new()
///     .get("/export.csv", export);
/// ```
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new() }
    }

    /// Registers a handler for a method + path pair.
    ///
    /// Path parameters use `{name}` syntax; `{*name}` captures the rest of
    /// the path, slashes included. `req.param("name")` retrieves either.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid pattern or conflicts with an existing
    /// route — a programming error worth failing loudly at startup.
    pub fn on(self, method: Method, path: &str, handler: impl Handler) -> Self {
        match self.try_on(method, path, handler) {
            Ok(router) => router,
            Err(e) => panic!("{e}"),
        }
    }

    /// `on(Method::GET, …)`.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// `on(Method::POST, …)`.
    pub fn post(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::POST, path, handler)
    }

    /// Fallible registration — how generated menu routes are added, so a
    /// conflict surfaces as a startup [`Error`] instead of a panic.
    pub(crate) fn try_on(
        mut self,
        method: Method,
        path: &str,
        handler: impl Handler,
    ) -> Result<Self, Error> {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .map_err(|source| Error::Route { path: path.to_owned(), source })?;
        Ok(self)
    }

    /// Routes one request to a response.
    ///
    /// This is the whole dispatch path — [`Server`](crate::Server) calls it
    /// per request, and tests call it directly to exercise an application
    /// without opening a socket. An unmatched path is `404 Not Found`.
    pub async fn route(&self, mut req: Request) -> Response {
        match self.lookup(req.method().clone(), req.path()) {
            Some((handler, params)) => {
                req.set_params(params);
                handler.call(req).await
            }
            None => Response::status(StatusCode::NOT_FOUND),
        }
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched
            .params
            .iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn matched_route_runs_its_handler() {
        let app = Router::new().get("/ping", |_req: Request| async { Response::text("pong") });
        let res = app.route(Request::get("/ping")).await;
        assert_eq!(res.status_code(), StatusCode::OK);
        assert_eq!(res.body(), b"pong");
    }

    #[tokio::test]
    async fn unmatched_path_is_404() {
        let app = Router::new();
        let res = app.route(Request::get("/nowhere")).await;
        assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn catch_all_param_keeps_slashes() {
        let app = Router::new().get("/files/{*path}", |req: Request| async move {
            Response::text(req.param("path").unwrap_or_default().to_owned())
        });
        let res = app.route(Request::get("/files/a/b/c")).await;
        assert_eq!(res.body(), b"a/b/c");
    }

    #[test]
    fn conflicting_route_panics() {
        let result = std::panic::catch_unwind(|| {
            Router::new()
                .get("/x", |_req: Request| async { Response::text("1") })
                .get("/x", |_req: Request| async { Response::text("2") })
        });
        assert!(result.is_err());
    }
}
