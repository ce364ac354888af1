//! Incoming HTTP request type.

use std::collections::HashMap;

use bytes::Bytes;
use http::request::Parts;
use http::{HeaderMap, Method};

/// An incoming HTTP request with its body already collected.
pub struct Request {
    parts: Parts,
    body: Bytes,
    params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn from_parts(parts: Parts, body: Bytes) -> Self {
        Self { parts, body, params: HashMap::new() }
    }

    pub(crate) fn set_params(&mut self, params: HashMap<String, String>) {
        self.params = params;
    }

    /// Builds a bodyless GET request — for tests and embedded dispatch via
    /// [`Router::route`](crate::Router::route).
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid URI path.
    pub fn get(path: &str) -> Self {
        let (parts, ()) = http::Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(())
            .expect("invalid request path")
            .into_parts();
        Self::from_parts(parts, Bytes::new())
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// The raw query string, without the `?`.
    pub fn query(&self) -> Option<&str> {
        self.parts.uri.query()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Case-insensitive header lookup; `None` for absent or non-UTF-8 values.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/users/{id}`, `req.param("id")` on `/users/42` returns
    /// `Some("42")`. Catch-all captures (`{*key}`) keep their inner slashes.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_builds_a_bodyless_request() {
        let req = Request::get("/beer/search?q=stout");
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.path(), "/beer/search");
        assert_eq!(req.query(), Some("q=stout"));
        assert!(req.body().is_empty());
        assert_eq!(req.param("key"), None);
    }
}
