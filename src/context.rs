//! Per-request navigation context.
//!
//! Built once per matched page route, handed to the controller and the
//! renderer, and dropped with the response. Never shared across requests.

use std::sync::Arc;

use crate::route::Arity;

/// The value object a key expands into.
///
/// By default this is a pure wrap of the key. Hosts that want their model
/// loaded before the controller runs install a [`ModelFactory`] that fills
/// `data` — anything `serde_json::Value` can carry.
#[derive(Clone, Debug, PartialEq)]
pub struct Instance {
    pub key: String,
    pub data: serde_json::Value,
}

impl Instance {
    /// The default factory: wraps the key, no data, no I/O.
    pub fn wrap(key: &str) -> Self {
        Self { key: key.to_owned(), data: serde_json::Value::Null }
    }
}

/// Builds an [`Instance`] from the key captured in the URL.
pub type ModelFactory = Arc<dyn Fn(&str) -> Instance + Send + Sync>;

/// Everything the templates and tab bars need to know about the current
/// request: which object, which action, and — on instance pages — which key.
#[derive(Clone, Debug)]
pub struct NavContext {
    pub object: String,
    pub action: String,
    pub arity: Arity,
    /// The captured key; `Some` exactly on instance pages.
    pub key: Option<String>,
    /// The instance the key expands into; `Some` exactly when `key` is.
    pub instance: Option<Instance>,
    /// The mount prefix, so rendered links stay inside the mount.
    pub prefix: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_is_a_pure_wrap() {
        let instance = Instance::wrap("42");
        assert_eq!(instance.key, "42");
        assert_eq!(instance.data, serde_json::Value::Null);
    }
}
