//! Unified error type.
//!
//! Every variant except [`Error::Io`] is a configuration problem: it can only
//! occur while a menu is being validated or mounted, before the server
//! accepts a single request. Per-request conditions (a missing template, an
//! unmatched path) are never expressed as `Error`s — they resolve locally
//! into a response (scaffold page, redirect, or 404).

use std::path::PathBuf;

/// The error type returned by toto's fallible operations.
///
/// Configuration variants carry the offending object/action name so the
/// operator can fix the menu declaration directly from the message.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The menu declares no objects at all.
    #[error("menu is empty: declare at least one object")]
    EmptyMenu,

    /// An object has no collection actions, so it has no entry-point route.
    #[error("object `{0}` declares no collection (`many`) actions, so `/{0}` has nowhere to redirect")]
    NoCollectionActions(String),

    /// The same object name appears twice in the menu.
    #[error("object `{0}` is declared more than once")]
    DuplicateObject(String),

    /// An action name is reused within one object's tab rows.
    #[error("action `{action}` appears more than once on object `{object}`")]
    DuplicateAction { object: String, action: String },

    /// `default` is the alias segment for instance routes and cannot be an
    /// instance action name.
    #[error("object `{0}`: `default` is reserved and cannot be an instance action name")]
    ReservedName(String),

    /// Object and action names become URL segments, so they are restricted
    /// to lowercase alphanumerics, `_` and `-`.
    #[error("`{0}` is not a valid name: use lowercase alphanumerics, `_` or `-`")]
    InvalidName(String),

    /// A generated route collided with one already in the routing tree.
    #[error("cannot register route `{path}`: {source}")]
    Route {
        path: String,
        #[source]
        source: matchit::InsertError,
    },

    /// A template file existed at resolution time but could not be read.
    #[error("cannot read template `{path}`: {source}")]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The menu config file did not parse.
    #[error("invalid menu config: {0}")]
    Config(#[from] serde_json::Error),

    /// Infrastructure failure: binding a port or accepting a connection.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}
