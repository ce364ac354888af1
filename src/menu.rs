//! The declarative menu: objects and their action lists.
//!
//! A menu is the whole configuration surface of toto. Each entry names one
//! navigable object (`beer`, `pub`, …) together with two ordered action
//! lists:
//!
//! - `many` — collection actions, valid with no instance selected
//!   (`search`, `browse`, `create`)
//! - `one` — instance actions, valid only with a key in the URL
//!   (`view`, `edit`, `picture`)
//!
//! Order is load-bearing, not cosmetic: entry order is nav-bar order, and
//! the first `many` action of each object is the target of that object's
//! default redirect. Reordering a list changes where `/{object}` lands.
//!
//! A [`Menu`] is validated once, at construction, and immutable afterwards.
//! Every invalid declaration is a hard startup error — a menu that cannot
//! produce a working route table must never reach `serve`.

use serde::Deserialize;

use crate::error::Error;

/// One navigable object and its action lists.
///
/// Derives `Deserialize` so a host can keep its menu in a JSON or TOML file:
///
/// ```json
/// [
///   { "name": "beer", "many": ["search", "browse"], "one": ["picture"] },
///   { "name": "pub",  "many": ["map"] }
/// ]
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct MenuEntry {
    name: String,
    #[serde(default)]
    many: Vec<String>,
    #[serde(default)]
    one: Vec<String>,
}

impl MenuEntry {
    pub fn new(
        name: impl Into<String>,
        many: impl IntoIterator<Item = impl Into<String>>,
        one: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            many: many.into_iter().map(Into::into).collect(),
            one: one.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Collection actions, in tab order. The first is the object's default.
    pub fn many(&self) -> &[String] {
        &self.many
    }

    /// Instance actions, in tab order.
    pub fn one(&self) -> &[String] {
        &self.one
    }
}

/// An ordered, validated set of [`MenuEntry`] values.
///
/// Construct with [`Menu::builder`] or [`Menu::from_entries`]; both run the
/// same validation. The first entry is the landing object the root route
/// redirects to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    pub fn builder() -> MenuBuilder {
        MenuBuilder { entries: Vec::new() }
    }

    /// Validates `entries` and produces a menu.
    ///
    /// Fails fast on: an empty menu, an object with no `many` actions, a
    /// duplicated object name, an action name reused within one object's
    /// tab rows, a name that is not a valid URL segment, or an instance
    /// action named `default` (that segment is taken by the alias route).
    pub fn from_entries(entries: Vec<MenuEntry>) -> Result<Self, Error> {
        if entries.is_empty() {
            return Err(Error::EmptyMenu);
        }
        let mut seen_objects = Vec::new();
        for entry in &entries {
            validate_name(&entry.name)?;
            if seen_objects.contains(&entry.name.as_str()) {
                return Err(Error::DuplicateObject(entry.name.clone()));
            }
            seen_objects.push(&entry.name);

            if entry.many.is_empty() {
                return Err(Error::NoCollectionActions(entry.name.clone()));
            }
            let mut seen_actions = Vec::new();
            for action in entry.many.iter().chain(&entry.one) {
                validate_name(action)?;
                if seen_actions.contains(&action.as_str()) {
                    return Err(Error::DuplicateAction {
                        object: entry.name.clone(),
                        action: action.clone(),
                    });
                }
                seen_actions.push(action);
            }
            if entry.one.iter().any(|a| a == "default") {
                return Err(Error::ReservedName(entry.name.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Parses a JSON array of entries (see [`MenuEntry`]) and validates it.
    pub fn from_json(bytes: &[u8]) -> Result<Self, Error> {
        let entries: Vec<MenuEntry> = serde_json::from_slice(bytes)?;
        Self::from_entries(entries)
    }

    /// Entries in nav-bar order.
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entry(&self, object: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.name == object)
    }

    /// The landing object: where `GET /` redirects.
    pub fn first(&self) -> &MenuEntry {
        // from_entries rejects empty menus
        &self.entries[0]
    }
}

/// Fluent menu construction.
///
/// ```rust
/// use toto::Menu;
///
/// let menu = Menu::builder()
///     .object("beer", ["search", "browse"], ["picture"])
///     .object("pub", ["map"], ["info"])
///     .build()
///     .unwrap();
/// assert_eq!(menu.first().name(), "beer");
/// ```
pub struct MenuBuilder {
    entries: Vec<MenuEntry>,
}

impl MenuBuilder {
    /// Appends one object. Nav order follows call order.
    pub fn object(
        mut self,
        name: impl Into<String>,
        many: impl IntoIterator<Item = impl Into<String>>,
        one: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.entries.push(MenuEntry::new(name, many, one));
        self
    }

    pub fn build(self) -> Result<Menu, Error> {
        Menu::from_entries(self.entries)
    }
}

fn validate_name(name: &str) -> Result<(), Error> {
    let ok = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    if ok { Ok(()) } else { Err(Error::InvalidName(name.to_owned())) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, many: &[&str], one: &[&str]) -> MenuEntry {
        MenuEntry::new(name, many.iter().copied(), one.iter().copied())
    }

    #[test]
    fn valid_menu_builds() {
        let menu = Menu::builder()
            .object("beer", ["search", "browse"], ["picture"])
            .object("pub", ["map"], ["info"])
            .build()
            .unwrap();
        assert_eq!(menu.entries().len(), 2);
        assert_eq!(menu.first().name(), "beer");
        assert_eq!(menu.entry("pub").unwrap().many(), ["map"]);
    }

    #[test]
    fn empty_menu_is_rejected() {
        assert!(matches!(Menu::from_entries(vec![]), Err(Error::EmptyMenu)));
    }

    #[test]
    fn object_without_many_actions_is_rejected() {
        let err = Menu::from_entries(vec![entry("beer", &[], &["picture"])]).unwrap_err();
        assert!(matches!(err, Error::NoCollectionActions(name) if name == "beer"));
    }

    #[test]
    fn duplicate_object_is_rejected() {
        let err = Menu::from_entries(vec![
            entry("beer", &["search"], &[]),
            entry("beer", &["browse"], &[]),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateObject(name) if name == "beer"));
    }

    #[test]
    fn action_reused_across_tab_rows_is_rejected() {
        let err = Menu::from_entries(vec![entry("beer", &["view"], &["view"])]).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateAction { object, action } if object == "beer" && action == "view"
        ));
    }

    #[test]
    fn default_is_reserved_as_instance_action() {
        let err = Menu::from_entries(vec![entry("beer", &["search"], &["default"])]).unwrap_err();
        assert!(matches!(err, Error::ReservedName(name) if name == "beer"));
    }

    #[test]
    fn names_must_be_url_segments() {
        let err = Menu::from_entries(vec![entry("beer/ale", &["search"], &[])]).unwrap_err();
        assert!(matches!(err, Error::InvalidName(name) if name == "beer/ale"));
    }

    #[test]
    fn menu_loads_from_json() {
        let menu = Menu::from_json(
            br#"[{"name":"beer","many":["search"],"one":["picture"]},{"name":"pub","many":["map"]}]"#,
        )
        .unwrap();
        assert_eq!(menu.entries().len(), 2);
        assert!(menu.entry("pub").unwrap().one().is_empty());
    }
}
