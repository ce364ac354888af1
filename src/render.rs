//! Rendering: the layout with its tab bars, and the scaffold fallback.
//!
//! toto is not a template engine and does not want to become one. The
//! [`Renderer`] trait is the seam to whatever the host renders with; the
//! built-in [`BasicRenderer`] does just enough to make a freshly declared
//! menu browsable — it reads hand-written template files with a trivial
//! `{{placeholder}}` substitution, generates scaffold pages for everything
//! else, and wraps both in a layout with two tab bars:
//!
//! - the object row: every menu object, current one marked active
//! - the action row: the current object's actions for the current arity
//!   (instance links carry the key along)
//!
//! Rendering never turns into a 5xx. If a template file vanished since
//! resolution, the caller logs it and falls back to the scaffold.

use crate::context::NavContext;
use crate::controller::conventional_type_name;
use crate::error::Error;
use crate::menu::Menu;
use crate::route::Arity;
use crate::template::TemplateRef;

/// Produces the HTML for one page.
pub trait Renderer: Send + Sync {
    /// Renders `template` for the current request. Errors are handled by
    /// the caller, which falls back to the scaffold page.
    fn render(&self, menu: &Menu, ctx: &NavContext, template: &TemplateRef) -> Result<String, Error>;
}

/// The built-in renderer.
pub struct BasicRenderer {
    namespace: String,
}

impl BasicRenderer {
    /// `namespace` only shows up in scaffold example code, qualifying the
    /// conventional controller type name.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self { namespace: namespace.into() }
    }
}

impl Renderer for BasicRenderer {
    fn render(&self, menu: &Menu, ctx: &NavContext, template: &TemplateRef) -> Result<String, Error> {
        let body = match template {
            TemplateRef::File(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|e| Error::Template { path: path.clone(), source: e })?;
                substitute(&raw, ctx)
            }
            TemplateRef::Scaffold(arity) => scaffold_body(ctx, *arity, &self.namespace),
        };
        Ok(layout(menu, ctx, &body))
    }
}

/// Replaces `{{object}}`, `{{action}}` and `{{key}}` in a template file.
/// Values are HTML-escaped; the key in particular comes straight off the URL.
fn substitute(raw: &str, ctx: &NavContext) -> String {
    let mut out = raw.replace("{{object}}", &escape(&ctx.object));
    out = out.replace("{{action}}", &escape(&ctx.action));
    out.replace("{{key}}", &escape(ctx.key.as_deref().unwrap_or("")))
}

/// Wraps `body` in the shared page layout with both tab bars.
pub(crate) fn layout(menu: &Menu, ctx: &NavContext, body: &str) -> String {
    let mut html = String::with_capacity(body.len() + 512);
    html.push_str("<!doctype html>\n<html><head><title>");
    html.push_str(&escape(&ctx.object));
    html.push_str("</title></head>\n<body>\n");
    html.push_str(&object_row(menu, ctx));
    html.push_str(&action_row(menu, ctx));
    html.push_str("<main>\n");
    html.push_str(body);
    html.push_str("\n</main>\n</body></html>\n");
    html
}

fn object_row(menu: &Menu, ctx: &NavContext) -> String {
    let mut row = String::from("<nav class=\"toto-objects\">");
    for entry in menu.entries() {
        let class = if entry.name() == ctx.object { " class=\"active\"" } else { "" };
        let name = escape(entry.name());
        row.push_str(&format!(
            "<a{class} href=\"{}/{name}\">{name}</a>",
            ctx.prefix,
        ));
    }
    row.push_str("</nav>\n");
    row
}

fn action_row(menu: &Menu, ctx: &NavContext) -> String {
    let Some(entry) = menu.entry(&ctx.object) else {
        return String::new();
    };
    let actions = match ctx.arity {
        Arity::Collection => entry.many(),
        Arity::Instance => entry.one(),
    };
    let mut row = String::from("<nav class=\"toto-actions\">");
    for action in actions {
        let class = if *action == ctx.action { " class=\"active\"" } else { "" };
        let href = match &ctx.key {
            Some(key) => format!("{}/{}/{action}/{key}", ctx.prefix, ctx.object),
            None => format!("{}/{}/{action}", ctx.prefix, ctx.object),
        };
        row.push_str(&format!(
            "<a{class} href=\"{}\">{}</a>",
            escape(&href),
            escape(action),
        ));
    }
    row.push_str("</nav>\n");
    row
}

/// The generic placeholder page, including the registration a host would
/// write to replace it.
pub(crate) fn scaffold_body(ctx: &NavContext, arity: Arity, namespace: &str) -> String {
    let object = escape(&ctx.object);
    let action = escape(&ctx.action);
    let heading = match &ctx.key {
        Some(key) => format!("{action} {object} {}", escape(key)),
        None => format!("{action} {object}s"),
    };
    let signature = match arity {
        Arity::Collection => "req: Request, ctx: NavContext",
        Arity::Instance => "req: Request, ctx: NavContext /* ctx.instance is Some */",
    };
    let type_name = escape(&conventional_type_name(namespace, &ctx.object));
    format!(
        "<section class=\"toto-{}\">\n\
         <h1>{heading}</h1>\n\
         <p>This page was generated because no template or controller exists yet\n\
         for <code>{object}/{action}</code>. To replace it, either drop a template at\n\
         <code>templates/{object}/{action}.html</code> or register a controller\n\
         (conventionally grouped under <code>{type_name}</code>):</p>\n\
         <pre>async fn {action}({signature}) -&gt; Response {{\n    \
         Response::html(\"…\")\n}}\n\n\
         toto.controller(\"{object}\", \"{action}\", {action});</pre>\n\
         </section>",
        arity.scaffold_name(),
    )
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Menu {
        Menu::builder()
            .object("beer", ["search", "browse"], ["picture"])
            .object("pub", ["map"], ["info"])
            .build()
            .unwrap()
    }

    fn collection_ctx() -> NavContext {
        NavContext {
            object: "beer".into(),
            action: "browse".into(),
            arity: Arity::Collection,
            key: None,
            instance: None,
            prefix: String::new(),
        }
    }

    #[test]
    fn scaffold_page_names_the_missing_pieces() {
        let renderer = BasicRenderer::new("app");
        let html = renderer
            .render(&menu(), &collection_ctx(), &TemplateRef::Scaffold(Arity::Collection))
            .unwrap();
        assert!(html.contains("toto-plural"));
        assert!(html.contains("templates/beer/browse.html"));
        assert!(html.contains("toto.controller(\"beer\", \"browse\", browse);"));
        assert!(html.contains("app::Beer"));
    }

    #[test]
    fn layout_carries_both_tab_bars() {
        let renderer = BasicRenderer::new("");
        let html = renderer
            .render(&menu(), &collection_ctx(), &TemplateRef::Scaffold(Arity::Collection))
            .unwrap();
        // object row lists every object, current marked active
        assert!(html.contains("<a class=\"active\" href=\"/beer\">beer</a>"));
        assert!(html.contains("<a href=\"/pub\">pub</a>"));
        // action row lists the collection actions in order
        assert!(html.contains("<a href=\"/beer/search\">search</a>"));
        assert!(html.contains("<a class=\"active\" href=\"/beer/browse\">browse</a>"));
    }

    #[test]
    fn instance_tab_links_carry_the_key() {
        let renderer = BasicRenderer::new("");
        let ctx = NavContext {
            object: "beer".into(),
            action: "picture".into(),
            arity: Arity::Instance,
            key: Some("42".into()),
            instance: Some(crate::context::Instance::wrap("42")),
            prefix: String::new(),
        };
        let html = renderer
            .render(&menu(), &ctx, &TemplateRef::Scaffold(Arity::Instance))
            .unwrap();
        assert!(html.contains("href=\"/beer/picture/42\""));
        assert!(html.contains("toto-single"));
    }

    #[test]
    fn file_templates_get_placeholder_substitution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("browse.html");
        std::fs::write(&path, "<h1>{{action}} all {{object}}s</h1>").unwrap();

        let renderer = BasicRenderer::new("");
        let html = renderer
            .render(&menu(), &collection_ctx(), &TemplateRef::File(path))
            .unwrap();
        assert!(html.contains("<h1>browse all beers</h1>"));
    }

    #[test]
    fn missing_file_is_an_error_for_the_caller_to_downgrade() {
        let renderer = BasicRenderer::new("");
        let err = renderer
            .render(&menu(), &collection_ctx(), &TemplateRef::File("/nonexistent/x.html".into()))
            .unwrap_err();
        assert!(matches!(err, Error::Template { .. }));
    }

    #[test]
    fn keys_are_html_escaped() {
        let ctx = NavContext {
            object: "beer".into(),
            action: "picture".into(),
            arity: Arity::Instance,
            key: Some("<script>".into()),
            instance: None,
            prefix: String::new(),
        };
        let html = scaffold_body(&ctx, Arity::Instance, "");
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
