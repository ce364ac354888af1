//! # toto
//!
//! Convention-over-configuration navigation for small web apps: declare a
//! menu, get a working tabbed UI skeleton — routes, redirects, tab bars,
//! and scaffold pages — without hand-wiring a single route.
//!
//! ## The convention
//!
//! A menu is an ordered list of *objects*, each with two ordered action
//! lists: `many` actions operate on the whole collection (`search`,
//! `browse`), `one` actions operate on a single instance addressed by a
//! trailing key (`picture`, `edit`). From that declaration toto generates,
//! per object `o`:
//!
//! - `GET /o/{action}` for each many-action — a collection page
//! - `GET /o` — redirect to the first many-action
//! - `GET /o/{action}/{key}` for each one-action — an instance page
//!   (the key is a catch-all and may contain `/`)
//! - `GET /o/default/{key}` — redirect to the first one-action
//!
//! plus `GET /` redirecting to the first object. Declaration order is the
//! contract: it fixes tab order and default targets.
//!
//! Every generated page works immediately. Until you register a controller
//! or drop a template at its conventional path, toto renders a scaffold
//! page that shows the code you would write — missing pages are a prompt,
//! never a 404 or 500.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use toto::{Menu, NavContext, Request, Response, Server, Toto};
//!
//! #[tokio::main]
//! async fn main() {
//!     let menu = Menu::builder()
//!         .object("beer", ["search", "browse"], ["picture"])
//!         .object("pub", ["map"], ["info"])
//!         .build()
//!         .expect("invalid menu");
//!
//!     let app = Toto::new(menu)
//!         .controller("beer", "search", search)
//!         .into_router()
//!         .expect("route conflict");
//!
//!     Server::bind("0.0.0.0:3000").serve(app).await.unwrap();
//! }
//!
//! async fn search(req: Request, _ctx: NavContext) -> Response {
//!     let q = req.query().unwrap_or("");
//!     Response::html(format!("<p>results for {q}</p>"))
//! }
//! ```
//!
//! Everything else — template resolution ([`TemplateResolver`]), rendering
//! ([`Renderer`]), model loading ([`Toto::model`]) — is a seam with a
//! working default.

mod app;
mod context;
mod controller;
mod error;
mod handler;
mod menu;
mod render;
mod request;
mod response;
mod route;
mod router;
mod server;
mod template;

pub use app::Toto;
pub use context::{Instance, ModelFactory, NavContext};
pub use controller::{Controllers, conventional_type_name};
pub use error::Error;
pub use handler::Handler;
pub use http::{Method, StatusCode};
pub use menu::{Menu, MenuBuilder, MenuEntry};
pub use render::{BasicRenderer, Renderer};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use route::{Arity, RouteKind, TabRoute, expand};
pub use router::Router;
pub use server::Server;
pub use template::{FsTemplates, NoTemplates, TemplateRef, TemplateResolver};
