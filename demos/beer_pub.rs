//! The beer/pub demo — two objects, a handful of actions, one controller.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example beer_pub
//!
//! Try:
//!   curl -iL http://localhost:3000/                 # → /beer → /beer/search
//!   curl  http://localhost:3000/beer/browse          # scaffold collection page
//!   curl  http://localhost:3000/beer/picture/42      # scaffold instance page, key 42
//!   curl -i http://localhost:3000/beer/default/42    # → /beer/picture/42
//!   curl  http://localhost:3000/pub/map              # hand-written controller

use toto::{Instance, Menu, NavContext, Request, Response, Server, Toto};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let menu = Menu::builder()
        .object("beer", ["search", "browse"], ["picture"])
        .object("pub", ["map"], ["info"])
        .build()
        .expect("invalid menu");

    let app = Toto::new(menu)
        .namespace("beerdb")
        .model(|key| Instance {
            key: key.to_owned(),
            data: serde_json::json!({ "looked_up": true }),
        })
        .controller("pub", "map", map)
        .into_router()
        .expect("route conflict");

    Server::bind("0.0.0.0:3000")
        .serve(app)
        .await
        .expect("server error");
}

// GET /pub/map — everything not registered like this scaffolds instead.
async fn map(_req: Request, ctx: NavContext) -> Response {
    Response::html(format!(
        "<h1>{} {}</h1><ul><li>The Crown</li><li>The Anchor</li></ul>",
        ctx.action, ctx.object,
    ))
}
