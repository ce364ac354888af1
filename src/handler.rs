//! Handler trait and type erasure.
//!
//! The routing tree stores handlers of *different* concrete types in one
//! collection, which Rust only allows through trait objects. Any
//! `async fn(Request) -> impl IntoResponse` is wrapped in a [`FnHandler`],
//! stored as `Arc<dyn ErasedHandler>`, and invoked with one virtual call per
//! request:
//!
//! ```text
//! async fn search(req: Request) -> Response { … }
//!        ↓ router.get("/beer/search", search)
//! Arc::new(FnHandler(search))      stored as BoxedHandler
//!        ↓ at request time
//! handler.call(req)                one Arc clone + one vtable dispatch
//! ```
//!
//! The per-request cost is an atomic increment and a virtual call — noise
//! next to network I/O.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

/// A heap-allocated, type-erased future resolving to a [`Response`].
///
/// `Pin<Box<…>>` because the runtime polls futures in place; `Send` so tokio
/// may migrate them across worker threads.
pub(crate) type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
///
/// `#[doc(hidden)] pub` rather than `pub(crate)` because it leaks into the
/// return type of [`Handler::into_boxed_handler`]. Not useful externally.
#[doc(hidden)]
pub trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

/// A type-erased handler, shared across concurrent requests via `Arc`.
#[doc(hidden)]
pub type BoxedHandler = Arc<dyn ErasedHandler + Send + Sync + 'static>;

/// Implemented for every valid route handler.
///
/// Never implement this yourself — it is automatically satisfied for any
/// `async fn name(req: Request) -> impl IntoResponse`, and for closures with
/// the same shape (which is how [`Toto`](crate::Toto) registers the routes
/// it generates). Sealed so the blanket impl is the only impl.
pub trait Handler: private::Sealed + Send + Sync + 'static {
    #[doc(hidden)]
    fn into_boxed_handler(self) -> BoxedHandler;
}

mod private {
    pub trait Sealed {}
}

impl<F, Fut, R> private::Sealed for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        Arc::new(FnHandler(self))
    }
}

/// Bridges a concrete handler `F` into the trait-object world.
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
