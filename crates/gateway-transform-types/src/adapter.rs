// ChatAdapter trait — the contract the gateway adapter implements.

use std::future::Future;
use std::pin::Pin;

use futures_core::Stream;

use crate::error::Error;
use crate::request::Request;
use crate::response::GenerationResult;
use crate::stream::StreamPart;

/// A boxed future that is Send.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A boxed stream that is Send.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// The adapter contract.
///
/// Uses explicit BoxFuture/BoxStream return types instead of the
/// `async-trait` macro: no hidden allocations from macro expansion and
/// explicit control over lifetime bounds.
pub trait ChatAdapter: Send + Sync {
    /// Adapter name (e.g. "gateway-transform").
    fn name(&self) -> &str;

    /// Send a request, return the decoded result.
    fn complete(&self, request: Request) -> BoxFuture<'_, Result<GenerationResult, Error>>;

    /// Send a request, return a stream of parts.
    fn stream(&self, request: Request) -> BoxStream<'_, Result<StreamPart, Error>>;
}
