// Transport module.
// The request/response capability the cache layer decorates, plus its implementations.

pub mod client;
pub mod message;
pub mod protocol;

pub use client::ReqwestTransport;
pub use message::{Body, Request, Response};
pub use protocol::ProtocolTransport;

use crate::error::Result;

/// Anything that turns a request into a response.
///
/// HTTP error statuses are ordinary responses; `Err` is reserved for failures
/// to obtain a response at all (connection errors and the like).
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> Result<Response>;
}
