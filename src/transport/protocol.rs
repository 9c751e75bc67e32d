// Host transport with per-scheme handlers.
// Requests for a registered scheme go to its handler, everything else to the fallback.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::Transport;
use super::client::ReqwestTransport;
use super::message::{Request, Response};
use crate::error::{CacheError, Result};

/// Dispatches requests by URL scheme.
pub struct ProtocolTransport {
    fallback: Arc<dyn Transport>,
    protocols: HashMap<String, Arc<dyn Transport>>,
}

impl ProtocolTransport {
    pub fn new(fallback: Arc<dyn Transport>) -> Self {
        Self {
            fallback,
            protocols: HashMap::new(),
        }
    }

    /// Host transport whose fallback performs real network requests.
    pub fn with_network() -> Result<Self> {
        Ok(Self::new(Arc::new(ReqwestTransport::new()?)))
    }

    /// Route requests with `scheme` to `handler`.
    ///
    /// Registering the same scheme twice is a configuration error.
    pub fn register_protocol(
        &mut self,
        scheme: impl Into<String>,
        handler: Arc<dyn Transport>,
    ) -> Result<()> {
        let scheme = scheme.into().to_ascii_lowercase();
        if self.protocols.contains_key(&scheme) {
            return Err(CacheError::DuplicateProtocol(scheme));
        }
        self.protocols.insert(scheme, handler);
        Ok(())
    }

    pub fn is_registered(&self, scheme: &str) -> bool {
        self.protocols.contains_key(scheme)
    }
}

impl Transport for ProtocolTransport {
    fn send(&self, request: Request) -> Result<Response> {
        match self.protocols.get(request.url().scheme()) {
            Some(handler) => handler.send(request),
            None => self.fallback.send(request),
        }
    }
}

impl fmt::Debug for ProtocolTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut schemes: Vec<_> = self.protocols.keys().collect();
        schemes.sort();
        f.debug_struct("ProtocolTransport")
            .field("protocols", &schemes)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    struct Fixed(StatusCode);

    impl Transport for Fixed {
        fn send(&self, request: Request) -> Result<Response> {
            Ok(Response::new(self.0, request.url().clone()))
        }
    }

    #[test]
    fn test_dispatch_by_scheme() {
        let mut host = ProtocolTransport::new(Arc::new(Fixed(StatusCode::OK)));
        host.register_protocol("memo", Arc::new(Fixed(StatusCode::ACCEPTED)))
            .unwrap();

        let registered = host.send(Request::get("memo:thing").unwrap()).unwrap();
        assert_eq!(registered.status(), StatusCode::ACCEPTED);

        let other = host
            .send(Request::get("https://example.com/").unwrap())
            .unwrap();
        assert_eq!(other.status(), StatusCode::OK);
    }

    #[test]
    fn test_register_twice_fails() {
        let mut host = ProtocolTransport::new(Arc::new(Fixed(StatusCode::OK)));
        host.register_protocol("memo", Arc::new(Fixed(StatusCode::OK)))
            .unwrap();

        let err = host
            .register_protocol("MEMO", Arc::new(Fixed(StatusCode::OK)))
            .unwrap_err();
        assert!(matches!(err, CacheError::DuplicateProtocol(s) if s == "memo"));
        assert!(host.is_registered("memo"));
    }
}
