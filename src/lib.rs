//! File-backed HTTP caching behind synthetic URL schemes.
//!
//! Requests to `cache:<url>` are revalidated against `<url>` with
//! `If-Modified-Since` and fall back to the cached copy when upstream fails or
//! reports the content unchanged. Requests to `cachez:<url>` are served from
//! the cache only. Every other request passes through untouched.
//!
//! ```no_run
//! use scheme_cache::{ProtocolTransport, Request, Transport, register};
//!
//! let mut host = ProtocolTransport::with_network()?;
//! register(&mut host, "/tmp/responses", None)?;
//!
//! let response = host.send(Request::get("cache:https://example.com/data.json")?)?;
//! println!("{}", response.text()?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod layer;
pub mod scheme;
pub mod transport;

pub use cache::{CacheEntry, CacheKey, CacheStore, FsStore};
pub use config::{CacheConfig, default_cache_dir};
pub use error::{CacheError, Result};
pub use layer::{
    CACHE_HIT, CACHE_STATUS_HEADER, CacheTransport, cached_response, http_date, register,
};
pub use scheme::{CACHE_ONLY_SCHEME, Route, VALIDATING_SCHEME, unwrap_url};
pub use transport::{Body, ProtocolTransport, ReqwestTransport, Request, Response, Transport};
