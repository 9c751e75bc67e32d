// Caching transport for cache: and cachez: URLs.
// Revalidates against upstream or serves from disk, preferring a cached copy over a failure.

use std::fmt;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use reqwest::header::{CONTENT_LENGTH, HeaderName, HeaderValue, IF_MODIFIED_SINCE};
use tracing::{debug, warn};
use url::Url;

use crate::cache::{CacheEntry, CacheKey, CacheStore, FsStore};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::scheme::{CACHE_ONLY_SCHEME, Route, VALIDATING_SCHEME, unwrap_url};
use crate::transport::{Body, ProtocolTransport, ReqwestTransport, Request, Response, Transport};

/// Header set on every response served from the cache.
pub const CACHE_STATUS_HEADER: &str = "x-http-cache";
/// Value of [`CACHE_STATUS_HEADER`] on cached responses.
pub const CACHE_HIT: &str = "HIT";
/// IMF-fixdate, as used by `If-Modified-Since`.
pub const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Transport decorator that adds file-backed caching for `cache:` and `cachez:` URLs.
///
/// Any other scheme is forwarded to the wrapped transport untouched.
pub struct CacheTransport {
    inner: Arc<dyn Transport>,
    store: Arc<dyn CacheStore>,
}

impl CacheTransport {
    /// Create a cache transport storing entries under `cache_dir`.
    ///
    /// The directory is created if needed. Without an `original` transport a
    /// [`ReqwestTransport`] is used.
    pub fn new(
        cache_dir: impl Into<PathBuf>,
        original: Option<Arc<dyn Transport>>,
    ) -> Result<Self> {
        let store = FsStore::new(cache_dir)?;
        let inner: Arc<dyn Transport> = match original {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new()?),
        };
        Ok(Self::with_store(Arc::new(store), inner))
    }

    pub fn from_config(
        config: &CacheConfig,
        original: Option<Arc<dyn Transport>>,
    ) -> Result<Self> {
        Self::new(config.cache_dir.clone(), original)
    }

    /// Create a cache transport from explicit collaborators.
    pub fn with_store(store: Arc<dyn CacheStore>, inner: Arc<dyn Transport>) -> Self {
        Self { inner, store }
    }

    fn send_validating(&self, request: Request) -> Result<Response> {
        let destination = unwrap_url(request.url(), VALIDATING_SCHEME)?;
        let key = CacheKey::for_url(&destination);
        let cached = self.store.read(&key)?;

        let wrapped_url = request.url().clone();
        let mut upstream = request;
        upstream.set_url(destination.clone());

        if let Some(entry) = &cached {
            let unset = upstream
                .headers()
                .get(IF_MODIFIED_SINCE)
                .is_none_or(|v| v.is_empty());
            if unset {
                let since = http_date(entry.modified);
                debug!(url = %destination, if_modified_since = %since, "revalidating cached entry");
                upstream
                    .headers_mut()
                    .insert(IF_MODIFIED_SINCE, HeaderValue::from_str(&since)?);
            }
        }

        let mut response = match self.inner.send(upstream) {
            Ok(response) => response,
            Err(e) => {
                return match cached {
                    Some(entry) => {
                        debug!(url = %destination, error = %e, "transport failed, serving cache");
                        Ok(cached_response(wrapped_url, entry.body))
                    }
                    None => Err(e),
                };
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(match cached {
                Some(entry) => {
                    debug!(url = %destination, %status, "upstream not usable, serving cache");
                    response.discard();
                    cached_response(wrapped_url, entry.body)
                }
                None => response,
            });
        }

        let mut body = Vec::new();
        if let Err(e) = response.body_mut().read_to_end(&mut body) {
            return match cached {
                Some(CacheEntry { body, .. }) => {
                    debug!(url = %destination, error = %e, "body read failed, serving cache");
                    Ok(cached_response(wrapped_url, body))
                }
                None => Err(CacheError::BodyRead(e)),
            };
        }

        if let Err(e) = self.store.write(&key, &body) {
            warn!(url = %destination, key = %key, error = %e, "failed to write cache entry");
        }

        response
            .headers_mut()
            .insert(CONTENT_LENGTH, HeaderValue::from(body.len() as u64));
        Ok(response.with_body(Body::from_bytes(body)))
    }

    fn send_cache_only(&self, request: Request) -> Result<Response> {
        let destination = unwrap_url(request.url(), CACHE_ONLY_SCHEME)?;
        let key = CacheKey::for_url(&destination);

        match self.store.read(&key)? {
            Some(entry) => Ok(cached_response(request.url().clone(), entry.body)),
            None => {
                debug!(url = %destination, key = %key, "cache miss");
                Err(CacheError::CacheMiss(destination))
            }
        }
    }
}

impl Transport for CacheTransport {
    fn send(&self, request: Request) -> Result<Response> {
        match Route::for_url(request.url()) {
            Route::Validating => self.send_validating(request),
            Route::CacheOnly => self.send_cache_only(request),
            Route::PassThrough => self.inner.send(request),
        }
    }
}

impl fmt::Debug for CacheTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheTransport").finish_non_exhaustive()
    }
}

/// Build a `200 OK` response carrying cached bytes.
pub fn cached_response(url: Url, body: Vec<u8>) -> Response {
    let len = body.len() as u64;
    Response::new(StatusCode::OK, url)
        .with_header(
            HeaderName::from_static(CACHE_STATUS_HEADER),
            HeaderValue::from_static(CACHE_HIT),
        )
        .with_header(CONTENT_LENGTH, HeaderValue::from(len))
        .with_body(Body::from_bytes(body))
}

/// Format a timestamp as an HTTP date in UTC.
pub fn http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(HTTP_DATE_FORMAT).to_string()
}

/// Handle `cache:` and `cachez:` on `host` with a new [`CacheTransport`].
///
/// Other schemes keep going to the host's fallback transport.
pub fn register(
    host: &mut ProtocolTransport,
    cache_dir: impl Into<PathBuf>,
    original: Option<Arc<dyn Transport>>,
) -> Result<Arc<CacheTransport>> {
    for scheme in [VALIDATING_SCHEME, CACHE_ONLY_SCHEME] {
        if host.is_registered(scheme) {
            return Err(CacheError::DuplicateProtocol(scheme.to_string()));
        }
    }

    let cache = Arc::new(CacheTransport::new(cache_dir, original)?);
    host.register_protocol(VALIDATING_SCHEME, cache.clone())?;
    host.register_protocol(CACHE_ONLY_SCHEME, cache.clone())?;
    Ok(cache)
}
