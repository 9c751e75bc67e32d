// Synthetic URL schemes.
// Decides how a request is routed and recovers the real destination URL.

use url::Url;

use crate::error::{CacheError, Result};

/// Revalidate against upstream, falling back to the cached copy.
pub const VALIDATING_SCHEME: &str = "cache";
/// Serve strictly from the cache, never contacting upstream.
pub const CACHE_ONLY_SCHEME: &str = "cachez";
/// Scheme both synthetic schemes collapse to when deriving cache keys.
pub const CANONICAL_SCHEME: &str = "http";

/// How a request is handled, chosen from its URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Validating,
    CacheOnly,
    PassThrough,
}

impl Route {
    pub fn for_scheme(scheme: &str) -> Self {
        match scheme {
            VALIDATING_SCHEME => Route::Validating,
            CACHE_ONLY_SCHEME => Route::CacheOnly,
            _ => Route::PassThrough,
        }
    }

    pub fn for_url(url: &Url) -> Self {
        Self::for_scheme(url.scheme())
    }
}

/// Returns true for `cache` and `cachez`.
pub fn is_synthetic(scheme: &str) -> bool {
    Route::for_scheme(scheme) != Route::PassThrough
}

/// Strip `<scheme>:` from a wrapped URL and parse what remains.
///
/// `cache:https://example.com/data` unwraps to `https://example.com/data`.
/// The remainder must be an absolute URL with its own scheme.
pub fn unwrap_url(url: &Url, scheme: &str) -> Result<Url> {
    let prefix = format!("{}:", scheme);
    let target = url
        .as_str()
        .strip_prefix(&prefix)
        .ok_or_else(|| CacheError::MissingPrefix {
            prefix: prefix.clone(),
        })?;

    if target.is_empty() {
        return Err(CacheError::MissingDestination { prefix });
    }

    match Url::parse(target) {
        Ok(url) => Ok(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Err(CacheError::MissingScheme(target.to_string()))
        }
        Err(e) => Err(CacheError::InvalidDestination(e)),
    }
}
