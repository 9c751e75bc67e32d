// Cache key derivation.
// Maps a destination URL to a fixed-length, filesystem-safe identifier.

use std::fmt;

use sha2::{Digest, Sha256};
use url::Url;

use crate::scheme::{CANONICAL_SCHEME, is_synthetic};

/// SHA-256 digest of a canonical URL, hex encoded (64 characters).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a destination URL.
    ///
    /// `cache:` and `cachez:` URLs are hashed as if their scheme were `http`,
    /// so both modes address the same entry.
    pub fn for_url(url: &Url) -> Self {
        let hash = Sha256::digest(canonical_form(url).as_bytes());
        Self(hex::encode(hash))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn canonical_form(url: &Url) -> String {
    let scheme = url.scheme();
    if is_synthetic(scheme) {
        format!("{}{}", CANONICAL_SCHEME, &url.as_str()[scheme.len()..])
    } else {
        url.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).unwrap()
    }

    #[test]
    fn test_key_is_hex_sha256() {
        let key = CacheKey::for_url(&url("https://example.com/data"));
        assert_eq!(key.as_str().len(), 64);
        assert!(key.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(key.to_string(), key.as_str());
    }

    #[test]
    fn test_key_is_deterministic() {
        let a = CacheKey::for_url(&url("https://example.com/data"));
        let b = CacheKey::for_url(&url("https://example.com/data"));
        let c = CacheKey::for_url(&url("https://example.com/other"));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_synthetic_schemes_share_key_space() {
        let validating = CacheKey::for_url(&url("cache:https://example.com/data"));
        let cache_only = CacheKey::for_url(&url("cachez:https://example.com/data"));
        assert_eq!(validating, cache_only);
        assert_eq!(
            canonical_form(&url("cachez:https://example.com/data")),
            "http:https://example.com/data"
        );
    }

    #[test]
    fn test_real_schemes_stay_distinct() {
        let http = CacheKey::for_url(&url("http://example.com/data"));
        let https = CacheKey::for_url(&url("https://example.com/data"));
        assert_ne!(http, https);
    }
}
