// Cache configuration.
// Resolves the storage root for cached responses.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable that overrides the default cache directory.
pub const CACHE_DIR_ENV: &str = "SCHEME_CACHE_DIR";

/// Configuration for a cache transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Directory holding one file per cached response.
    pub cache_dir: PathBuf,
}

impl CacheConfig {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self::new(default_cache_dir())
    }
}

/// Get the default cache directory.
///
/// Uses `$SCHEME_CACHE_DIR` when set, otherwise the platform cache directory
/// (`~/.cache/scheme-cache/responses` on Linux).
pub fn default_cache_dir() -> PathBuf {
    std::env::var_os(CACHE_DIR_ENV)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            ProjectDirs::from("", "", "scheme-cache")
                .map(|dirs| dirs.cache_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".cache/scheme-cache"))
                .join("responses")
        })
}
