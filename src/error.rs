// Error types for the scheme cache.
// Covers configuration, wrapped URL, storage, and transport failures.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("cache directory is required")]
    MissingCacheDir,

    #[error("create cache directory {path}: {source}")]
    CreateCacheDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("protocol {0} is already registered")]
    DuplicateProtocol(String),

    #[error("url does not start with {prefix} prefix")]
    MissingPrefix { prefix: String },

    #[error("missing downstream URL after {prefix} prefix")]
    MissingDestination { prefix: String },

    #[error("downstream URL must include scheme: {0}")]
    MissingScheme(String),

    #[error("parse downstream URL: {0}")]
    InvalidDestination(#[from] url::ParseError),

    #[error("cache miss for {0}")]
    CacheMiss(Url),

    #[error("read response body: {0}")]
    BodyRead(#[source] io::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to persist temp file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, CacheError>;
