// Cache module for local filesystem caching.
// Derives keys from destination URLs and stores response bodies on disk.

pub mod key;
pub mod store;

pub use key::CacheKey;
pub use store::{CacheEntry, CacheStore, FsStore};
