//! Response cache backends for Clipdrop.
//!
//! [`FileResponseCache`] is the production backend: one JSON file per URL,
//! aged by its modification time, so entries survive restarts.
//! [`MokaResponseCache`] keeps the same TTL contract in memory.

pub mod file;
pub mod moka;

pub use file::FileResponseCache;
pub use self::moka::MokaResponseCache;
