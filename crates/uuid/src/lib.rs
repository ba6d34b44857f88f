//! Record identity utilities.
//!
//! Every document and every embedded sub-document in burrow carries an opaque identity. To keep
//! identities comparable and path derivation deterministic, burrow uses a *canonical* UUID
//! representation: **32 lowercase hexadecimal characters** (no hyphens).
//!
//! This crate provides:
//! - [`RecordId`], a wrapper type that *guarantees* the canonical format once constructed.
//! - Sharding logic used by the file-backed store to derive a document directory.
//!
//! ## Canonical form
//! - Length: 32
//! - Characters: `0-9` and `a-f` only
//! - Example: `550e8400e29b41d4a716446655440000`
//!
//! Externally supplied identifiers (path parameters, request bodies) must already be canonical.
//! Anything else is rejected by [`RecordId::parse`]; callers treat that rejection the same way as
//! an identity that does not exist.
//!
//! ## Sharded directory layout
//! For a canonical id `u`, the file store keeps the document under
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`.

mod service;

pub use service::{RecordId, Uuid};

/// Error type for identity operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identity operations.
pub type UuidResult<T> = Result<T, UuidError>;
