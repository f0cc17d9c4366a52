//! # MD5 Message Digest (RFC 1321)
//!
//! This crate provides an **incremental** MD5 digest engine: callers may feed
//! input in one shot, from a string, from a byte buffer, or as a sequence of
//! reads from an open stream, without holding the whole input in memory at
//! once.
//!
//! **Note**: MD5 is cryptographically broken. This implementation exists for
//! compatibility with legacy formats and checksumming, not for security. If
//! you need a secure hash, use a vetted modern algorithm (e.g. SHA-2 or
//! BLAKE3 from RustCrypto).
//!
//! ## Key pieces
//! - [`Md5`] — the streaming engine: `absorb` chunks, then `finalize`.
//! - [`Md5Hash`] — an immutable 16-byte digest value with a cached lowercase
//!   hex rendering, equality, and `Display`.
//! - [`md5_digest`] — one-shot convenience over a byte slice.

pub mod digest;
pub mod error;
pub mod hash;

pub use digest::{md5_digest, Md5, MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE};
pub use error::{Error, Result};
pub use hash::Md5Hash;
