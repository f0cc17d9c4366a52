//! Crate-wide error type and `Result` alias.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the digest engine and its input collaborators.
///
/// Digest-logic errors are programmer errors (misuse of the engine's state
/// machine) and are reported immediately; the engine performs no I/O itself,
/// so the only external failure is a stream read going bad.
#[derive(Debug, Error)]
pub enum Error {
    /// `absorb` or `finalize` was called on an engine already sealed by a
    /// previous `finalize`. The engine must be `reset` before reuse.
    #[error("digest engine is sealed; call reset() before feeding more data")]
    SealedEngine,

    /// The stream supplying input bytes failed mid-read. The computation is
    /// abandoned; no partial or zeroed digest is ever produced.
    #[error("failed to read from input source: {0}")]
    UnreadableSource(#[from] std::io::Error),
}
