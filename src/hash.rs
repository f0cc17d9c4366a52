//! # Digest value type
//!
//! [`Md5Hash`] stores a finished 16-byte digest together with its
//! 32-character lowercase hex rendering, computed once at construction.
//! It is immutable, cheap to clone, and compares by digest bytes.

use std::fmt;
use std::io::{ErrorKind, Read};

use log::{debug, trace};

use crate::digest::{md5_digest, Md5, MD5_OUTPUT_SIZE};
use crate::error::Result;

/// Read size for the streaming entry point. Anything at or above one block
/// works; 8 KiB keeps syscall counts low for file-sized inputs.
const READ_CHUNK: usize = 8192;

/// An immutable, finished MD5 digest.
///
/// Two hashes are equal iff all 16 digest bytes match; the cached hex string
/// is derived and never consulted for equality.
#[derive(Debug, Clone)]
pub struct Md5Hash {
    bytes: [u8; MD5_OUTPUT_SIZE],
    hex: String,
}

impl Md5Hash {
    /// Wraps a raw 16-byte digest, rendering its hex form eagerly.
    pub fn from_bytes(bytes: [u8; MD5_OUTPUT_SIZE]) -> Self {
        Self {
            hex: hex::encode(bytes),
            bytes,
        }
    }

    /// Digests a byte buffer in one shot.
    pub fn of_bytes(data: &[u8]) -> Self {
        Self::from_bytes(md5_digest(data))
    }

    /// Digests the UTF-8 bytes of a string in one shot.
    pub fn of_str(text: &str) -> Self {
        Self::of_bytes(text.as_bytes())
    }

    /// Digests a readable stream until exhaustion, feeding the engine in
    /// chunks so the input never has to fit in memory.
    ///
    /// A failed read abandons the computation and surfaces
    /// [`crate::Error::UnreadableSource`]; no partial digest is produced.
    pub fn of_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut engine = Md5::new();
        let mut buf = [0u8; READ_CHUNK];
        let mut total: u64 = 0;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            engine.absorb(&buf[..n])?;
            total += n as u64;
            trace!("absorbed {n} bytes from reader");
        }
        debug!("digested {total} bytes from reader");
        engine.finalize()
    }

    /// The raw 16 digest bytes.
    pub fn as_bytes(&self) -> &[u8; MD5_OUTPUT_SIZE] {
        &self.bytes
    }

    /// Consumes the hash, returning the raw digest bytes.
    pub fn into_bytes(self) -> [u8; MD5_OUTPUT_SIZE] {
        self.bytes
    }

    /// The cached 32-character lowercase hex rendering.
    pub fn to_hex(&self) -> &str {
        &self.hex
    }
}

impl PartialEq for Md5Hash {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Md5Hash {}

impl From<[u8; MD5_OUTPUT_SIZE]> for Md5Hash {
    fn from(bytes: [u8; MD5_OUTPUT_SIZE]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl fmt::Display for Md5Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex)
    }
}
