//! # Incremental MD5 digest engine
//!
//! Implements the RFC 1321 message digest as a streaming computation: input
//! arrives in arbitrary chunks, complete 64-byte blocks are compressed
//! immediately, and at most 63 leftover bytes are staged between calls. The
//! result is byte-identical regardless of how the input is split.
//!
//! The engine is a small state machine: fresh/absorbing, then *sealed* once
//! [`Md5::finalize`] runs. Feeding a sealed engine is rejected with
//! [`Error::SealedEngine`]; [`Md5::reset`] is the only way back.

use crate::error::{Error, Result};
use crate::hash::Md5Hash;

/// The size of the MD5 digest in bytes (128 bits = 16 bytes).
pub const MD5_OUTPUT_SIZE: usize = 16;

/// The size of one compression block in bytes (512 bits).
pub const MD5_BLOCK_SIZE: usize = 64;

/// The initial values for (A, B, C, D) from the MD5 specification.
static INIT_A: u32 = 0x67452301;
static INIT_B: u32 = 0xefcdab89;
static INIT_C: u32 = 0x98badcfe;
static INIT_D: u32 = 0x10325476;

/// The sine table constants (T) in MD5 (32 bits).
/// T[i] = floor(2^32 * abs(sin(i+1))) for i=0..63
static T: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// The amount of left rotation performed in each MD5 round, grouped by step.
static S: [u32; 64] = [
    // Round 1
    7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,
    // Round 2
    5, 9, 14, 20,   5, 9, 14, 20,   5, 9, 14, 20,   5, 9, 14, 20,
    // Round 3
    4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,
    // Round 4
    6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,
];

/// Streaming MD5 engine.
///
/// Holds the four 32-bit chaining variables, a 64-byte staging buffer for
/// bytes not yet forming a complete block, and the running byte count whose
/// low 64 bits drive the length suffix appended at finalization.
#[derive(Debug, Clone)]
pub struct Md5 {
    /// Chaining variables (A, B, C, D), each 32 bits.
    a: u32,
    b: u32,
    c: u32,
    d: u32,
    /// Staging buffer for the current partial block. Outside an absorb call
    /// it holds `total_len % 64` valid bytes, always fewer than 64.
    buffer: [u8; MD5_BLOCK_SIZE],
    /// Total input bytes consumed, wrapping mod 2^64. Only the low 64 bits of
    /// the bit length matter for padding, per the RFC.
    total_len: u64,
    /// Set by `finalize`; `Some` means the engine is sealed and read-only.
    digest: Option<[u8; MD5_OUTPUT_SIZE]>,
}

impl Md5 {
    /// Creates a fresh engine with the RFC-fixed initial state.
    pub fn new() -> Self {
        Self {
            a: INIT_A,
            b: INIT_B,
            c: INIT_C,
            d: INIT_D,
            buffer: [0u8; MD5_BLOCK_SIZE],
            total_len: 0,
            digest: None,
        }
    }

    /// Restores the engine to its freshly-constructed state, discarding any
    /// absorbed input and any sealed digest. Never fails.
    pub fn reset(&mut self) {
        *self = Md5::new();
    }

    /// Whether `finalize` has already run on this engine.
    pub fn is_sealed(&self) -> bool {
        self.digest.is_some()
    }

    /// Feeds `data` into the digest. May be called any number of times before
    /// `finalize`; splitting the input differently never changes the result.
    ///
    /// Returns [`Error::SealedEngine`] if the engine has been finalized and
    /// not reset since.
    pub fn absorb(&mut self, data: &[u8]) -> Result<()> {
        if self.is_sealed() {
            return Err(Error::SealedEngine);
        }
        self.update(data);
        Ok(())
    }

    /// Seals the engine: applies the RFC padding and length suffix, runs the
    /// final compression(s), and returns the digest as an [`Md5Hash`].
    ///
    /// Returns [`Error::SealedEngine`] if called a second time without an
    /// intervening `reset`.
    pub fn finalize(&mut self) -> Result<Md5Hash> {
        if self.is_sealed() {
            return Err(Error::SealedEngine);
        }
        Ok(Md5Hash::from_bytes(self.seal()))
    }

    /// The raw 16-byte digest, or `None` until the engine is sealed.
    pub fn digest_bytes(&self) -> Option<[u8; MD5_OUTPUT_SIZE]> {
        self.digest
    }

    /// The 32-character lowercase hex digest, or `None` until sealed.
    pub fn digest_hex(&self) -> Option<String> {
        self.digest.map(hex::encode)
    }

    /// Unconditional input path shared by `absorb` and the one-shot helpers.
    fn update(&mut self, data: &[u8]) {
        let mut staged = (self.total_len % MD5_BLOCK_SIZE as u64) as usize;
        self.total_len = self.total_len.wrapping_add(data.len() as u64);

        let mut rest = data;

        // Top up a partial block from a previous call first.
        if staged > 0 {
            let take = rest.len().min(MD5_BLOCK_SIZE - staged);
            self.buffer[staged..staged + take].copy_from_slice(&rest[..take]);
            staged += take;
            rest = &rest[take..];
            if staged < MD5_BLOCK_SIZE {
                return;
            }
            let block = self.buffer;
            self.transform(&block);
        }

        // Complete blocks go straight to the transform, in prefix order.
        let mut blocks = rest.chunks_exact(MD5_BLOCK_SIZE);
        for block in &mut blocks {
            let mut full = [0u8; MD5_BLOCK_SIZE];
            full.copy_from_slice(block);
            self.transform(&full);
        }

        // Stash the leftover (< 64 bytes) for the next call.
        let tail = blocks.remainder();
        self.buffer[..tail.len()].copy_from_slice(tail);
    }

    /// Padding and length suffix, then the closing transform(s).
    fn seal(&mut self) -> [u8; MD5_OUTPUT_SIZE] {
        let bit_len = self.total_len.wrapping_mul(8);
        let staged = (self.total_len % MD5_BLOCK_SIZE as u64) as usize;

        let mut block = [0u8; MD5_BLOCK_SIZE];
        block[..staged].copy_from_slice(&self.buffer[..staged]);
        block[staged] = 0x80;

        // No room left for the 8-byte length field: the padding spills into
        // one extra block.
        if staged >= 56 {
            let spill = block;
            self.transform(&spill);
            block = [0u8; MD5_BLOCK_SIZE];
        }

        block[56..64].copy_from_slice(&bit_len.to_le_bytes());
        let last = block;
        self.transform(&last);

        // Serialize (A, B, C, D) little-endian, in order.
        let mut out = [0u8; MD5_OUTPUT_SIZE];
        out[0..4].copy_from_slice(&self.a.to_le_bytes());
        out[4..8].copy_from_slice(&self.b.to_le_bytes());
        out[8..12].copy_from_slice(&self.c.to_le_bytes());
        out[12..16].copy_from_slice(&self.d.to_le_bytes());
        self.digest = Some(out);
        out
    }

    /// Processes one 512-bit (64-byte) block, advancing the chaining state.
    /// The block is decoded as 16 little-endian 32-bit words.
    fn transform(&mut self, block: &[u8; MD5_BLOCK_SIZE]) {
        let mut w = [0u32; 16];
        for (i, word) in block.chunks_exact(4).enumerate() {
            w[i] = u32::from_le_bytes([word[0], word[1], word[2], word[3]]);
        }

        let (mut a, mut b, mut c, mut d) = (self.a, self.b, self.c, self.d);

        for i in 0..64 {
            let (f, g) = if i < 16 {
                // Round 1: F
                ((b & c) | (!b & d), i)
            } else if i < 32 {
                // Round 2: G
                ((b & d) | (c & !d), (5 * i + 1) % 16)
            } else if i < 48 {
                // Round 3: H
                (b ^ c ^ d, (3 * i + 5) % 16)
            } else {
                // Round 4: I
                (c ^ (b | !d), (7 * i) % 16)
            };

            let temp = a
                .wrapping_add(f)
                .wrapping_add(w[g])
                .wrapping_add(T[i])
                .rotate_left(S[i])
                .wrapping_add(b);

            a = d;
            d = c;
            c = b;
            b = temp;
        }

        // Feed-forward: each chaining variable picks up its pre-block value.
        self.a = self.a.wrapping_add(a);
        self.b = self.b.wrapping_add(b);
        self.c = self.c.wrapping_add(c);
        self.d = self.d.wrapping_add(d);
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the MD5 digest of `data` in a single shot.
pub fn md5_digest(data: &[u8]) -> [u8; MD5_OUTPUT_SIZE] {
    let mut hasher = Md5::new();
    hasher.update(data);
    hasher.seal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, RngCore};

    // Known test vectors from RFC 1321, appendix A.5

    #[test]
    fn test_md5_empty() {
        // MD5("") => d41d8cd98f00b204e9800998ecf8427e
        let digest = md5_digest(b"");
        assert_eq!(hex::encode(digest), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_md5_single_letter() {
        // MD5("a") => 0cc175b9c0f1b6a831c399e269772661
        let digest = md5_digest(b"a");
        assert_eq!(hex::encode(digest), "0cc175b9c0f1b6a831c399e269772661");
    }

    #[test]
    fn test_md5_abc() {
        // MD5("abc") => 900150983cd24fb0d6963f7d28e17f72
        let digest = md5_digest(b"abc");
        assert_eq!(hex::encode(digest), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_md5_message_digest() {
        // MD5("message digest") => f96b697d7cb7938d525a2f31aaf161d0
        let digest = md5_digest(b"message digest");
        assert_eq!(hex::encode(digest), "f96b697d7cb7938d525a2f31aaf161d0");
    }

    #[test]
    fn test_md5_alphabet() {
        let digest = md5_digest(b"abcdefghijklmnopqrstuvwxyz");
        assert_eq!(hex::encode(digest), "c3fcd3d76192e4007dfb496cca67e13b");
    }

    #[test]
    fn test_md5_alphanumeric() {
        let digest =
            md5_digest(b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789");
        assert_eq!(hex::encode(digest), "d174ab98d277d9f5a5611c2c9f419d9f");
    }

    #[test]
    fn test_md5_eighty_digits() {
        let digest = md5_digest(
            b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
        );
        assert_eq!(hex::encode(digest), "57edf4a22be3c955ac49da2e2107b67a");
    }

    // Padding straddles the 56-byte boundary differently on each of these
    // lengths; expected values computed with an independent implementation.
    #[test]
    fn test_padding_boundaries() {
        let cases: [(usize, &str); 5] = [
            (55, "ef1772b6dff9a122358552954ad0df65"),
            (56, "3b0c8ac703f828b04c6c197006d17218"),
            (63, "b06521f39153d618550606be297466d5"),
            (64, "014842d480b571495a4a0363793f7367"),
            (65, "c743a45e0d2e6a95cb859adae0248435"),
        ];
        for (len, expected) in cases {
            let input = vec![b'a'; len];
            assert_eq!(hex::encode(md5_digest(&input)), expected, "length {len}");
        }
    }

    #[test]
    fn test_hex_output_shape() {
        let mut engine = Md5::new();
        engine.absorb(b"hello world").unwrap();
        engine.finalize().unwrap();
        let hex = engine.digest_hex().unwrap();
        assert_eq!(hex.len(), 32);
        assert!(hex.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase()));
        assert_eq!(hex, "5eb63bbbe01eeed093cb22bb8f5acdc3");
    }

    #[test]
    fn test_chunked_absorb_matches_one_shot() {
        let mut engine = Md5::new();
        engine.absorb(b"mess").unwrap();
        engine.absorb(b"").unwrap();
        engine.absorb(b"age ").unwrap();
        engine.absorb(b"digest").unwrap();
        let hash = engine.finalize().unwrap();
        assert_eq!(hash.as_bytes(), &md5_digest(b"message digest"));
    }

    #[test]
    fn test_byte_at_a_time() {
        let input = b"abcdefghijklmnopqrstuvwxyz";
        let mut engine = Md5::new();
        for &byte in input.iter() {
            engine.absorb(&[byte]).unwrap();
        }
        let hash = engine.finalize().unwrap();
        assert_eq!(hash.as_bytes(), &md5_digest(input));
    }

    #[test]
    fn test_random_chunking_equivalence() {
        let mut rng = rand::thread_rng();
        for _ in 0..16 {
            let len = rng.gen_range(0..512);
            let mut input = vec![0u8; len];
            rng.fill_bytes(&mut input);

            let mut engine = Md5::new();
            let mut offset = 0;
            while offset < input.len() {
                let take = rng.gen_range(1..=input.len() - offset);
                engine.absorb(&input[offset..offset + take]).unwrap();
                offset += take;
            }
            let hash = engine.finalize().unwrap();
            assert_eq!(hash.as_bytes(), &md5_digest(&input));
        }
    }

    #[test]
    fn test_absorb_after_finalize_is_rejected() {
        let mut engine = Md5::new();
        engine.absorb(b"abc").unwrap();
        engine.finalize().unwrap();
        assert!(matches!(engine.absorb(b"more"), Err(Error::SealedEngine)));
        // The sealed digest must be unaffected by the rejected call.
        assert_eq!(
            engine.digest_hex().unwrap(),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_double_finalize_is_rejected() {
        let mut engine = Md5::new();
        engine.absorb(b"abc").unwrap();
        engine.finalize().unwrap();
        assert!(matches!(engine.finalize(), Err(Error::SealedEngine)));
    }

    #[test]
    fn test_digest_unreadable_before_seal() {
        let mut engine = Md5::new();
        engine.absorb(b"abc").unwrap();
        assert!(engine.digest_bytes().is_none());
        assert!(engine.digest_hex().is_none());
        engine.finalize().unwrap();
        assert!(engine.digest_bytes().is_some());
    }

    #[test]
    fn test_reset_restores_fresh_behavior() {
        let mut engine = Md5::new();
        engine.absorb(b"some earlier input").unwrap();
        engine.finalize().unwrap();

        engine.reset();
        assert!(!engine.is_sealed());
        engine.absorb(b"abc").unwrap();
        let hash = engine.finalize().unwrap();
        assert_eq!(hash.to_hex(), "900150983cd24fb0d6963f7d28e17f72");

        // Reset mid-stream discards staged bytes too.
        engine.reset();
        let hash = engine.finalize().unwrap();
        assert_eq!(hash.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_absorbing_nothing_is_a_noop() {
        let mut engine = Md5::new();
        engine.absorb(b"").unwrap();
        engine.absorb(b"").unwrap();
        let hash = engine.finalize().unwrap();
        assert_eq!(hash.to_hex(), "d41d8cd98f00b204e9800998ecf8427e");
    }
}
