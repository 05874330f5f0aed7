//! Streaming SHA-256 content hashing.

use sha2::{Digest, Sha256};
use std::fmt;
use std::io::{self, Read};

/// Chunk size used when streaming a file through the hasher.
const CHUNK_SIZE: usize = 64 * 1024;

/// Lowercase hexadecimal SHA-256 of a file's full content.
///
/// Equal bytes always produce an equal digest.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentDigest(String);

impl ContentDigest {
    /// The digest as a hex string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reusable content hasher.
///
/// One instance is owned by a single sequential run and reset before each
/// file. It must not be shared between files hashed concurrently.
pub struct ContentHasher {
    inner: Sha256,
    buffer: Vec<u8>,
}

impl Default for ContentHasher {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentHasher {
    /// Create a hasher in its initial state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Sha256::new(),
            buffer: vec![0u8; CHUNK_SIZE],
        }
    }

    /// Drop any state left over from a previous file.
    pub fn reset(&mut self) {
        Digest::reset(&mut self.inner);
    }

    /// Hash everything `reader` yields, from its current position to EOF.
    ///
    /// The hasher is reset first, so the digest depends only on these bytes.
    pub fn digest_reader<R: Read + ?Sized>(&mut self, reader: &mut R) -> io::Result<ContentDigest> {
        self.reset();
        loop {
            let n = match reader.read(&mut self.buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.inner.update(&self.buffer[..n]);
        }
        Ok(ContentDigest(format!("{:x}", self.inner.finalize_reset())))
    }
}
