//! Digest algorithm table and artifact hashing.
//!
//! The table maps every algorithm name this crate recognizes to the byte
//! length of its output. Names missing from the table are custom or future
//! algorithms: their values must still be hex, but any length is accepted.
//!
//! See: <https://github.com/in-toto/attestation/blob/main/spec/v1/digest_set.md>

use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

/// Recognized algorithm names and their output size in bytes.
///
/// `gitBlob`, `gitCommit`, `gitTag` and `gitTree` are SHA-1 object ids.
/// `dirHash` is a SHA-256 over a directory tree and `goModuleH1` is the
/// hex form of a Go module `h1:` hash. `shake128` and `shake256`
/// are fixed at 256 and 512 bits of output.
static DIGEST_LENGTHS: Lazy<BTreeMap<&'static str, usize>> = Lazy::new(|| {
    BTreeMap::from([
        ("md5", 16),
        ("sha1", 20),
        ("gitBlob", 20),
        ("gitCommit", 20),
        ("gitTag", 20),
        ("gitTree", 20),
        ("sha224", 28),
        ("sha512_224", 28),
        ("sha3_224", 28),
        ("sha256", 32),
        ("sha512_256", 32),
        ("sha3_256", 32),
        ("dirHash", 32),
        ("goModuleH1", 32),
        ("shake128", 32),
        ("sha384", 48),
        ("sha3_384", 48),
        ("sha512", 64),
        ("sha3_512", 64),
        ("shake256", 64),
    ])
});

/// Expected decoded length for `algorithm`, or `None` if it is not recognized.
pub fn expected_len(algorithm: &str) -> Option<usize> {
    DIGEST_LENGTHS.get(algorithm).copied()
}

/// All recognized algorithms with their byte lengths, sorted by name.
pub fn known_algorithms() -> impl Iterator<Item = (&'static str, usize)> {
    DIGEST_LENGTHS.iter().map(|(name, len)| (*name, *len))
}

/// Compute the SHA-256 hex digest of a byte slice.
pub fn sha256_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Compute the SHA-256 hex digest of a file.
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    let data = std::fs::read(path)?;
    Ok(sha256_bytes(&data))
}
