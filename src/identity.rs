//! Deterministic identities for terms and statements.
//!
//! An identity is the first eight bytes of the MD5 digest of a canonical
//! string, read as a little-endian `i64`. The same canonical string always
//! yields the same identity, across calls, instances and processes, so the
//! values can double as row keys for persisted stores.
//!
//! Canonical strings are not unambiguous: the IRI `http://x` and the plain
//! literal `"http://x"` print the same, as do `"chat@fr"` and `"chat"@fr`.
//! Indexes therefore keep values under a *key*, the same digest taken over
//! an encoding that tags term kinds and length-prefixes lexical values. Two
//! distinct values share a key only through a digest collision.

use core::hash::BuildHasherDefault;
use md5::{Digest, Md5};
use seahash::SeaHasher;

// ------------- Identity -------------
pub type Identity = i64;

/// Hasher for maps and sets keyed by identities.
pub type IdentityHasher = BuildHasherDefault<SeaHasher>;

pub fn hash(canonical: &str) -> Identity {
    let digest = Md5::digest(canonical.as_bytes());
    let mut leading = [0u8; 8];
    leading.copy_from_slice(&digest[..8]);
    i64::from_le_bytes(leading)
}

/// Anything that can be kept by identity: terms, triples and quadruples.
pub trait Identified {
    /// Digest of the canonical string.
    fn identity(&self) -> Identity;
    /// Digest of the structural encoding; what indexes and dictionaries are keyed by.
    fn key(&self) -> Identity;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic() {
        let first = hash("http://example.org/alice");
        for _ in 0..10 {
            assert_eq!(hash("http://example.org/alice"), first);
        }
    }

    #[test]
    fn hash_matches_md5_prefix() {
        assert_eq!(hash(""), 338333539836370388);
        assert_eq!(hash("hello"), 8514701317032132957);
        assert_eq!(hash("http://example.org/alice"), -7127252926890399614);
    }

    #[test]
    fn distinct_strings_have_distinct_identities() {
        assert_ne!(hash("http://example.org/alice"), hash("http://example.org/bob"));
    }
}
