//! Structural fingerprints of straight-line programs.
//!
//! A fingerprint is a SHA-256 over a canonical byte encoding of the program
//! text, with domain separation and length prefixing. It identifies the
//! program, not the word: two different programs for the same word have
//! different fingerprints.
//!
//! # Citations
//! - SHA-256: NIST FIPS 180-4 (2015)

use crate::core::{Assignment, Slp};
use crate::symbol::Symbol;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Domain for whole-program fingerprints.
pub const DOMAIN_SLP_V0: &[u8] = b"SLP_V0";

/// Domain for single-assignment fingerprints.
pub const DOMAIN_ASSIGNMENT_V0: &[u8] = b"ASSIGNMENT_V0";

/// A 256-bit hash value.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashValue(pub [u8; 32]);

impl HashValue {
    /// Creates a zero hash (all zeros).
    #[inline]
    pub fn zero() -> Self {
        Self([0u8; 32])
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Computes SHA-256 of the given data with domain separation.
    ///
    /// The hashed input is `b"SLP:" || domain || b":v1" || len(data) || data`,
    /// with the length as a 64-bit little-endian count of bytes.
    pub fn hash_with_domain(domain: &[u8], data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(b"SLP:");
        hasher.update(domain);
        hasher.update(b":v1");
        hasher.update((data.len() as u64).to_le_bytes());
        hasher.update(data);
        Self(hasher.finalize().into())
    }
}

impl std::fmt::Display for HashValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // First 4 bytes are enough to tell programs apart in logs.
        write!(
            f,
            "HashValue({:02x}{:02x}{:02x}{:02x}…)",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

/// Types with a deterministic byte encoding.
pub trait Canonicalizable {
    /// Serialize to canonical byte representation.
    fn to_canonical_bytes(&self) -> Vec<u8>;

    /// Compute domain-separated hash of canonical bytes.
    fn fingerprint_in(&self, domain: &[u8]) -> HashValue {
        HashValue::hash_with_domain(domain, &self.to_canonical_bytes())
    }
}

fn write_symbol(out: &mut Vec<u8>, symbol: &Symbol) {
    match symbol {
        Symbol::Terminal(t) => {
            out.push(0);
            out.push(u8::from(t.is_negated()));
            out.extend_from_slice(&(t.name().len() as u64).to_le_bytes());
            out.extend_from_slice(t.name().as_bytes());
        }
        Symbol::Reference(r) => {
            out.push(1);
            out.push(u8::from(r.negated));
            out.extend_from_slice(&(r.index as u64).to_le_bytes());
        }
    }
}

impl Canonicalizable for Assignment {
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + 10 * self.len());
        out.extend_from_slice(&(self.len() as u64).to_le_bytes());
        for symbol in self {
            write_symbol(&mut out, symbol);
        }
        out
    }
}

impl Canonicalizable for Slp {
    fn to_canonical_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + 16 * self.complexity());
        out.extend_from_slice(&(self.assignment_count() as u64).to_le_bytes());
        for assignment in self.assignments() {
            out.extend_from_slice(&assignment.to_canonical_bytes());
        }
        out
    }
}

impl Slp {
    /// Fingerprint of the program text.
    pub fn fingerprint(&self) -> HashValue {
        self.fingerprint_in(DOMAIN_SLP_V0)
    }
}
