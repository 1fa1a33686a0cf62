//! Fiat–Shamir transcript (§4.2).
//!
//! A streaming SHA3-256 (Keccak-f[1600], 1088-bit rate) sponge. `update`
//! absorbs byte spans, [`Point`]s and [`Scalar`]s; [`Hash::finalize`]
//! destructively squeezes a 32-byte digest — destructive in the sense the
//! ancestor C++ transcript was: calling it twice in a row on the same
//! object yields two *different* digests, which the test suite uses to
//! catch accidental transcript reuse (SPEC_FULL.md §8, "finalize
//! non-idempotence"). [`scalar_from_hash`] instead finalizes a throwaway
//! clone, leaving the caller's transcript untouched so the protocol can
//! keep absorbing after deriving a challenge.

use ark_ff::PrimeField;
use sha3::{Digest as _, Sha3_256};

use crate::group::{Point, Scalar};

pub const DIGEST_SIZE: usize = 32;
pub type Digest = [u8; DIGEST_SIZE];

/// A Fiat–Shamir transcript. Cheaply `Clone`-able so a protocol step can
/// fork a transcript for a sub-argument without disturbing the parent.
#[derive(Clone)]
pub struct Hash(Sha3_256);

impl Default for Hash {
    fn default() -> Self {
        Self::new()
    }
}

impl Hash {
    pub fn new() -> Self {
        Self(Sha3_256::new())
    }

    pub fn update_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.0.update(bytes);
        self
    }

    pub fn update_point(&mut self, point: &Point) -> &mut Self {
        let bytes = point.to_bytes();
        self.update_bytes(&bytes)
    }

    pub fn update_scalar(&mut self, scalar: &Scalar) -> &mut Self {
        let bytes = scalar.to_bytes();
        self.update_bytes(&bytes)
    }

    pub fn update_points<'a>(&mut self, points: impl IntoIterator<Item = &'a Point>) -> &mut Self {
        for p in points {
            self.update_point(p);
        }
        self
    }

    /// Squeeze a digest, then fold it back into the sponge so the object's
    /// usability is intentionally disturbed: a second `finalize()` call
    /// will not reproduce the same output. Use [`scalar_from_hash`] (which
    /// finalizes a clone) when the transcript needs to stay open.
    pub fn finalize(&mut self) -> Digest {
        let digest: Digest = self.0.clone().finalize().into();
        self.0.update(digest);
        digest
    }
}

/// Finalizes a clone of `hash`, leaving `hash` itself open for further
/// absorption, and reduces the digest into F_q via big-endian read modulo q.
pub fn scalar_from_hash(hash: &Hash) -> Scalar {
    let mut clone = hash.clone();
    let digest = clone.finalize();
    Scalar(ark_bls12_381::Fr::from_be_bytes_mod_order(&digest))
}
