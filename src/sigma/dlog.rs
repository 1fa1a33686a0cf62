//! Knowledge of discrete log: "I know `w` such that `w·B == P`".

use rand::{CryptoRng, RngCore};

use crate::group::{Point, Scalar};
use crate::hash::{scalar_from_hash, Hash};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DLogStatement {
    pub b: Point,
    pub p: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DLogProof {
    pub t: Point,
    pub r: Scalar,
}

fn challenge(hash: &mut Hash, b: Point, p: Point, t: Point) -> Scalar {
    hash.update_point(&b).update_point(&p).update_point(&t);
    scalar_from_hash(hash)
}

/// Absorbs `(B, P, T)` into `hash` and derives `r = v - c·w`.
pub fn create_proof<R: RngCore + CryptoRng>(
    statement: &DLogStatement,
    hash: &mut Hash,
    w: Scalar,
    rng: &mut R,
) -> DLogProof {
    let v = Scalar::random(rng);
    let t = statement.b * v;
    let c = challenge(hash, statement.b, statement.p, t);
    let r = v - c * w;
    DLogProof { t, r }
}

/// Checks `c·P + r·B == T`.
pub fn verify_proof(statement: &DLogStatement, hash: &mut Hash, proof: &DLogProof) -> bool {
    let c = challenge(hash, statement.b, statement.p, proof.t);
    statement.p * c + statement.b * proof.r == proof.t
}
