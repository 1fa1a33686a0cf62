//! Proof that a committed vector's entries multiply to a public value
//! (§4.7): knowledge of `a_1 … a_n, r` such that `b = a_1 * … * a_n` and
//! `C = Comm(ck; a_1, …, a_n; r)`.

use rand::{CryptoRng, RngCore};

use crate::commitment::{commit_fresh, CommitKey};
use crate::error::{Result, ShuffleError};
use crate::group::{Point, Scalar};
use crate::hash::{scalar_from_hash, Hash};

const LOG_TARGET: &str = "shuffle_argument::product_argument";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProductStatement {
    pub c: Point,
    pub b: Scalar,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductProof {
    pub c0: Point,
    pub c1: Point,
    pub c2: Point,
    pub aa: Vec<Scalar>,
    pub bb: Vec<Scalar>,
    pub r: Scalar,
    pub s: Scalar,
}

fn challenge(hash: &mut Hash, c0: Point, c1: Point, c2: Point) -> Scalar {
    hash.update_point(&c0).update_point(&c1).update_point(&c2);
    scalar_from_hash(hash)
}

fn check_sizes(ck: &CommitKey, n: usize) -> Result<()> {
    if n < 2 {
        return Err(ShuffleError::InvalidArgument(format!(
            "product argument needs at least 2 entries, got {n}"
        )));
    }
    if ck.g.len() < n {
        return Err(ShuffleError::InvalidArgument(format!(
            "commitment key of size {} too small for {n} entries",
            ck.g.len()
        )));
    }
    Ok(())
}

/// Builds the running-product telescoping vectors and the two auxiliary
/// blinding commitments, then opens both at a single challenge point.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(n = w0.len()))]
pub fn create_proof<R: RngCore + CryptoRng>(
    ck: &CommitKey,
    hash: &mut Hash,
    statement: &ProductStatement,
    w0: &[Scalar],
    w1: Scalar,
    rng: &mut R,
) -> Result<ProductProof> {
    let n = w0.len();
    check_sizes(ck, n)?;

    let ds: Vec<Scalar> = (0..n).map(|_| Scalar::random(rng)).collect();
    let mut es: Vec<Scalar> = (0..n).map(|_| Scalar::random(rng)).collect();
    let mut bs: Vec<Scalar> = Vec::with_capacity(n);
    bs.push(w0[0]);
    for i in 1..n {
        bs.push(w0[i] * bs[i - 1]);
    }
    es[0] = ds[0];
    es[n - 1] = Scalar::zero();

    let mut sd: Vec<Scalar> = Vec::with_capacity(n - 1);
    let mut bd: Vec<Scalar> = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        sd.push(-es[i] * ds[i + 1]);
        bd.push(es[i + 1] - w0[i + 1] * es[i] - bs[i] * ds[i + 1]);
    }

    let (c0, r0) = commit_fresh(ck, &ds, rng)?;
    let (c1, r1) = commit_fresh(ck, &sd, rng)?;
    let (c2, r2) = commit_fresh(ck, &bd, rng)?;

    let c = challenge(hash, c0, c1, c2);

    let aa: Vec<Scalar> = (0..n).map(|i| c * w0[i] + ds[i]).collect();
    let bb: Vec<Scalar> = (0..n).map(|i| c * bs[i] + es[i]).collect();

    let r = c * w1 + r0;
    let s = c * r2 + r1;

    Ok(ProductProof { c0, c1, c2, aa, bb, r, s })
}

/// Re-derives the challenge from `(C0, C1, C2)` and checks both opened
/// linear relations against the public product `b`.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(n = proof.aa.len()))]
pub fn verify_proof(
    ck: &CommitKey,
    hash: &mut Hash,
    statement: &ProductStatement,
    proof: &ProductProof,
) -> bool {
    let n = proof.aa.len();
    if n < 2 || proof.bb.len() != n || ck.g.len() < n {
        return false;
    }

    let c = challenge(hash, proof.c0, proof.c1, proof.c2);

    let lhs0 = statement.c * c + proof.c0;
    let lhs1 = proof.c2 * c + proof.c1;

    let as_ = &proof.aa;
    let bs = &proof.bb;
    let mut rhs0 = Point::infinity();
    let mut rhs1 = Point::infinity();
    let mut i = 0usize;
    while i < n - 2 {
        let gi = ck.g[i];
        rhs0 += gi * as_[i];
        rhs1 += gi * (bs[i + 1] * c - bs[i] * as_[i + 1]);
        i += 1;
    }
    rhs0 += ck.g[i] * as_[i];
    rhs1 += ck.g[i] * (c * c * statement.b - bs[i] * as_[i + 1]);
    i += 1;
    rhs0 += ck.g[i] * as_[i];

    lhs0 == rhs0 + ck.h * proof.r && lhs1 == rhs1 + ck.h * proof.s
}
