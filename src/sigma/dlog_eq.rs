//! Knowledge of equality of discrete logs: "I know `w` such that
//! `w·G == A` and `w·H == B`".

use rand::{CryptoRng, RngCore};

use crate::group::{Point, Scalar};
use crate::hash::{scalar_from_hash, Hash};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DLogEqStatement {
    pub g: Point,
    pub a: Point,
    pub h: Point,
    pub b: Point,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DLogEqProof {
    pub t: Point,
    pub k: Point,
    pub r: Scalar,
}

fn challenge(hash: &mut Hash, s: &DLogEqStatement, t: Point, k: Point) -> Scalar {
    hash.update_point(&s.g)
        .update_point(&s.a)
        .update_point(&s.h)
        .update_point(&s.b)
        .update_point(&t)
        .update_point(&k);
    scalar_from_hash(hash)
}

pub fn create_proof<R: RngCore + CryptoRng>(
    statement: &DLogEqStatement,
    hash: &mut Hash,
    w: Scalar,
    rng: &mut R,
) -> DLogEqProof {
    let v = Scalar::random(rng);
    let t = statement.g * v;
    let k = statement.h * v;
    let c = challenge(hash, statement, t, k);
    let r = v - c * w;
    DLogEqProof { t, k, r }
}

/// Checks `r·G == T - c·A` and `r·H == K - c·B`.
pub fn verify_proof(statement: &DLogEqStatement, hash: &mut Hash, proof: &DLogEqProof) -> bool {
    let c = challenge(hash, statement, proof.t, proof.k);
    let r_g = statement.g * proof.r;
    let r_h = statement.h * proof.r;
    r_g == proof.t - statement.a * c && r_h == proof.k - statement.b * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::test_rng;

    fn honest_statement(rng: &mut impl rand::RngCore) -> (DLogEqStatement, Scalar) {
        let w = Scalar::random(rng);
        let g = Point::random(rng);
        let h = Point::random(rng);
        (
            DLogEqStatement {
                g,
                a: g * w,
                h,
                b: h * w,
            },
            w,
        )
    }

    #[test]
    fn honest_proof_verifies() {
        let mut rng = test_rng();
        let (statement, w) = honest_statement(&mut rng);

        let mut prover_hash = Hash::new();
        let proof = create_proof(&statement, &mut prover_hash, w, &mut rng);

        let mut verifier_hash = Hash::new();
        assert!(verify_proof(&statement, &mut verifier_hash, &proof));
    }

    #[test]
    fn mismatched_discrete_logs_reject() {
        let mut rng = test_rng();
        let w = Scalar::random(&mut rng);
        let g = Point::random(&mut rng);
        let h = Point::random(&mut rng);
        // B is w.r.t a different exponent than A — not a valid DLogEq witness.
        let statement = DLogEqStatement {
            g,
            a: g * w,
            h,
            b: h * (w + Scalar::from_u64(1)),
        };

        let mut prover_hash = Hash::new();
        let proof = create_proof(&statement, &mut prover_hash, w, &mut rng);

        let mut verifier_hash = Hash::new();
        assert!(!verify_proof(&statement, &mut verifier_hash, &proof));
    }
}
