//! Proof that a ciphertext is a linear combination of other ciphertexts
//! (§4.8): knowledge of `r, x, a_1 … a_n` such that
//! `E = Enc(pk; 1; x) + Σ a_i·E_i` and `C = Comm(ck; a_1 … a_n; r)`.

use rand::{CryptoRng, RngCore};

use crate::commitment::{commit, commit_fresh, CommitKey};
use crate::elgamal::{self, Ctxt, PublicKey};
use crate::error::{Result, ShuffleError};
use crate::group::{Point, Scalar};
use crate::hash::{scalar_from_hash, Hash};

const LOG_TARGET: &str = "shuffle_argument::multi_exp_argument";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiExpStatement {
    pub es: Vec<Ctxt>,
    pub e: Ctxt,
    pub c: Point,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiExpProof {
    pub c0: Point,
    pub c1: Point,
    pub e: Ctxt,
    pub a: Vec<Scalar>,
    pub r: Scalar,
    pub b: Scalar,
    pub s: Scalar,
    pub t: Scalar,
}

/// Commits a single scalar against the key's first generator only —
/// `m·G_1 + r·H` — the β-blinding commitment used alongside the full
/// `a_0` vector commitment.
fn commit_one<R: RngCore + CryptoRng>(ck: &CommitKey, m: Scalar, rng: &mut R) -> Result<(Point, Scalar)> {
    commit_fresh(ck, &[m], rng)
}

fn hash_statement(hash: &mut Hash, statement: &MultiExpStatement) {
    hash.update_point(&statement.e.u)
        .update_point(&statement.e.v)
        .update_point(&statement.c);
    for ctxt in &statement.es {
        hash.update_point(&ctxt.u).update_point(&ctxt.v);
    }
}

fn challenge(hash: &mut Hash, statement: &MultiExpStatement, c0: Point, c1: Point, e: &Ctxt) -> Scalar {
    hash_statement(hash, statement);
    hash.update_point(&c0).update_point(&c1).update_point(&e.u).update_point(&e.v);
    scalar_from_hash(hash)
}

fn mul_and_sum(a: &[Scalar], b: &[Scalar], x: Scalar) -> Vec<Scalar> {
    a.iter().zip(b.iter()).map(|(ai, bi)| *ai + *bi * x).collect()
}

fn check_sizes(ck: &CommitKey, n: usize, es_len: usize) -> Result<()> {
    if n == 0 {
        return Err(ShuffleError::InvalidArgument(
            "multi-exponentiation argument needs at least 1 entry".into(),
        ));
    }
    if es_len != n {
        return Err(ShuffleError::InvalidArgument(format!(
            "statement has {es_len} ciphertexts but witness has {n} coefficients"
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

#[tracing::instrument(target = LOG_TARGET, skip_all, fields(n = w0.len()))]
pub fn create_proof<R: RngCore + CryptoRng>(
    ck: &CommitKey,
    pk: &PublicKey,
    hash: &mut Hash,
    statement: &MultiExpStatement,
    w0: &[Scalar],
    w1: Scalar,
    w2: Scalar,
    rng: &mut R,
) -> Result<MultiExpProof> {
    let n = w0.len();
    check_sizes(ck, n, statement.es.len())?;

    let a0: Vec<Scalar> = (0..n).map(|_| Scalar::random(rng)).collect();
    let (c0, r0) = commit_fresh(ck, &a0, rng)?;

    let b = Scalar::random(rng);
    let (c1, s0) = commit_one(ck, b, rng)?;

    let t = Scalar::random(rng);
    let b_g = Point::generator() * b;
    let e0 = elgamal::add(&elgamal::encrypt(pk, b_g, t), &elgamal::dot(&a0, &statement.es)?);

    let c = challenge(hash, statement, c0, c1, &e0);

    let aa = mul_and_sum(&a0, w0, c);
    let rr = r0 + w1 * c;
    let tt = t + w2 * c;

    Ok(MultiExpProof {
        c0,
        c1,
        e: e0,
        a: aa,
        r: rr,
        b,
        s: s0,
        t: tt,
    })
}

#[tracing::instrument(target = LOG_TARGET, skip_all, fields(n = proof.a.len()))]
pub fn verify_proof(
    ck: &CommitKey,
    pk: &PublicKey,
    hash: &mut Hash,
    statement: &MultiExpStatement,
    proof: &MultiExpProof,
) -> bool {
    let n = proof.a.len();
    if n == 0 || n != statement.es.len() || ck.g.len() < n {
        return false;
    }

    let c = challenge(hash, statement, proof.c0, proof.c1, &proof.e);

    let expected_c = proof.c0 + statement.c * c;
    let e0 = elgamal::add(&proof.e, &elgamal::multiply(c, &statement.e));
    let e1 = match elgamal::dot(&proof.a, &statement.es) {
        Ok(dot) => elgamal::add(&elgamal::encrypt(pk, Point::generator() * proof.b, proof.t), &dot),
        Err(_) => return false,
    };

    let committed = match commit(ck, proof.r, &proof.a) {
        Ok(c) => c,
        Err(_) => return false,
    };

    committed == expected_c && e0 == e1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitment::create_commit_key;
    use crate::elgamal::key_gen;
    use ark_std::test_rng;

    #[test]
    fn honest_proof_verifies_for_n_100() {
        let mut rng = test_rng();
        let n = 100;
        let ck = create_commit_key(n).unwrap();
        let (_sk, pk) = key_gen(&mut rng);

        let es: Vec<Ctxt> = (0..n)
            .map(|_| elgamal::encrypt_fresh(&pk, Point::random(&mut rng), &mut rng).0)
            .collect();
        let w0: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();
        let w1 = Scalar::random(&mut rng);
        let w2 = Scalar::random(&mut rng);

        let c = commit(&ck, w1, &w0).unwrap();
        let e = elgamal::add(
            &elgamal::encrypt(&pk, Point::infinity(), w2),
            &elgamal::dot(&w0, &es).unwrap(),
        );
        let statement = MultiExpStatement { es, e, c };

        let mut prover_hash = Hash::new();
        let proof = create_proof(&ck, &pk, &mut prover_hash, &statement, &w0, w1, w2, &mut rng).unwrap();

        let mut verifier_hash = Hash::new();
        assert!(verify_proof(&ck, &pk, &mut verifier_hash, &statement, &proof));
    }

    #[test]
    fn tampered_statement_rejects() {
        let mut rng = test_rng();
        let n = 6;
        let ck = create_commit_key(n).unwrap();
        let (_sk, pk) = key_gen(&mut rng);

        let es: Vec<Ctxt> = (0..n)
            .map(|_| elgamal::encrypt_fresh(&pk, Point::random(&mut rng), &mut rng).0)
            .collect();
        let w0: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();
        let w1 = Scalar::random(&mut rng);
        let w2 = Scalar::random(&mut rng);

        let c = commit(&ck, w1, &w0).unwrap();
        let e = elgamal::add(
            &elgamal::encrypt(&pk, Point::infinity(), w2),
            &elgamal::dot(&w0, &es).unwrap(),
        );
        let statement = MultiExpStatement { es, e, c };

        let mut prover_hash = Hash::new();
        let mut proof = create_proof(&ck, &pk, &mut prover_hash, &statement, &w0, w1, w2, &mut rng).unwrap();
        proof.a[0] += Scalar::from_u64(1);

        let mut verifier_hash = Hash::new();
        assert!(!verify_proof(&ck, &pk, &mut verifier_hash, &statement, &proof));
    }

    #[test]
    fn tampered_statement_e_rejects() {
        let mut rng = test_rng();
        let n = 6;
        let ck = create_commit_key(n).unwrap();
        let (_sk, pk) = key_gen(&mut rng);

        let es: Vec<Ctxt> = (0..n)
            .map(|_| elgamal::encrypt_fresh(&pk, Point::random(&mut rng), &mut rng).0)
            .collect();
        let w0: Vec<Scalar> = (0..n).map(|_| Scalar::random(&mut rng)).collect();
        let w1 = Scalar::random(&mut rng);
        let w2 = Scalar::random(&mut rng);

        let c = commit(&ck, w1, &w0).unwrap();
        let e = elgamal::add(
            &elgamal::encrypt(&pk, Point::infinity(), w2),
            &elgamal::dot(&w0, &es).unwrap(),
        );
        let statement = MultiExpStatement { es, e, c };

        let mut prover_hash = Hash::new();
        let proof = create_proof(&ck, &pk, &mut prover_hash, &statement, &w0, w1, w2, &mut rng).unwrap();

        // Perturb the statement's E by adding an encryption of the first
        // commitment-key generator with randomness 0 — E no longer matches
        // the witness the proof was built for.
        let mut tampered = statement.clone();
        tampered.e = elgamal::add(&tampered.e, &elgamal::encrypt(&pk, ck.g[0], Scalar::zero()));

        let mut verifier_hash = Hash::new();
        assert!(!verify_proof(&ck, &pk, &mut verifier_hash, &tampered, &proof));
    }

    #[test]
    fn rejects_size_mismatch() {
        let ck = create_commit_key(4).unwrap();
        let mut rng = test_rng();
        let (_sk, pk) = key_gen(&mut rng);
        let es: Vec<Ctxt> = vec![elgamal::encrypt_fresh(&pk, Point::random(&mut rng), &mut rng).0];
        let statement = MultiExpStatement { es, e: elgamal::encrypt_fresh(&pk, Point::infinity(), &mut rng).0, c: Point::infinity() };
        let w0 = vec![Scalar::from_u64(1), Scalar::from_u64(2)];
        assert!(create_proof(&ck, &pk, &mut Hash::new(), &statement, &w0, Scalar::zero(), Scalar::zero(), &mut rng).is_err());
    }
}
