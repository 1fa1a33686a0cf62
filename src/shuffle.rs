//! The shuffle argument proper (§4.9–§4.11): permute and re-randomize a
//! vector of ciphertexts, and prove the result is a permutation of the
//! input without revealing the permutation.

use rand::{CryptoRng, RngCore};

use crate::commitment::{commit, commit_fresh, CommitKey};
use crate::elgamal::{self, Ctxt, PublicKey};
use crate::error::{Result, ShuffleError};
use crate::group::{Point, Scalar};
use crate::hash::{scalar_from_hash, Hash};
use crate::multi_exp_argument::{self, MultiExpProof, MultiExpStatement};
use crate::prg::Prg;
use crate::product_argument::{self, ProductProof, ProductStatement};

const LOG_TARGET: &str = "shuffle_argument::shuffle";

pub type Permutation = Vec<usize>;

/// Draws a uniformly random permutation of `0..size` via Fisher–Yates,
/// consuming one `u64` from `prg` per swap.
pub fn sample_permutation(size: usize, prg: &mut Prg) -> Permutation {
    if size == 0 {
        return Permutation::new();
    }
    let mut p: Permutation = (0..size).collect();
    let mut r = vec![0u64; size];
    prg.fill_u64(&mut r);

    let mut c = 0usize;
    for i in (0..size).rev() {
        let j = (r[c] as usize) % (i + 1);
        c += 1;
        p.swap(i, j);
    }
    p
}

/// Reorders `things[perm[0]], things[perm[1]], …`.
pub fn permute<T: Clone>(things: &[T], perm: &Permutation) -> Result<Vec<T>> {
    if things.len() != perm.len() {
        return Err(ShuffleError::InvalidArgument(format!(
            "permutation size {} does not match input size {}",
            perm.len(),
            things.len()
        )));
    }
    Ok(perm.iter().map(|&idx| things[idx].clone()).collect())
}

fn permutation_as_scalars(p: &Permutation) -> Vec<Scalar> {
    p.iter().map(|&idx| Scalar::from_u64(idx as u64)).collect()
}

/// `{x, x^2, …, x^n}`.
fn exp_successive(x: Scalar, n: usize) -> Vec<Scalar> {
    let mut values = Vec::with_capacity(n);
    let mut cur = x;
    values.push(cur);
    for _ in 1..n {
        cur = cur * x;
        values.push(cur);
    }
    values
}

fn randomize(pk: &PublicKey, ctxt: &Ctxt, r: Scalar) -> Ctxt {
    elgamal::add(&elgamal::encrypt(pk, Point::infinity(), r), ctxt)
}

fn randomize_all(pk: &PublicKey, es: &[Ctxt], rs: &[Scalar]) -> Vec<Ctxt> {
    es.iter().zip(rs.iter()).map(|(e, r)| randomize(pk, e, *r)).collect()
}

fn negate_inner_product(a: &[Scalar], b: &[Scalar]) -> Scalar {
    let d = a.iter().zip(b.iter()).fold(Scalar::zero(), |acc, (x, y)| acc + *x * *y);
    -d
}

/// `Σ G_i · s`, with no `H` blinding term — used by the verifier to fold
/// the public constant `-z` into the product-argument's commitment check.
fn commit_constant_no_randomness(ck: &CommitKey, s: Scalar) -> Point {
    ck.g.iter().fold(Point::infinity(), |acc, gi| acc + *gi * s)
}

fn shuffle_challenge1(hash: &mut Hash, es: &[Ctxt], permuted: &[Ctxt], c: Point) -> Scalar {
    for e in es {
        hash.update_point(&e.u).update_point(&e.v);
    }
    for e in permuted {
        hash.update_point(&e.u).update_point(&e.v);
    }
    hash.update_point(&c);
    scalar_from_hash(hash)
}

fn shuffle_challenge2(hash: &mut Hash, x: Scalar, c: Point) -> Scalar {
    hash.update_scalar(&x).update_point(&c);
    scalar_from_hash(hash)
}

fn shuffle_challenge3(hash: &mut Hash, y: Scalar) -> Scalar {
    hash.update_scalar(&y);
    scalar_from_hash(hash)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShuffleProof {
    pub permuted: Vec<Ctxt>,
    pub c_a: Point,
    pub c_b: Point,
    pub product_proof: ProductProof,
    pub multi_exp_proof: MultiExpProof,
}

/// A shuffler holding the public key of the deck it re-randomizes under,
/// the commitment key for its proofs, and the PRG that samples its
/// permutations.
pub struct Shuffler {
    pk: PublicKey,
    ck: CommitKey,
    prg: Prg,
}

impl Shuffler {
    pub fn new(pk: PublicKey, ck: CommitKey, prg: Prg) -> Self {
        Self { pk, ck, prg }
    }

    /// Permutes and re-randomizes `es`, returning the output ciphertexts
    /// alongside a proof that the output is a permutation of the input.
    #[tracing::instrument(target = LOG_TARGET, skip_all, fields(n = es.len()))]
    pub fn shuffle<R: RngCore + CryptoRng>(
        &mut self,
        es: &[Ctxt],
        hash: &mut Hash,
        rng: &mut R,
    ) -> Result<ShuffleProof> {
        let n = es.len();
        if n < 2 {
            return Err(ShuffleError::InvalidArgument(format!(
                "shuffle needs at least 2 ciphertexts, got {n}"
            )));
        }

        let p = sample_permutation(n, &mut self.prg);
        let rho: Vec<Scalar> = (0..n).map(|_| Scalar::random(rng)).collect();
        let permuted_es = permute(es, &p)?;
        let p_es = randomize_all(&self.pk, &permuted_es, &rho);

        let a = permutation_as_scalars(&p);
        let (c_a, r_a) = commit_fresh(&self.ck, &a, rng)?;

        let x = shuffle_challenge1(hash, es, &p_es, c_a);

        let x_exp = exp_successive(x, n);
        let b = permute(&x_exp, &p)?;
        let (c_b, r_b) = commit_fresh(&self.ck, &b, rng)?;

        let y = shuffle_challenge2(hash, x, c_b);
        let z = shuffle_challenge3(hash, y);

        let dz: Vec<Scalar> = a.iter().zip(b.iter()).map(|(ai, bi)| y * *ai + *bi - z).collect();
        let prod = dz.iter().fold(Scalar::from_u64(1), |acc, d| acc * *d);

        let t = y * r_a + r_b;
        let cd_cz = commit(&self.ck, t, &dz)?;
        let product_proof =
            product_argument::create_proof(&self.ck, hash, &ProductStatement { c: cd_cz, b: prod }, &dz, t, rng)?;

        let rr = negate_inner_product(&rho, &b);
        let ex = elgamal::add(&elgamal::encrypt(&self.pk, Point::infinity(), rr), &elgamal::dot(&b, &p_es)?);
        let multi_exp_proof = multi_exp_argument::create_proof(
            &self.ck,
            &self.pk,
            hash,
            &MultiExpStatement { es: p_es.clone(), e: ex, c: c_b },
            &b,
            r_b,
            rr,
            rng,
        )?;

        Ok(ShuffleProof {
            permuted: p_es,
            c_a,
            c_b,
            product_proof,
            multi_exp_proof,
        })
    }

    /// Verifies that `proof.permuted` is a re-randomized permutation of
    /// `es`. Returns `false` (never `Err`) on any mismatch, malformed
    /// proof, or size disagreement.
    #[tracing::instrument(target = LOG_TARGET, skip_all, fields(n = es.len()))]
    pub fn verify_shuffle(&self, es: &[Ctxt], proof: &ShuffleProof, hash: &mut Hash) -> bool {
        let n = es.len();
        if n < 2 || proof.permuted.len() != n {
            return false;
        }

        let x = shuffle_challenge1(hash, es, &proof.permuted, proof.c_a);
        let y = shuffle_challenge2(hash, x, proof.c_b);
        let z = shuffle_challenge3(hash, y);

        let cz = commit_constant_no_randomness(&self.ck, -z);
        let cd = proof.c_a * y + proof.c_b;
        let cd_cz = cd + cz;

        let mut x_exp = Vec::with_capacity(n);
        x_exp.push(x);
        let mut prod = x - z;
        for i in 1..n {
            x_exp.push(x_exp[i - 1] * x);
            prod = prod * (Scalar::from_u64(i as u64) * y + x_exp[i] - z);
        }

        let check0 = product_argument::verify_proof(
            &self.ck,
            hash,
            &ProductStatement { c: cd_cz, b: prod },
            &proof.product_proof,
        );

        let ex = match elgamal::dot(&x_exp, es) {
            Ok(ex) => ex,
            Err(_) => return false,
        };
        let check1 = multi_exp_argument::verify_proof(
            &self.ck,
            &self.pk,
            hash,
            &MultiExpStatement { es: proof.permuted.clone(), e: ex, c: proof.c_b },
            &proof.multi_exp_proof,
        );

        check0 && check1
    }
}
