//! Additively homomorphic ElGamal encryption over G (§4.5).

use rand::{CryptoRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Result, ShuffleError};
use crate::group::{Point, Scalar};

const LOG_TARGET: &str = "shuffle_argument::elgamal";

/// The decryption key. Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey(Scalar);

/// The matching public key, `pk = sk·G`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey(pub Point);

impl SecretKey {
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self(Scalar::random(rng))
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey(Point::generator() * self.0)
    }

    pub fn expose_scalar(&self) -> Scalar {
        self.0
    }
}

pub fn key_gen<R: RngCore + CryptoRng>(rng: &mut R) -> (SecretKey, PublicKey) {
    let sk = SecretKey::random(rng);
    let pk = sk.public_key();
    (sk, pk)
}

/// A ciphertext `(U, V) = (r·G, m + r·pk)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ctxt {
    pub u: Point,
    pub v: Point,
}

/// Encrypts `m` under `pk` using the supplied randomizer `r`.
#[tracing::instrument(target = LOG_TARGET, skip_all)]
pub fn encrypt(pk: &PublicKey, m: Point, r: Scalar) -> Ctxt {
    Ctxt {
        u: Point::generator() * r,
        v: m + pk.0 * r,
    }
}

/// Samples `r` uniformly and encrypts `m` under `pk`.
pub fn encrypt_fresh<R: RngCore + CryptoRng>(pk: &PublicKey, m: Point, rng: &mut R) -> (Ctxt, Scalar) {
    let r = Scalar::random(rng);
    (encrypt(pk, m, r), r)
}

/// Recovers the plaintext point `m = V - sk·U`.
#[tracing::instrument(target = LOG_TARGET, skip_all)]
pub fn decrypt(sk: &SecretKey, ctxt: &Ctxt) -> Point {
    ctxt.v - ctxt.u * sk.0
}

/// Componentwise ciphertext addition: `Enc(m1) + Enc(m2) = Enc(m1 + m2)`.
pub fn add(a: &Ctxt, b: &Ctxt) -> Ctxt {
    Ctxt {
        u: a.u + b.u,
        v: a.v + b.v,
    }
}

/// Scalar multiplication of a ciphertext: `a·Enc(m) = Enc(a·m)`.
pub fn multiply(a: Scalar, ctxt: &Ctxt) -> Ctxt {
    Ctxt {
        u: ctxt.u * a,
        v: ctxt.v * a,
    }
}

/// `Σ a_i·E_i`. Errors on an empty or mismatched-length input, since the
/// identity ciphertext under addition is `Enc_0(0)` with randomizer 0 and
/// silently returning it would mask a caller bug.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(n = es.len()))]
pub fn dot(as_: &[Scalar], es: &[Ctxt]) -> Result<Ctxt> {
    if as_.is_empty() || es.is_empty() {
        return Err(ShuffleError::InvalidArgument(
            "dot product over an empty ciphertext vector".into(),
        ));
    }
    if as_.len() != es.len() {
        return Err(ShuffleError::InvalidArgument(format!(
            "scalar vector length {} does not match ciphertext vector length {}",
            as_.len(),
            es.len()
        )));
    }
    let mut acc = Ctxt {
        u: Point::infinity(),
        v: Point::infinity(),
    };
    for (a, e) in as_.iter().zip(es.iter()) {
        let term = multiply(*a, e);
        acc = add(&acc, &term);
    }
    Ok(acc)
}

/// Re-randomizes `ctxt` in place by a freshly sampled randomizer, returning
/// the randomizer used so callers needing the opening (e.g. the shuffle
/// argument's witness) can retain it.
pub fn rerandomize<R: RngCore + CryptoRng>(pk: &PublicKey, ctxt: &Ctxt, rng: &mut R) -> (Ctxt, Scalar) {
    let r = Scalar::random(rng);
    let blinding = encrypt(pk, Point::infinity(), r);
    (add(ctxt, &blinding), r)
}
