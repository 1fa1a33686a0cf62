//! Pedersen vector commitment (§4.4).

use rand::{CryptoRng, Error as RandError, RngCore};

use crate::config::COMMIT_KEY_DOMAIN;
use crate::error::{Result, ShuffleError};
use crate::group::{Point, Scalar};
use crate::hash::Hash;
use crate::prg::Prg;

const LOG_TARGET: &str = "shuffle_argument::commitment";

/// `Prg` is a deterministic, seedable byte stream; it is used here (and
/// only here, outside of permutation sampling) as the `RngCore` source for
/// deriving commitment-key generators from a label, so the whole key is
/// reproducible from nothing but its size — no secret trapdoor, no stored
/// randomness. See [`create_commit_key`].
impl RngCore for Prg {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), RandError> {
        self.fill(dest);
        Ok(())
    }
}

/// Deterministic setup only: not a source of secret randomness.
impl CryptoRng for Prg {}

/// A commitment key `(G_1 … G_n, H)`. Immutable after creation, shareable
/// between prover and verifier.
#[derive(Clone)]
pub struct CommitKey {
    pub g: Vec<Point>,
    pub h: Point,
}

/// Deterministically derives a verifiable generator from a domain label and
/// index, by hashing the label into a seed for a fresh [`Prg`] and drawing a
/// uniform curve point from it. Any verifier can recompute the same
/// generator from the label alone, so the key carries no trapdoor.
fn derive_generator(label: &[u8], index: u64) -> Point {
    let mut hash = Hash::new();
    hash.update_bytes(label);
    hash.update_bytes(&index.to_be_bytes());
    let digest = hash.finalize();

    let mut seed = [0u8; crate::prg::SEED_SIZE];
    seed.copy_from_slice(&digest[..crate::prg::SEED_SIZE]);
    let mut prg = Prg::new(seed);
    Point::random(&mut prg)
}

const BLINDING_GENERATOR_INDEX: u64 = u64::MAX;

/// Builds a commitment key of the requested size. `size` must be nonzero.
#[tracing::instrument(target = LOG_TARGET, fields(size = size))]
pub fn create_commit_key(size: usize) -> Result<CommitKey> {
    if size == 0 {
        return Err(ShuffleError::InvalidArgument(
            "cannot create a commitment key of size 0".into(),
        ));
    }
    let g = (0..size as u64)
        .map(|i| derive_generator(COMMIT_KEY_DOMAIN, i))
        .collect();
    let h = derive_generator(COMMIT_KEY_DOMAIN, BLINDING_GENERATOR_INDEX);
    tracing::debug!(target: LOG_TARGET, "derived {size} independent generators");
    Ok(CommitKey { g, h })
}

/// `Σ m_i·G_i + r·H`. Missing coordinates (when `|m| < |ck|`) act as zero;
/// `|m| > |ck|` is an error.
#[tracing::instrument(target = LOG_TARGET, skip_all, fields(n = m.len()))]
pub fn commit(ck: &CommitKey, r: Scalar, m: &[Scalar]) -> Result<Point> {
    if m.len() > ck.g.len() {
        return Err(ShuffleError::InvalidArgument(format!(
            "commitment message of length {} exceeds key size {}",
            m.len(),
            ck.g.len()
        )));
    }
    let mut acc = Point::infinity();
    for (mi, gi) in m.iter().zip(ck.g.iter()) {
        acc += *gi * *mi;
    }
    acc += ck.h * r;
    Ok(acc)
}

/// Samples `r` uniformly and returns `(commit(ck, r, m), r)`.
pub fn commit_fresh<R: RngCore + CryptoRng>(
    ck: &CommitKey,
    m: &[Scalar],
    rng: &mut R,
) -> Result<(Point, Scalar)> {
    let r = Scalar::random(rng);
    let c = commit(ck, r, m)?;
    Ok((c, r))
}

pub fn check_commitment(ck: &CommitKey, c: Point, r: Scalar, m: &[Scalar]) -> bool {
    match commit(ck, r, m) {
        Ok(expected) => expected == c,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_std::test_rng;

    #[test]
    fn create_commit_key_rejects_zero_size() {
        assert!(create_commit_key(0).is_err());
    }

    #[test]
    fn create_commit_key_is_deterministic() {
        let a = create_commit_key(10).unwrap();
        let b = create_commit_key(10).unwrap();
        assert_eq!(a.g.len(), b.g.len());
        for (x, y) in a.g.iter().zip(b.g.iter()) {
            assert_eq!(x, y);
        }
        assert_eq!(a.h, b.h);
    }

    #[test]
    fn commit_is_additively_homomorphic() {
        let ck = create_commit_key(5).unwrap();
        let mut rng = test_rng();
        let m1: Vec<Scalar> = (0..5).map(|_| Scalar::random(&mut rng)).collect();
        let m2: Vec<Scalar> = (0..5).map(|_| Scalar::random(&mut rng)).collect();
        let r1 = Scalar::random(&mut rng);
        let r2 = Scalar::random(&mut rng);

        let c1 = commit(&ck, r1, &m1).unwrap();
        let c2 = commit(&ck, r2, &m2).unwrap();

        let summed_m: Vec<Scalar> = m1.iter().zip(m2.iter()).map(|(a, b)| *a + *b).collect();
        let c3 = commit(&ck, r1 + r2, &summed_m).unwrap();

        assert_eq!(c1 + c2, c3);
    }

    #[test]
    fn check_commitment_round_trips() {
        let ck = create_commit_key(3).unwrap();
        let mut rng = test_rng();
        let m = vec![Scalar::from_u64(1), Scalar::from_u64(2), Scalar::from_u64(3)];
        let (c, r) = commit_fresh(&ck, &m, &mut rng).unwrap();
        assert!(check_commitment(&ck, c, r, &m));
        assert!(!check_commitment(&ck, c, r, &[Scalar::from_u64(9), Scalar::from_u64(2), Scalar::from_u64(3)]));
    }

    #[test]
    fn commit_rejects_oversized_message() {
        let ck = create_commit_key(2).unwrap();
        let m = vec![Scalar::from_u64(1); 3];
        assert!(commit(&ck, Scalar::zero(), &m).is_err());
    }

    #[test]
    fn commit_treats_short_message_as_zero_padded() {
        let ck = create_commit_key(3).unwrap();
        let m_short = vec![Scalar::from_u64(7)];
        let mut m_padded = m_short.clone();
        m_padded.push(Scalar::zero());
        m_padded.push(Scalar::zero());

        let c_short = commit(&ck, Scalar::zero(), &m_short).unwrap();
        let c_padded = commit(&ck, Scalar::zero(), &m_padded).unwrap();
        assert_eq!(c_short, c_padded);
    }

    #[test]
    fn binding_holds_against_random_search_for_a_second_opening() {
        let ck = create_commit_key(4).unwrap();
        let mut rng = test_rng();
        let m = vec![
            Scalar::from_u64(3),
            Scalar::from_u64(1),
            Scalar::from_u64(4),
            Scalar::from_u64(1),
        ];
        let (c, r) = commit_fresh(&ck, &m, &mut rng).unwrap();

        for _ in 0..64 {
            let other_r = Scalar::random(&mut rng);
            let other_m: Vec<Scalar> = (0..4).map(|_| Scalar::random(&mut rng)).collect();
            if other_r == r && other_m == m {
                continue;
            }
            assert!(!check_commitment(&ck, c, other_r, &other_m));
        }
    }
}
