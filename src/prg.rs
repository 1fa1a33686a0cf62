//! Deterministic AES-128-CTR byte stream (§4.3).
//!
//! Used exclusively for non-adversarial randomness: sampling the Fisher–
//! Yates swap indices in [`crate::shuffle::sample_permutation`]. It is never
//! used to derive Fiat–Shamir challenges — those come from [`crate::hash`].

use aes::cipher::{KeyIvInit, StreamCipher};
use aes::Aes128;
use ctr::Ctr128BE;

const LOG_TARGET: &str = "shuffle_argument::prg";

pub const SEED_SIZE: usize = 16;
pub const BLOCK_SIZE: usize = 16;

type Aes128Ctr = Ctr128BE<Aes128>;

/// A seeded, deterministic byte stream.
pub struct Prg {
    seed: [u8; SEED_SIZE],
    counter: u64,
}

impl Prg {
    pub fn new(seed: [u8; SEED_SIZE]) -> Self {
        Self { seed, counter: 0 }
    }

    /// Fills `dest` with the next `dest.len()` bytes of keystream, covering
    /// `dest.len().div_ceil(BLOCK_SIZE)` blocks. The ancestor C++ PRG
    /// computed this count as `if (nblocks % BlockSize()) nblocks++` —
    /// comparing a block *count* against the block *size* instead of
    /// checking `n % BlockSize()`, so it rounded up on almost every call.
    /// `div_ceil` is the intended, bug-free semantics (SPEC_FULL.md §9).
    #[tracing::instrument(target = LOG_TARGET, skip(self, dest), fields(n = dest.len()))]
    pub fn fill(&mut self, dest: &mut [u8]) {
        if dest.is_empty() {
            return;
        }
        let nblocks = dest.len().div_ceil(BLOCK_SIZE);
        let mut keystream = vec![0u8; nblocks * BLOCK_SIZE];

        for block in keystream.chunks_mut(BLOCK_SIZE) {
            let mut iv = [0u8; 16];
            iv[..8].copy_from_slice(&self.counter.to_be_bytes());
            let mut cipher = Aes128Ctr::new((&self.seed).into(), (&iv).into());
            cipher.apply_keystream(block);
            self.counter += 1;
        }

        dest.copy_from_slice(&keystream[..dest.len()]);
    }

    /// Fills `dest` with successive big-endian `u64` words drawn from the
    /// byte stream — the "next machine-word from the PRG" the Fisher–Yates
    /// sampler (§4.9 step 1) consumes.
    pub fn fill_u64(&mut self, dest: &mut [u64]) {
        let mut bytes = vec![0u8; dest.len() * 8];
        self.fill(&mut bytes);
        for (word, chunk) in dest.iter_mut().zip(bytes.chunks_exact(8)) {
            *word = u64::from_be_bytes(chunk.try_into().unwrap());
        }
    }
}
