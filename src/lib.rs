//! A verifiable shuffle argument over ElGamal ciphertexts.
//!
//! The crate is layered bottom-up: field/group primitives (`group`), a
//! Fiat–Shamir transcript (`hash`) and a deterministic PRG (`prg`), a
//! Pedersen vector commitment (`commitment`) and additively homomorphic
//! encryption (`elgamal`), then the Sigma protocols (`sigma`) and the two
//! sub-arguments (`product_argument`, `multi_exp_argument`) that compose
//! into the top-level `shuffle` argument.

pub mod commitment;
pub mod config;
pub mod elgamal;
pub mod error;
pub mod group;
pub mod hash;
pub mod multi_exp_argument;
pub mod prg;
pub mod product_argument;
pub mod shuffle;
pub mod sigma;

pub use commitment::{check_commitment, commit, commit_fresh, create_commit_key, CommitKey};
pub use elgamal::{decrypt, encrypt, encrypt_fresh, key_gen, Ctxt, PublicKey, SecretKey};
pub use error::{CodecError, Result, ShuffleError};
pub use group::{curve_init, Point, Scalar};
pub use hash::{scalar_from_hash, Hash};
pub use prg::Prg;
pub use shuffle::{permute, sample_permutation, Permutation, ShuffleProof, Shuffler};
