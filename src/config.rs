//! The one process-wide tunable this crate centralizes: the domain
//! separation label folded into commitment-key generator derivation.
//! Mirrors the ancestor codebase's convention of keeping its one
//! algebraic-parameter constant (there, a Poseidon configuration) in a
//! single `config` module rather than scattered at call sites.

/// Domain label absorbed (alongside a generator index) when deriving a
/// commitment key's generators in [`crate::commitment::create_commit_key`].
/// Changing this value changes every commitment key this crate can produce;
/// it is not meant to vary at runtime.
pub const COMMIT_KEY_DOMAIN: &[u8] = b"shuffle_argument/pedersen-commit-key/v1";
