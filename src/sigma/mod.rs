//! Sigma protocols for discrete-log statements (§4.6), made non-interactive
//! by deriving the challenge from the transcript passed to each function
//! rather than from an interactive verifier message.

pub mod dlog;
pub mod dlog_eq;

pub use dlog::{DLogProof, DLogStatement};
pub use dlog_eq::{DLogEqProof, DLogEqStatement};
