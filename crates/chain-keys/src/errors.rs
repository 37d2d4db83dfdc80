//! Key derivation error types.

use thiserror::Error;

/// Errors raised while deriving keys or building authorities.
///
/// All variants are fatal to the invoking workflow: they indicate invalid
/// caller input, never a transient condition, so nothing here is retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// A required credential field was empty
    #[error("Empty credential: {field}")]
    EmptyCredential {
        /// Which field was empty ("account" or "password")
        field: &'static str,
    },

    /// The derived seed digest is not a valid secp256k1 scalar
    #[error("Derived seed is not a valid secret scalar")]
    InvalidSeed,
}
