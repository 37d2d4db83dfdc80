//! # Chain Keys - Credential Derivation & Account Authorities
//!
//! Deterministic derivation of per-role signing keys from a
//! username/password pair, and construction of the authority structures
//! embedded in `account_create` operations.
//!
//! ## Components
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `derivation` | Credential → secp256k1 keypair, per role |
//! | `authority` | Authority structures (threshold + key weights) |
//!
//! ## Properties
//!
//! - **Deterministic**: identical `(account, password, role)` inputs always
//!   yield byte-identical keypairs. No RNG anywhere in this crate.
//! - **Single-signer authorities**: every built authority has threshold 1,
//!   no account authorizations, and exactly one key entry with weight 1.
//! - **Zeroized secrets**: private key material is wiped on drop and never
//!   appears in `Debug` output.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod authority;
pub mod derivation;
pub mod errors;

// Re-exports
pub use authority::{build_authority, AccountAuthorities, Authority, AuthoritySpec};
pub use derivation::{derive_keypair, PrivateKey, PublicKey, Role, RoleKeypair};
pub use errors::KeyError;

/// Prefix attached to the hex encoding of public keys on the wire.
pub const PUBLIC_KEY_PREFIX: &str = "PUB";

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
