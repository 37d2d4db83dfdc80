//! # Credential Key Derivation (secp256k1)
//!
//! Derives one signing keypair per permission role from a username/password
//! pair. The seed is `SHA-256(account || role || password)` and the digest
//! is used directly as the secret scalar, so the mapping is a pure function
//! of its inputs.
//!
//! ## Security Properties
//!
//! - No RNG dependency: derivation is fully deterministic
//! - Secret scalars are zeroized on drop
//! - `Debug` never prints key material

use crate::errors::KeyError;
use crate::PUBLIC_KEY_PREFIX;
use k256::ecdsa::SigningKey;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Signing permission tier, from highest (owner) to lowest (posting), plus
/// the non-authority memo key used for message encryption.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full account control, including key rotation.
    Owner,
    /// Funds transfer and most account operations.
    Active,
    /// Social operations (posts, votes, custom application messages).
    Posting,
    /// Memo encryption key. Not an authority.
    Memo,
}

impl Role {
    /// Lower-case wire name, also the seed component for derivation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Active => "active",
            Role::Posting => "posting",
            Role::Memo => "memo",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compressed secp256k1 public key (33 bytes).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey([u8; 33]);

impl PublicKey {
    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Wire representation: network prefix followed by the hex encoding
    /// of the compressed point.
    pub fn to_prefixed_string(&self) -> String {
        format!("{}{}", PUBLIC_KEY_PREFIX, hex::encode(self.0))
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_prefixed_string())
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", self.to_prefixed_string())
    }
}

/// A secret scalar that zeroizes on drop.
///
/// Handed to the broadcast collaborator for transaction signing; never
/// persisted and never printed.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey([u8; 32]);

impl PrivateKey {
    /// Get the raw scalar bytes (use immediately, do not retain).
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Hex encoding of the scalar, for collaborators that take key
    /// material as a string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print the actual scalar
        f.write_str("PrivateKey(***)")
    }
}

/// A derived keypair together with the role it was derived for.
#[derive(Clone, Debug)]
pub struct RoleKeypair {
    /// Role the keypair belongs to.
    pub role: Role,
    /// Public half.
    pub public: PublicKey,
    /// Secret half (zeroized on drop).
    pub private: PrivateKey,
}

/// Derive the keypair for `role` from a username/password pair.
///
/// Pure and deterministic: the same inputs always produce byte-identical
/// output. Fails with [`KeyError::EmptyCredential`] on empty input and
/// [`KeyError::InvalidSeed`] in the (negligible-probability) case that the
/// seed digest is not a valid secp256k1 scalar.
pub fn derive_keypair(account: &str, password: &str, role: Role) -> Result<RoleKeypair, KeyError> {
    if account.is_empty() {
        return Err(KeyError::EmptyCredential { field: "account" });
    }
    if password.is_empty() {
        return Err(KeyError::EmptyCredential { field: "password" });
    }

    let mut hasher = Sha256::new();
    hasher.update(account.as_bytes());
    hasher.update(role.as_str().as_bytes());
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();

    let signing_key = SigningKey::from_bytes(&digest).map_err(|_| KeyError::InvalidSeed)?;

    let sec1_bytes = signing_key.verifying_key().to_sec1_bytes();
    // SEC1 compressed public key is always exactly 33 bytes
    let mut public = [0u8; 33];
    public.copy_from_slice(&sec1_bytes[..33]);

    let private: [u8; 32] = signing_key.to_bytes().into();

    Ok(RoleKeypair {
        role,
        public: PublicKey(public),
        private: PrivateKey(private),
    })
}
