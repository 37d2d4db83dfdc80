//! # Account Authorities
//!
//! Builds the authority structures embedded in `account_create` operations.
//! Only single-signer authorities are produced: threshold 1, no account
//! authorizations, exactly one key entry with weight 1. Multi-sig is not
//! supported.

use crate::derivation::{derive_keypair, PublicKey, Role};
use crate::errors::KeyError;
use serde::Serialize;

/// Which keys/accounts can sign for one permission level.
///
/// Serializes to the wire shape
/// `{weight_threshold, account_auths: [[name, weight]], key_auths: [[key, weight]]}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Authority {
    /// Combined weight required for a valid signature set.
    pub weight_threshold: u32,
    /// Delegated account authorizations (always empty here).
    pub account_auths: Vec<(String, u16)>,
    /// Key authorizations as `(prefixed public key, weight)` pairs.
    pub key_auths: Vec<(String, u16)>,
}

impl Authority {
    /// Single-signer authority over one public key.
    pub fn single_key(public: &PublicKey) -> Self {
        Self {
            weight_threshold: 1,
            account_auths: Vec::new(),
            key_auths: vec![(public.to_prefixed_string(), 1)],
        }
    }
}

/// Result of building an authority for a role.
///
/// The memo role is represented on the wire as a bare public key, not an
/// authority structure; every other role gets a threshold authority.
#[derive(Clone, Debug)]
pub enum AuthoritySpec {
    /// Threshold authority (owner / active / posting).
    Threshold(Authority),
    /// Bare memo key.
    MemoKey(PublicKey),
}

/// Build the authority representation for a derived public key and role.
pub fn build_authority(public: &PublicKey, role: Role) -> AuthoritySpec {
    match role {
        Role::Memo => AuthoritySpec::MemoKey(*public),
        _ => AuthoritySpec::Threshold(Authority::single_key(public)),
    }
}

/// The full set of authorities for a new account, ready to embed in an
/// `account_create` operation.
#[derive(Clone, Debug)]
pub struct AccountAuthorities {
    /// Owner authority.
    pub owner: Authority,
    /// Active authority.
    pub active: Authority,
    /// Posting authority.
    pub posting: Authority,
    /// Bare memo public key.
    pub memo_key: PublicKey,
}

impl AccountAuthorities {
    /// Derive every role keypair from the credentials and build the
    /// corresponding authorities.
    ///
    /// The memo keypair is intentionally NOT derived from the original
    /// credentials: its seed uses the hex of the *posting* private key as
    /// the account component. Accounts already provisioned on the network
    /// carry memo keys derived this way, so changing the seed would orphan
    /// their memo keys. Do not alter without a key-migration plan.
    pub fn derive(account: &str, password: &str) -> Result<Self, KeyError> {
        let owner = derive_keypair(account, password, Role::Owner)?;
        let active = derive_keypair(account, password, Role::Active)?;
        let posting = derive_keypair(account, password, Role::Posting)?;
        let memo = derive_keypair(&posting.private.to_hex(), password, Role::Memo)?;

        Ok(Self {
            owner: Authority::single_key(&owner.public),
            active: Authority::single_key(&active.public),
            posting: Authority::single_key(&posting.public),
            memo_key: memo.public,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authority_shape_invariant() {
        for role in [Role::Owner, Role::Active, Role::Posting] {
            let pair = derive_keypair("alice", "validpass", role).unwrap();
            match build_authority(&pair.public, role) {
                AuthoritySpec::Threshold(auth) => {
                    assert_eq!(auth.weight_threshold, 1);
                    assert!(auth.account_auths.is_empty());
                    assert_eq!(auth.key_auths.len(), 1);
                    assert_eq!(auth.key_auths[0].1, 1);
                    assert_eq!(auth.key_auths[0].0, pair.public.to_prefixed_string());
                }
                AuthoritySpec::MemoKey(_) => panic!("{role} must build a threshold authority"),
            }
        }
    }

    #[test]
    fn test_memo_role_builds_bare_key() {
        let pair = derive_keypair("alice", "validpass", Role::Memo).unwrap();
        match build_authority(&pair.public, Role::Memo) {
            AuthoritySpec::MemoKey(key) => assert_eq!(key, pair.public),
            AuthoritySpec::Threshold(_) => panic!("memo must not build an authority"),
        }
    }

    #[test]
    fn test_account_authorities_deterministic() {
        let a = AccountAuthorities::derive("alice", "validpass").unwrap();
        let b = AccountAuthorities::derive("alice", "validpass").unwrap();

        assert_eq!(a.owner, b.owner);
        assert_eq!(a.active, b.active);
        assert_eq!(a.posting, b.posting);
        assert_eq!(a.memo_key, b.memo_key);
    }

    #[test]
    fn test_memo_seed_uses_posting_key_material() {
        let auths = AccountAuthorities::derive("alice", "validpass").unwrap();

        // A memo key derived from the raw credentials would differ.
        let naive = derive_keypair("alice", "validpass", Role::Memo).unwrap();
        assert_ne!(auths.memo_key, naive.public);

        // The actual seed chain: posting private hex as account component.
        let posting = derive_keypair("alice", "validpass", Role::Posting).unwrap();
        let quirked = derive_keypair(&posting.private.to_hex(), "validpass", Role::Memo).unwrap();
        assert_eq!(auths.memo_key, quirked.public);
    }

    #[test]
    fn test_authority_wire_serialization() {
        let pair = derive_keypair("alice", "validpass", Role::Owner).unwrap();
        let auth = Authority::single_key(&pair.public);
        let json = serde_json::to_value(&auth).unwrap();

        assert_eq!(json["weight_threshold"], 1);
        assert_eq!(json["account_auths"].as_array().unwrap().len(), 0);
        assert_eq!(
            json["key_auths"][0][0],
            pair.public.to_prefixed_string()
        );
        assert_eq!(json["key_auths"][0][1], 1);
    }

    #[test]
    fn test_empty_credentials_propagate() {
        assert!(AccountAuthorities::derive("", "validpass").is_err());
        assert!(AccountAuthorities::derive("alice", "").is_err());
    }
}
