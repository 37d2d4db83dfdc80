//! # Operation Encoding
//!
//! Pure builders for the two operation payloads the workflow submits: the
//! `account_create` operation (phase one) and the pair of application
//! operations carried as signed custom messages on the `community` channel
//! (phase two).

use crate::domain::entities::CommunityProfile;
use crate::error::{ProvisioningError, Result};
use chain_keys::{AccountAuthorities, Authority};
use serde::Serialize;
use serde_json::json;

/// Network-defined minimum fee for an `account_create` operation.
pub const ACCOUNT_CREATION_FEE: &str = "3.000 STEEM";

/// Logical channel carrying community application operations.
pub const COMMUNITY_CHANNEL_ID: &str = "community";

/// Role granted to the provisioned account over its community.
pub const ADMIN_ROLE: &str = "admin";

/// The `account_create` operation wire format.
#[derive(Clone, Debug, Serialize)]
pub struct AccountCreateOperation {
    /// Creation fee, always the network minimum.
    pub fee: String,
    /// Existing funding account paying the fee.
    pub creator: String,
    /// Name of the account being created.
    pub new_account_name: String,
    /// Owner authority.
    pub owner: Authority,
    /// Active authority.
    pub active: Authority,
    /// Posting authority.
    pub posting: Authority,
    /// Bare memo public key (prefixed wire encoding).
    pub memo_key: String,
    /// Account metadata, always empty at creation.
    pub json_metadata: String,
}

/// An application-level operation carried as an opaque signed custom
/// message: `{required_auths, required_posting_auths, id, json}` where
/// `json` encodes `[action, params]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustomJsonOperation {
    /// Accounts whose active authority must sign (always empty here).
    pub required_auths: Vec<String>,
    /// Accounts whose posting authority must sign.
    pub required_posting_auths: Vec<String>,
    /// Logical channel identifier.
    pub id: String,
    /// JSON-encoded `[action, params]` payload.
    pub json: String,
}

/// Build the `account_create` operation for phase one.
///
/// Pure and deterministic; the fee is fixed at the network minimum and
/// the metadata is always empty.
pub fn build_account_create_op(
    creator: &str,
    new_account_name: &str,
    authorities: &AccountAuthorities,
) -> AccountCreateOperation {
    AccountCreateOperation {
        fee: ACCOUNT_CREATION_FEE.to_string(),
        creator: creator.to_string(),
        new_account_name: new_account_name.to_string(),
        owner: authorities.owner.clone(),
        active: authorities.active.clone(),
        posting: authorities.posting.clone(),
        memo_key: authorities.memo_key.to_prefixed_string(),
        json_metadata: String::new(),
    }
}

fn community_operation(
    action: &str,
    params: serde_json::Value,
    actor: &str,
) -> Result<CustomJsonOperation> {
    let payload = serde_json::to_string(&json!([action, params]))
        .map_err(|e| ProvisioningError::Serialization(e.to_string()))?;

    Ok(CustomJsonOperation {
        required_auths: Vec::new(),
        required_posting_auths: vec![actor.to_string()],
        id: COMMUNITY_CHANNEL_ID.to_string(),
        json: payload,
    })
}

/// Build the two community operations for phase two, in fixed order:
/// `setRole` (grant admin) first, then `updateProps` (display metadata).
///
/// Both are submitted atomically in one transaction, so the order does not
/// affect confirmation, only readability of intent.
pub fn build_hivemind_ops(
    community_owner: &str,
    account: &str,
    profile: &CommunityProfile,
) -> Result<[CustomJsonOperation; 2]> {
    let set_role = community_operation(
        "setRole",
        json!({
            "community": community_owner,
            "account": account,
            "role": ADMIN_ROLE,
        }),
        community_owner,
    )?;

    let update_props = community_operation(
        "updateProps",
        json!({
            "community": community_owner,
            "props": profile,
        }),
        community_owner,
    )?;

    Ok([set_role, update_props])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_profile() -> CommunityProfile {
        CommunityProfile {
            title: "Cats".to_string(),
            description: "A community about cats".to_string(),
            nsfw: false,
        }
    }

    #[test]
    fn test_account_create_op_shape() {
        let authorities = AccountAuthorities::derive("alice", "validpass").unwrap();
        let op = build_account_create_op("initminer", "alice", &authorities);

        assert_eq!(op.fee, ACCOUNT_CREATION_FEE);
        assert_eq!(op.creator, "initminer");
        assert_eq!(op.new_account_name, "alice");
        assert_eq!(op.owner.weight_threshold, 1);
        assert!(op.json_metadata.is_empty());
        assert_eq!(op.memo_key, authorities.memo_key.to_prefixed_string());
    }

    #[test]
    fn test_account_create_op_deterministic() {
        let authorities = AccountAuthorities::derive("alice", "validpass").unwrap();
        let a = build_account_create_op("initminer", "alice", &authorities);
        let b = build_account_create_op("initminer", "alice", &authorities);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_hivemind_ops_fixed_order() {
        let ops = build_hivemind_ops("cats-community", "alice", &test_profile()).unwrap();

        let set_role: serde_json::Value = serde_json::from_str(&ops[0].json).unwrap();
        let update_props: serde_json::Value = serde_json::from_str(&ops[1].json).unwrap();
        assert_eq!(set_role[0], "setRole");
        assert_eq!(update_props[0], "updateProps");
    }

    #[test]
    fn test_set_role_grants_admin() {
        let ops = build_hivemind_ops("cats-community", "alice", &test_profile()).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&ops[0].json).unwrap();

        assert_eq!(payload[1]["community"], "cats-community");
        assert_eq!(payload[1]["account"], "alice");
        assert_eq!(payload[1]["role"], "admin");
    }

    #[test]
    fn test_update_props_carries_profile() {
        let ops = build_hivemind_ops("cats-community", "alice", &test_profile()).unwrap();
        let payload: serde_json::Value = serde_json::from_str(&ops[1].json).unwrap();

        assert_eq!(payload[1]["props"]["title"], "Cats");
        assert_eq!(payload[1]["props"]["description"], "A community about cats");
        assert_eq!(payload[1]["props"]["is_nsfw"], false);
    }

    #[test]
    fn test_posting_auth_is_community_owner() {
        let ops = build_hivemind_ops("cats-community", "alice", &test_profile()).unwrap();
        for op in &ops {
            assert!(op.required_auths.is_empty());
            assert_eq!(op.required_posting_auths, vec!["cats-community".to_string()]);
            assert_eq!(op.id, COMMUNITY_CHANNEL_ID);
        }
    }
}
