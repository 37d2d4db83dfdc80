//! # Inbound Ports
//!
//! The driving interface: the two independent workflow triggers plus
//! cancellation. The trigger layer (UI dispatch, job queue) is responsible
//! for deduplicating superseded runs; this API provides no mutual
//! exclusion across invocations.

use crate::domain::entities::{CommunityProfile, Credentials};
use crate::error::{ProvisioningError, Result};
use async_trait::async_trait;

/// Callback invoked when phase one succeeds.
pub type SuccessCallback = Box<dyn FnOnce() + Send>;

/// Callback invoked when phase one fails.
pub type ErrorCallback = Box<dyn FnOnce(&ProvisioningError) + Send>;

/// Optional caller-supplied callback handles for the account-creation
/// trigger. Outcomes are produced as a single `Result` internally and
/// adapted to these callbacks at the orchestrator edge.
#[derive(Default)]
pub struct OperationCallbacks {
    /// Invoked exactly once on success (including the idempotent
    /// short-circuit when the account already exists).
    pub on_success: Option<SuccessCallback>,
    /// Invoked exactly once on failure.
    pub on_error: Option<ErrorCallback>,
}

impl OperationCallbacks {
    /// No callbacks; the caller observes the returned `Result` only.
    pub fn none() -> Self {
        Self::default()
    }

    /// Consume and fire the success callback, if any.
    pub(crate) fn succeeded(self) {
        if let Some(callback) = self.on_success {
            callback();
        }
    }

    /// Consume and fire the error callback, if any.
    pub(crate) fn failed(self, error: &ProvisioningError) {
        if let Some(callback) = self.on_error {
            callback(error);
        }
    }
}

/// Trigger for phase one: create the community account.
pub struct AccountCreationRequest {
    /// Credentials of the account to create; also the key-derivation input.
    pub credentials: Credentials,
    /// Caller-supplied outcome callbacks.
    pub callbacks: OperationCallbacks,
}

/// Trigger for phase two: grant the account admin over the community and
/// set display metadata. Assumes phase one already completed.
#[derive(Clone, Debug)]
pub struct CommunitySetupRequest {
    /// Account being granted the admin role.
    pub account_name: String,
    /// Community owner credentials (signs with its posting key).
    pub community_owner: Credentials,
    /// Display metadata to set.
    pub profile: CommunityProfile,
}

/// Inbound port: the two-phase provisioning workflow.
#[async_trait]
pub trait CommunityProvisioningApi: Send + Sync {
    /// Phase one: derive authorities and submit the `account_create`
    /// operation (skipped when the account already exists).
    async fn create_community_account(&self, request: AccountCreationRequest) -> Result<()>;

    /// Phase two: after the settling point, submit the community role and
    /// metadata operations as one signed transaction.
    async fn broadcast_community_setup(&self, request: CommunitySetupRequest) -> Result<()>;

    /// Request cancellation of in-flight invocations at their next
    /// suspension point. An already-issued broadcast cannot be withdrawn.
    fn cancel_in_flight(&self);
}
