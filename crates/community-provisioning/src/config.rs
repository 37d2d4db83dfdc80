//! Configuration types for the provisioning workflow.

use serde::Deserialize;

/// Fallback gap between the two phases when no admission watcher is
/// configured. Empirically chosen by the original operators: long enough
/// for the `account_create` to land in an earlier block than the
/// application operations under normal network conditions.
pub const SETTLING_DELAY_MS: u64 = 4_000;

/// Default timeout wrapped around each broadcast submission.
pub const DEFAULT_BROADCAST_TIMEOUT_MS: u64 = 30_000;

/// Default bound on waiting for on-chain admission of phase one.
pub const DEFAULT_CONFIRMATION_TIMEOUT_MS: u64 = 60_000;

/// Runtime configuration for community provisioning
#[derive(Clone, Debug, Deserialize)]
pub struct ProvisioningConfig {
    /// Existing funding account that pays the account-creation fee
    pub creator_account: String,

    /// Fixed inter-phase delay used when no admission watcher is available
    pub settling_delay_ms: u64,

    /// Timeout for each broadcast submission
    pub broadcast_timeout_ms: u64,

    /// Bound on waiting for admission confirmation of phase one
    pub confirmation_timeout_ms: u64,

    /// Prompt shown by the wallet before signing the account creation
    pub confirm_prompt: String,
}

impl Default for ProvisioningConfig {
    fn default() -> Self {
        Self {
            creator_account: "initminer".to_string(),
            settling_delay_ms: SETTLING_DELAY_MS,
            broadcast_timeout_ms: DEFAULT_BROADCAST_TIMEOUT_MS,
            confirmation_timeout_ms: DEFAULT_CONFIRMATION_TIMEOUT_MS,
            confirm_prompt: "Are you sure?".to_string(),
        }
    }
}
