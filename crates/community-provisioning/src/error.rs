//! Error types for the provisioning workflow.
//!
//! Both phases surface failures through this one taxonomy; the trigger
//! layer adapts it to callbacks (phase one) or shared-state flags (phase
//! two) as needed.

use chain_keys::KeyError;
use thiserror::Error;

/// Result type alias for provisioning operations
pub type Result<T> = std::result::Result<T, ProvisioningError>;

/// Errors that can occur during community provisioning
#[derive(Debug, Error)]
pub enum ProvisioningError {
    /// Key derivation from the supplied credentials failed
    #[error("Credential derivation failed: {0}")]
    CredentialDerivation(#[from] KeyError),

    /// The broadcast collaborator rejected the submission
    #[error("Broadcast rejected: {reason}")]
    BroadcastRejected {
        /// Rejection reason reported by the collaborator
        reason: String,
    },

    /// The broadcast collaborator did not respond within the timeout
    #[error("Broadcast timed out after {elapsed_ms}ms")]
    BroadcastTimeout {
        /// Configured timeout that elapsed
        elapsed_ms: u64,
    },

    /// The account-creation operation was not observed on-chain in time
    #[error("No admission confirmation for '{account}' within {waited_ms}ms")]
    ConfirmationTimeout {
        /// Account whose creation was being awaited
        account: String,
        /// Configured confirmation timeout that elapsed
        waited_ms: u64,
    },

    /// The workflow was cancelled at a suspension point
    #[error("Workflow cancelled")]
    Cancelled,

    /// Operation payload could not be encoded
    #[error("Operation encoding failed: {0}")]
    Serialization(String),
}

impl ProvisioningError {
    /// Check if error is fatal (bad input, never retried)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::CredentialDerivation(_) | Self::Serialization(_)
        )
    }

    /// Check if error is recoverable (a re-triggered run may succeed)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::BroadcastTimeout { .. }
                | Self::ConfirmationTimeout { .. }
                | Self::BroadcastRejected { .. }
        )
    }
}
