//! # Outbound Ports
//!
//! Traits for the external collaborators: the broadcast transport, the
//! shared workflow-state store, and the optional on-chain admission
//! watcher.

use crate::domain::operations::{AccountCreateOperation, CustomJsonOperation};
use crate::error::{ProvisioningError, Result};
use async_trait::async_trait;
use chain_keys::PrivateKey;

/// Receipt returned when the broadcast collaborator accepts a submission.
///
/// Acceptance is not confirmation: the collaborator has taken the
/// transaction, not proven its inclusion in a block.
#[derive(Clone, Debug)]
pub struct BroadcastReceipt {
    /// Collaborator-assigned transaction identifier.
    pub transaction_id: String,
    /// Unix timestamp of acceptance.
    pub accepted_at: u64,
}

/// A bundle of application operations submitted as one signed transaction.
pub struct TransactionRequest {
    /// Ordered operation list.
    pub operations: Vec<CustomJsonOperation>,
    /// Keys signing the transaction (a single posting key here).
    pub signing_keys: Vec<PrivateKey>,
}

/// Broadcast collaborator - outbound port.
///
/// Two call shapes: the wallet-side prompted flow for `account_create`
/// (signing is the wallet's concern), and direct submission of a signed
/// application-operation bundle.
#[async_trait]
pub trait BroadcastGateway: Send + Sync {
    /// Submit an `account_create` through the confirmation-prompt flow.
    async fn submit_account_create(
        &self,
        op: AccountCreateOperation,
        confirm_prompt: &str,
    ) -> Result<BroadcastReceipt>;

    /// Submit a bundle of operations as one signed transaction.
    async fn submit_transaction(&self, request: TransactionRequest) -> Result<BroadcastReceipt>;
}

/// Shared workflow-state store - outbound port.
///
/// An injected interface rather than a process-wide store, so tests can
/// substitute a fake. Only the orchestrator writes `pending` and
/// `operation_error`, and only at phase boundaries.
pub trait WorkflowStateStore: Send + Sync {
    /// Idempotency flag: the target account already exists.
    fn account_already_created(&self) -> bool;

    /// Signal that a workflow invocation is in flight.
    fn set_pending(&self, pending: bool);

    /// Signal that the latest phase-two invocation failed.
    fn set_operation_error(&self, failed: bool);

    /// Terminal success notification.
    fn notify_success(&self);

    /// Terminal failure notification with detail.
    fn notify_failure(&self, error: &ProvisioningError);
}

/// On-chain admission watcher - outbound port.
///
/// Preferred inter-phase ordering mechanism: resolves once the
/// account-creation operation for `account` has been observed on-chain.
/// When unavailable, the sequencer falls back to a fixed settling delay.
#[async_trait]
pub trait AdmissionWatcher: Send + Sync {
    /// Resolve once `account`'s creation is admitted.
    async fn await_admission(&self, account: &str) -> Result<()>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock broadcast gateway recording every submission.
#[derive(Default)]
pub struct MockBroadcastGateway {
    /// Recorded `account_create` submissions.
    pub account_creates: parking_lot::Mutex<Vec<AccountCreateOperation>>,
    /// Recorded transaction bundles.
    pub transactions: parking_lot::Mutex<Vec<TransactionRequest>>,
    /// Instants at which submissions arrived (for sequencing assertions).
    pub submitted_at: parking_lot::Mutex<Vec<tokio::time::Instant>>,
    /// When set, every submission is rejected with this reason.
    pub reject_with: Option<String>,
}

impl MockBroadcastGateway {
    /// Gateway that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that rejects every submission.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            reject_with: Some(reason.into()),
            ..Self::default()
        }
    }

    /// Total number of submissions of either shape.
    pub fn submission_count(&self) -> usize {
        self.account_creates.lock().len() + self.transactions.lock().len()
    }

    fn receipt(&self) -> Result<BroadcastReceipt> {
        if let Some(reason) = &self.reject_with {
            return Err(ProvisioningError::BroadcastRejected {
                reason: reason.clone(),
            });
        }
        Ok(BroadcastReceipt {
            transaction_id: format!("mock-{}", self.submission_count()),
            accepted_at: 0,
        })
    }
}

#[async_trait]
impl BroadcastGateway for MockBroadcastGateway {
    async fn submit_account_create(
        &self,
        op: AccountCreateOperation,
        _confirm_prompt: &str,
    ) -> Result<BroadcastReceipt> {
        self.submitted_at.lock().push(tokio::time::Instant::now());
        let receipt = self.receipt();
        if receipt.is_ok() {
            self.account_creates.lock().push(op);
        }
        receipt
    }

    async fn submit_transaction(&self, request: TransactionRequest) -> Result<BroadcastReceipt> {
        self.submitted_at.lock().push(tokio::time::Instant::now());
        let receipt = self.receipt();
        if receipt.is_ok() {
            self.transactions.lock().push(request);
        }
        receipt
    }
}
