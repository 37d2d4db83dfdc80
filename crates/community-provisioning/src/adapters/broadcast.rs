//! Simulated Broadcast Gateway
//!
//! Implements the `BroadcastGateway` and `AdmissionWatcher` ports over an
//! in-process ledger model. In production this would issue RPC calls to a
//! wallet/node endpoint; the simulation keeps the same observable contract
//! (acceptance receipts, admission becoming visible after acceptance) for
//! development and tests.

use crate::domain::operations::AccountCreateOperation;
use crate::error::{ProvisioningError, Result};
use crate::ports::outbound::{
    AdmissionWatcher, BroadcastGateway, BroadcastReceipt, TransactionRequest,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::time::Duration;
use tracing::{debug, info};

/// How often the admission watcher re-checks the simulated ledger.
const ADMISSION_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Default)]
struct SimulatedLedger {
    admitted_accounts: HashSet<String>,
    account_creates: Vec<AccountCreateOperation>,
    transactions: Vec<TransactionRequest>,
    accepted: u64,
}

/// In-process broadcast gateway over a simulated ledger.
#[derive(Default)]
pub struct SimulatedBroadcastGateway {
    ledger: RwLock<SimulatedLedger>,
    reject_with: Option<String>,
}

impl SimulatedBroadcastGateway {
    /// Gateway that accepts every submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway that rejects every submission with `reason`.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self {
            ledger: RwLock::default(),
            reject_with: Some(reason.into()),
        }
    }

    /// Pre-admit an account, as if its creation was confirmed earlier.
    pub fn admit_account(&self, account: impl Into<String>) {
        self.ledger.write().admitted_accounts.insert(account.into());
    }

    /// Number of accepted submissions of either shape.
    pub fn accepted_count(&self) -> u64 {
        self.ledger.read().accepted
    }

    /// Clone of the recorded transaction bundles' operation lists.
    pub fn transaction_operations(&self) -> Vec<Vec<crate::domain::operations::CustomJsonOperation>> {
        self.ledger
            .read()
            .transactions
            .iter()
            .map(|tx| tx.operations.clone())
            .collect()
    }

    fn accept(&self, ledger: &mut SimulatedLedger) -> Result<BroadcastReceipt> {
        if let Some(reason) = &self.reject_with {
            return Err(ProvisioningError::BroadcastRejected {
                reason: reason.clone(),
            });
        }
        ledger.accepted += 1;
        Ok(BroadcastReceipt {
            transaction_id: format!("sim-{}", ledger.accepted),
            accepted_at: unix_now(),
        })
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[async_trait]
impl BroadcastGateway for SimulatedBroadcastGateway {
    async fn submit_account_create(
        &self,
        op: AccountCreateOperation,
        confirm_prompt: &str,
    ) -> Result<BroadcastReceipt> {
        debug!(
            "[provision] simulated prompt '{}' for account '{}'",
            confirm_prompt, op.new_account_name
        );
        let mut ledger = self.ledger.write();
        let receipt = self.accept(&mut ledger)?;

        info!(
            "[provision] simulated ledger admitted account '{}' ({})",
            op.new_account_name, receipt.transaction_id
        );
        ledger.admitted_accounts.insert(op.new_account_name.clone());
        ledger.account_creates.push(op);
        Ok(receipt)
    }

    async fn submit_transaction(&self, request: TransactionRequest) -> Result<BroadcastReceipt> {
        let mut ledger = self.ledger.write();
        let receipt = self.accept(&mut ledger)?;

        debug!(
            "[provision] simulated ledger accepted {} operations ({})",
            request.operations.len(),
            receipt.transaction_id
        );
        ledger.transactions.push(request);
        Ok(receipt)
    }
}

#[async_trait]
impl AdmissionWatcher for SimulatedBroadcastGateway {
    async fn await_admission(&self, account: &str) -> Result<()> {
        loop {
            if self.ledger.read().admitted_accounts.contains(account) {
                return Ok(());
            }
            tokio::time::sleep(ADMISSION_POLL_INTERVAL).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chain_keys::AccountAuthorities;

    fn create_op(name: &str) -> AccountCreateOperation {
        let authorities = AccountAuthorities::derive(name, "validpass").unwrap();
        crate::domain::operations::build_account_create_op("initminer", name, &authorities)
    }

    #[tokio::test]
    async fn test_accepted_account_becomes_admitted() {
        let gateway = SimulatedBroadcastGateway::new();
        gateway
            .submit_account_create(create_op("alice"), "Are you sure?")
            .await
            .unwrap();

        gateway.await_admission("alice").await.unwrap();
        assert_eq!(gateway.accepted_count(), 1);
    }

    #[tokio::test]
    async fn test_rejection_reports_reason() {
        let gateway = SimulatedBroadcastGateway::rejecting("insufficient funds");
        let err = gateway
            .submit_account_create(create_op("alice"), "Are you sure?")
            .await
            .unwrap_err();

        match err {
            ProvisioningError::BroadcastRejected { reason } => {
                assert_eq!(reason, "insufficient funds");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
        assert_eq!(gateway.accepted_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_admission_waits_until_created() {
        let gateway = std::sync::Arc::new(SimulatedBroadcastGateway::new());

        let watcher = std::sync::Arc::clone(&gateway);
        let wait = tokio::spawn(async move { watcher.await_admission("alice").await });

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!wait.is_finished());

        gateway.admit_account("alice");
        wait.await.unwrap().unwrap();
    }
}
