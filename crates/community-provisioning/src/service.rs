//! # Community Provisioner Service
//!
//! The two-phase orchestrator. Each phase is an independent entry point;
//! they share only read access to the idempotency flag in the injected
//! state store. Invocations are sequential coroutines suspending at the
//! broadcast calls and the settling point; cancellation is observed at
//! exactly those suspension points.

use crate::config::ProvisioningConfig;
use crate::domain::entities::{AccountPhase, Credentials, SetupPhase};
use crate::domain::operations::{build_account_create_op, build_hivemind_ops};
use crate::error::{ProvisioningError, Result};
use crate::ports::inbound::{
    AccountCreationRequest, CommunityProvisioningApi, CommunitySetupRequest,
};
use crate::ports::outbound::{
    AdmissionWatcher, BroadcastGateway, BroadcastReceipt, TransactionRequest, WorkflowStateStore,
};
use crate::sequencer::{cancelled, Sequencer};
use async_trait::async_trait;
use chain_keys::{derive_keypair, AccountAuthorities, Role};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Two-phase community provisioning orchestrator.
pub struct CommunityProvisioner {
    gateway: Arc<dyn BroadcastGateway>,
    state: Arc<dyn WorkflowStateStore>,
    watcher: Option<Arc<dyn AdmissionWatcher>>,
    config: ProvisioningConfig,
    sequencer: Sequencer,
    cancel: watch::Sender<bool>,
}

impl CommunityProvisioner {
    /// Create a provisioner over the given collaborators.
    pub fn new(
        gateway: Arc<dyn BroadcastGateway>,
        state: Arc<dyn WorkflowStateStore>,
        config: ProvisioningConfig,
    ) -> Self {
        info!(
            "[provision] initializing provisioner (creator: {}, settling: {}ms)",
            config.creator_account, config.settling_delay_ms
        );
        let sequencer = Sequencer::new(&config);
        let (cancel, _) = watch::channel(false);

        Self {
            gateway,
            state,
            watcher: None,
            config,
            sequencer,
            cancel,
        }
    }

    /// Attach an on-chain admission watcher, replacing the fixed-delay
    /// settling fallback with bounded confirmation waiting.
    pub fn with_admission_watcher(mut self, watcher: Arc<dyn AdmissionWatcher>) -> Self {
        self.watcher = Some(watcher);
        self
    }

    /// Broadcast timeout as a `Duration`.
    fn broadcast_timeout(&self) -> Duration {
        Duration::from_millis(self.config.broadcast_timeout_ms)
    }

    /// Await a broadcast submission with timeout and cancellation wrapped
    /// around it.
    async fn submit_bounded<F>(&self, submit: F) -> Result<BroadcastReceipt>
    where
        F: std::future::Future<Output = Result<BroadcastReceipt>>,
    {
        let mut cancel = self.cancel.subscribe();
        tokio::select! {
            submitted = tokio::time::timeout(self.broadcast_timeout(), submit) => match submitted {
                Ok(result) => result,
                Err(_) => Err(ProvisioningError::BroadcastTimeout {
                    elapsed_ms: self.config.broadcast_timeout_ms,
                }),
            },
            _ = cancelled(&mut cancel) => Err(ProvisioningError::Cancelled),
        }
    }

    /// Phase one body. Returns whether a broadcast was actually issued
    /// (false on the idempotent short-circuit).
    async fn run_account_creation(&self, id: Uuid, credentials: &Credentials) -> Result<bool> {
        let authorities =
            AccountAuthorities::derive(&credentials.account, credentials.password.expose())?;

        if self.state.account_already_created() {
            info!(
                "[provision] {} account '{}' already exists, skipping broadcast",
                id, credentials.account
            );
            return Ok(false);
        }

        let op = build_account_create_op(
            &self.config.creator_account,
            &credentials.account,
            &authorities,
        );
        let receipt = self
            .submit_bounded(
                self.gateway
                    .submit_account_create(op, &self.config.confirm_prompt),
            )
            .await?;

        info!(
            "[provision] {} account_create for '{}' accepted (tx: {})",
            id, credentials.account, receipt.transaction_id
        );
        Ok(true)
    }

    /// Phase two body: settle, derive the community owner's posting key,
    /// and submit both application operations as one signed transaction.
    async fn run_community_setup(&self, id: Uuid, request: &CommunitySetupRequest) -> Result<()> {
        let mut phase = SetupPhase::Settling;
        debug!("[provision] {} setup phase: {:?}", id, phase);

        let mut cancel = self.cancel.subscribe();
        self.sequencer
            .settle(
                &request.community_owner.account,
                self.watcher.as_deref(),
                &mut cancel,
            )
            .await?;

        debug_assert!(phase.can_transition_to(SetupPhase::Broadcasting));
        phase = SetupPhase::Broadcasting;
        debug!("[provision] {} setup phase: {:?}", id, phase);

        let posting = derive_keypair(
            &request.community_owner.account,
            request.community_owner.password.expose(),
            Role::Posting,
        )?;

        let operations = build_hivemind_ops(
            &request.community_owner.account,
            &request.account_name,
            &request.profile,
        )?;

        let receipt = self
            .submit_bounded(self.gateway.submit_transaction(TransactionRequest {
                operations: operations.to_vec(),
                signing_keys: vec![posting.private],
            }))
            .await?;

        info!(
            "[provision] {} community setup for '{}' accepted (tx: {})",
            id, request.community_owner.account, receipt.transaction_id
        );
        Ok(())
    }
}

#[async_trait]
impl CommunityProvisioningApi for CommunityProvisioner {
    async fn create_community_account(&self, request: AccountCreationRequest) -> Result<()> {
        let id = Uuid::new_v4();
        let AccountCreationRequest {
            credentials,
            callbacks,
        } = request;

        info!(
            "[provision] {} phase one: creating account '{}'",
            id, credentials.account
        );
        self.cancel.send_replace(false);
        self.state.set_pending(true);
        let phase = AccountPhase::Pending;

        match self.run_account_creation(id, &credentials).await {
            Ok(_broadcast_issued) => {
                debug_assert!(phase.can_transition_to(AccountPhase::Created));
                debug!("[provision] {} account phase: {:?}", id, AccountPhase::Created);
                // The account exists (or its creation is in flight); the
                // pending flag stays set until phase two resolves it.
                callbacks.succeeded();
                Ok(())
            }
            Err(error) => {
                debug_assert!(phase.can_transition_to(AccountPhase::Failed));
                warn!("[provision] {} phase one failed: {}", id, error);
                self.state.set_pending(false);
                self.state.notify_failure(&error);
                callbacks.failed(&error);
                Err(error)
            }
        }
    }

    async fn broadcast_community_setup(&self, request: CommunitySetupRequest) -> Result<()> {
        let id = Uuid::new_v4();
        info!(
            "[provision] {} phase two: community setup for '{}' (community: {})",
            id, request.account_name, request.community_owner.account
        );
        self.cancel.send_replace(false);
        self.state.set_pending(true);
        self.state.set_operation_error(false);

        let result = self.run_community_setup(id, &request).await;

        // The pending flag is always cleared before any terminal
        // notification, on both outcomes.
        match &result {
            Ok(()) => {
                debug!("[provision] {} setup phase: {:?}", id, SetupPhase::Completed);
                self.state.set_pending(false);
                self.state.notify_success();
            }
            Err(error) => {
                warn!("[provision] {} phase two failed: {}", id, error);
                self.state.set_operation_error(true);
                self.state.set_pending(false);
                self.state.notify_failure(error);
            }
        }
        result
    }

    fn cancel_in_flight(&self) {
        info!("[provision] cancellation requested");
        self.cancel.send_replace(true);
    }
}
