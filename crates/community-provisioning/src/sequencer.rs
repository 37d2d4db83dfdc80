//! # Inter-Phase Sequencer
//!
//! Enforces the gap between the `account_create` broadcast and the
//! application-operation broadcast. The ledger's admission rules forbid the
//! two from coexisting in one confirmation unit, so phase two must not
//! start until phase one has been admitted.
//!
//! Two strategies, watcher-first:
//!
//! - **Admission watcher**: wait (bounded) for the account creation to be
//!   observed on-chain, failing explicitly on timeout.
//! - **Fixed delay fallback**: when no watcher is available, wait out a
//!   fixed settling delay. This is a weak guarantee: under congestion the
//!   delay may be insufficient, and nothing verifies admission.

use crate::config::ProvisioningConfig;
use crate::error::{ProvisioningError, Result};
use crate::ports::outbound::AdmissionWatcher;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, warn};

/// Wait until the cancellation token is raised. Never resolves if the
/// token sender is gone (cancellation can no longer be requested).
pub(crate) async fn cancelled(token: &mut watch::Receiver<bool>) {
    loop {
        if *token.borrow() {
            return;
        }
        if token.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Enforces the settling gap between the two broadcast phases.
#[derive(Clone, Debug)]
pub struct Sequencer {
    settling_delay: Duration,
    confirmation_timeout: Duration,
}

impl Sequencer {
    /// Build from workflow configuration.
    pub fn new(config: &ProvisioningConfig) -> Self {
        Self {
            settling_delay: Duration::from_millis(config.settling_delay_ms),
            confirmation_timeout: Duration::from_millis(config.confirmation_timeout_ms),
        }
    }

    /// Suspend until phase two may safely begin.
    ///
    /// With a watcher: bounded wait for on-chain admission of `account`'s
    /// creation, failing with [`ProvisioningError::ConfirmationTimeout`].
    /// Without: the fixed-delay fallback. Cancellable at every suspension
    /// point via the watch token.
    pub async fn settle(
        &self,
        account: &str,
        watcher: Option<&dyn AdmissionWatcher>,
        cancel: &mut watch::Receiver<bool>,
    ) -> Result<()> {
        match watcher {
            Some(watcher) => {
                debug!(
                    "[provision] awaiting admission of '{}' (timeout {:?})",
                    account, self.confirmation_timeout
                );
                tokio::select! {
                    admitted = tokio::time::timeout(
                        self.confirmation_timeout,
                        watcher.await_admission(account),
                    ) => match admitted {
                        Ok(result) => result,
                        Err(_) => Err(ProvisioningError::ConfirmationTimeout {
                            account: account.to_string(),
                            waited_ms: self.confirmation_timeout.as_millis() as u64,
                        }),
                    },
                    _ = cancelled(cancel) => Err(ProvisioningError::Cancelled),
                }
            }
            None => {
                warn!(
                    "[provision] no admission watcher; falling back to fixed {:?} settling delay",
                    self.settling_delay
                );
                tokio::select! {
                    _ = tokio::time::sleep(self.settling_delay) => Ok(()),
                    _ = cancelled(cancel) => Err(ProvisioningError::Cancelled),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct InstantWatcher;

    #[async_trait]
    impl AdmissionWatcher for InstantWatcher {
        async fn await_admission(&self, _account: &str) -> Result<()> {
            Ok(())
        }
    }

    struct NeverWatcher;

    #[async_trait]
    impl AdmissionWatcher for NeverWatcher {
        async fn await_admission(&self, _account: &str) -> Result<()> {
            std::future::pending().await
        }
    }

    fn sequencer() -> Sequencer {
        Sequencer::new(&ProvisioningConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_elapses_fully() {
        let (_tx, mut rx) = watch::channel(false);
        let start = tokio::time::Instant::now();

        sequencer().settle("alice", None, &mut rx).await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(crate::config::SETTLING_DELAY_MS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_short_circuits_delay() {
        let (_tx, mut rx) = watch::channel(false);
        let start = tokio::time::Instant::now();

        sequencer()
            .settle("alice", Some(&InstantWatcher), &mut rx)
            .await
            .unwrap();

        assert!(start.elapsed() < Duration::from_millis(crate::config::SETTLING_DELAY_MS));
    }

    #[tokio::test(start_paused = true)]
    async fn test_watcher_timeout_is_explicit_failure() {
        let (_tx, mut rx) = watch::channel(false);

        let err = sequencer()
            .settle("alice", Some(&NeverWatcher), &mut rx)
            .await
            .unwrap_err();

        match err {
            ProvisioningError::ConfirmationTimeout { account, .. } => assert_eq!(account, "alice"),
            other => panic!("expected confirmation timeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_interrupts_settling() {
        let (tx, mut rx) = watch::channel(false);

        let settle = tokio::spawn(async move {
            sequencer().settle("alice", None, &mut rx).await
        });
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(true).unwrap();

        let err = settle.await.unwrap().unwrap_err();
        assert!(matches!(err, ProvisioningError::Cancelled));
    }
}
