//! # Community Provisioning
//!
//! Provisions a new account on a blockchain-backed social network and
//! attaches community metadata to it through a two-phase workflow:
//!
//! 1. **Account creation** — derive per-role authorities from the
//!    username/password pair and submit an `account_create` operation
//!    through the wallet's prompted broadcast flow.
//! 2. **Community setup** — after the inter-phase settling point, submit
//!    one signed transaction bundling the `setRole` (admin) and
//!    `updateProps` application operations for the new community.
//!
//! The two operations cannot share a block: the ledger's admission rules
//! forbid an `account_create` and an application operation authored by the
//! newly created account from coexisting in one confirmation unit. The
//! [`sequencer`] enforces that gap, preferring an explicit admission
//! watcher over the fixed-delay fallback.
//!
//! ## Module Structure
//!
//! ```text
//! community-provisioning/
//! ├── domain/      # Credentials, profile, operations, phase state machines
//! ├── ports/       # CommunityProvisioningApi, BroadcastGateway, state store
//! ├── adapters/    # In-memory state store, simulated gateway
//! ├── sequencer.rs # Inter-phase settling (watcher-first, delay fallback)
//! └── service.rs   # CommunityProvisioner orchestrator
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod error;
pub mod ports;
pub mod sequencer;
pub mod service;

// Re-exports
pub use config::ProvisioningConfig;
pub use domain::entities::{AccountPhase, CommunityProfile, Credentials, Password, SetupPhase};
pub use domain::operations::{
    build_account_create_op, build_hivemind_ops, AccountCreateOperation, CustomJsonOperation,
    ACCOUNT_CREATION_FEE, ADMIN_ROLE, COMMUNITY_CHANNEL_ID,
};
pub use error::{ProvisioningError, Result};
pub use ports::inbound::{
    AccountCreationRequest, CommunityProvisioningApi, CommunitySetupRequest, OperationCallbacks,
};
pub use ports::outbound::{
    AdmissionWatcher, BroadcastGateway, BroadcastReceipt, TransactionRequest, WorkflowStateStore,
};
pub use sequencer::Sequencer;
pub use service::CommunityProvisioner;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
