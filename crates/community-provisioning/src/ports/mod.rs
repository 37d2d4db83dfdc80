//! Ports layer: trait definitions for inbound (driving) and outbound
//! (driven) interfaces.

pub mod inbound;
pub mod outbound;

pub use inbound::{
    AccountCreationRequest, CommunityProvisioningApi, CommunitySetupRequest, OperationCallbacks,
};
pub use outbound::{
    AdmissionWatcher, BroadcastGateway, BroadcastReceipt, MockBroadcastGateway,
    TransactionRequest, WorkflowStateStore,
};
