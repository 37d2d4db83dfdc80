//! Adapters layer: concrete implementations of the outbound ports.

pub mod broadcast;
pub mod state;

pub use broadcast::SimulatedBroadcastGateway;
pub use state::{InMemoryStateStore, WorkflowFlags};
