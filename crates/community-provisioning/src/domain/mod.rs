//! Domain layer: entities, wire operations, and phase state machines.
//! Pure logic, no I/O.

pub mod entities;
pub mod operations;

pub use entities::{AccountPhase, CommunityProfile, Credentials, Password, SetupPhase};
pub use operations::{
    build_account_create_op, build_hivemind_ops, AccountCreateOperation, CustomJsonOperation,
};
