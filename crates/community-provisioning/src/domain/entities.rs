//! # Domain Entities
//!
//! Caller-supplied inputs and the per-phase state machines. All of these
//! are constructed fresh per workflow invocation and discarded when it
//! completes; nothing here is persisted.

use serde::Serialize;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A password that zeroizes on drop and never appears in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
    /// Wrap a password string.
    pub fn new(password: impl Into<String>) -> Self {
        Self(password.into())
    }

    /// Expose the password for derivation. Use immediately, do not retain.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Account credentials, consumed only to derive keys. Never persisted.
#[derive(Clone, Debug)]
pub struct Credentials {
    /// Account name.
    pub account: String,
    /// Password (redacted, zeroized on drop).
    pub password: Password,
}

impl Credentials {
    /// Create credentials for an account.
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: Password::new(password),
        }
    }
}

/// Display metadata for a community, immutable for the workflow's duration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CommunityProfile {
    /// Community title.
    pub title: String,
    /// Community description.
    pub description: String,
    /// Whether the community is flagged not-safe-for-work.
    #[serde(rename = "is_nsfw")]
    pub nsfw: bool,
}

/// Account-creation phase state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AccountPhase {
    /// Workflow not yet triggered.
    #[default]
    NotStarted,
    /// Authorities being derived / broadcast in flight.
    Pending,
    /// Operation accepted by the broadcast collaborator.
    Created,
    /// Derivation or broadcast failed.
    Failed,
}

impl AccountPhase {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: AccountPhase) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::Pending)
                | (Self::Pending, Self::Created)
                | (Self::Pending, Self::Failed)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Created | Self::Failed)
    }
}

/// Community-setup phase state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SetupPhase {
    /// Workflow not yet triggered.
    #[default]
    NotStarted,
    /// Waiting out the inter-phase settling point.
    Settling,
    /// Bundled transaction in flight.
    Broadcasting,
    /// Transaction accepted.
    Completed,
    /// Settling, derivation, or broadcast failed.
    Failed,
}

impl SetupPhase {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: SetupPhase) -> bool {
        matches!(
            (self, next),
            (Self::NotStarted, Self::Settling)
                | (Self::Settling, Self::Broadcasting)
                | (Self::Settling, Self::Failed)
                | (Self::Broadcasting, Self::Completed)
                | (Self::Broadcasting, Self::Failed)
        )
    }

    /// Check if terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_debug_hides_value() {
        let password = Password::new("hunter2");
        let debug_str = format!("{:?}", password);
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("***"));
    }

    #[test]
    fn test_credentials_expose_roundtrip() {
        let creds = Credentials::new("alice", "validpass");
        assert_eq!(creds.account, "alice");
        assert_eq!(creds.password.expose(), "validpass");
    }

    #[test]
    fn test_profile_wire_field_names() {
        let profile = CommunityProfile {
            title: "Cats".to_string(),
            description: "A community about cats".to_string(),
            nsfw: false,
        };
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["title"], "Cats");
        assert_eq!(json["is_nsfw"], false);
        assert!(json.get("nsfw").is_none());
    }

    #[test]
    fn test_account_phase_transitions() {
        assert!(AccountPhase::NotStarted.can_transition_to(AccountPhase::Pending));
        assert!(AccountPhase::Pending.can_transition_to(AccountPhase::Created));
        assert!(AccountPhase::Pending.can_transition_to(AccountPhase::Failed));
        assert!(!AccountPhase::NotStarted.can_transition_to(AccountPhase::Created));
        assert!(!AccountPhase::Created.can_transition_to(AccountPhase::Pending));
    }

    #[test]
    fn test_setup_phase_transitions() {
        assert!(SetupPhase::NotStarted.can_transition_to(SetupPhase::Settling));
        assert!(SetupPhase::Settling.can_transition_to(SetupPhase::Broadcasting));
        assert!(SetupPhase::Broadcasting.can_transition_to(SetupPhase::Completed));
        assert!(SetupPhase::Settling.can_transition_to(SetupPhase::Failed));
        assert!(!SetupPhase::NotStarted.can_transition_to(SetupPhase::Broadcasting));
        assert!(!SetupPhase::Completed.can_transition_to(SetupPhase::Settling));
    }

    #[test]
    fn test_terminal_states() {
        assert!(AccountPhase::Created.is_terminal());
        assert!(AccountPhase::Failed.is_terminal());
        assert!(!AccountPhase::Pending.is_terminal());
        assert!(SetupPhase::Completed.is_terminal());
        assert!(!SetupPhase::Settling.is_terminal());
    }
}
