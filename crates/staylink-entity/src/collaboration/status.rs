//! Collaboration negotiation status machine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a collaboration proposal between a creator and a hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "collaboration_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CollaborationStatus {
    /// Initial state for both creator- and hotel-initiated proposals.
    Pending,
    /// Terms are being negotiated; agreement stamps were reset.
    Negotiating,
    /// Both sides agreed to the same term version.
    Accepted,
    /// Declined by the receiving side while still pending.
    Declined,
    /// Deliverables done; terminal.
    Completed,
    /// Called off after acceptance; terminal.
    Cancelled,
}

impl CollaborationStatus {
    /// Whether the proposal still counts as active for duplicate checks.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Negotiating | Self::Accepted)
    }

    /// Whether the given transition is legal.
    ///
    /// The matrix:
    /// - `Pending -> Negotiating` (either party proposes modified terms)
    /// - `Pending -> Accepted` / `Pending -> Declined` (receiving side responds)
    /// - `Negotiating -> Negotiating` (further counter-proposals)
    /// - `Negotiating -> Accepted` (both agreement stamps present)
    /// - `Accepted -> Cancelled` (either party)
    /// - `Accepted -> Completed` (deliverables marked done)
    pub fn can_transition_to(&self, next: CollaborationStatus) -> bool {
        use CollaborationStatus::*;
        matches!(
            (*self, next),
            (Pending, Negotiating)
                | (Pending, Accepted)
                | (Pending, Declined)
                | (Negotiating, Negotiating)
                | (Negotiating, Accepted)
                | (Accepted, Cancelled)
                | (Accepted, Completed)
        )
    }

    /// Whether term proposals are allowed in this state.
    pub fn accepts_term_proposals(&self) -> bool {
        matches!(self, Self::Pending | Self::Negotiating)
    }

    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Negotiating => "negotiating",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for CollaborationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::CollaborationStatus::*;

    #[test]
    fn test_legal_transitions() {
        assert!(Pending.can_transition_to(Negotiating));
        assert!(Pending.can_transition_to(Declined));
        assert!(Negotiating.can_transition_to(Accepted));
        assert!(Accepted.can_transition_to(Cancelled));
        assert!(Accepted.can_transition_to(Completed));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!Declined.can_transition_to(Accepted));
        assert!(!Completed.can_transition_to(Cancelled));
        assert!(!Cancelled.can_transition_to(Pending));
        assert!(!Accepted.can_transition_to(Negotiating));
        assert!(!Pending.can_transition_to(Completed));
    }

    #[test]
    fn test_term_proposal_states() {
        assert!(Pending.accepts_term_proposals());
        assert!(Negotiating.accepts_term_proposals());
        assert!(!Accepted.accepts_term_proposals());
        assert!(!Declined.accepts_term_proposals());
    }

    #[test]
    fn test_active_states() {
        assert!(Pending.is_active());
        assert!(Negotiating.is_active());
        assert!(Accepted.is_active());
        assert!(!Declined.is_active());
        assert!(!Completed.is_active());
    }
}
