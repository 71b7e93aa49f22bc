use crate::models::{
    disputemodel::DisputeStatus, parcelmodel::ParcelStatus, surveymodel::SurveyStatus,
    transfermodel::TransferStatus,
};

use super::error::WorkflowError;

/// Per-entity transition table. A requested status commits only when it is
/// the current status (no-op, state unchanged) or appears in
/// `allowed_next_states(current)`.
pub trait StateTransitions: Sized + Copy + PartialEq where Self: 'static {
    fn entity_name() -> &'static str;

    fn as_str(&self) -> &str;

    fn allowed_next_states(self) -> &'static [Self];

    fn can_transition_to(self, next: Self) -> bool {
        next == self || self.allowed_next_states().contains(&next)
    }

    fn ensure_transition(self, next: Self) -> Result<(), WorkflowError> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(WorkflowError::InvalidTransition {
                entity: Self::entity_name(),
                from: self.as_str().to_string(),
                to: next.as_str().to_string(),
            })
        }
    }

    fn is_terminal(self) -> bool {
        self.allowed_next_states().is_empty()
    }
}

impl StateTransitions for ParcelStatus {
    fn entity_name() -> &'static str {
        "parcel"
    }

    fn as_str(&self) -> &str {
        self.to_str()
    }

    fn allowed_next_states(self) -> &'static [Self] {
        match self {
            ParcelStatus::Pending => &[ParcelStatus::Approved, ParcelStatus::Rejected],
            ParcelStatus::Approved => &[ParcelStatus::Active],
            ParcelStatus::Active => &[],
            ParcelStatus::Rejected => &[],
        }
    }
}

impl StateTransitions for TransferStatus {
    fn entity_name() -> &'static str {
        "transfer request"
    }

    fn as_str(&self) -> &str {
        self.to_str()
    }

    // Approved and Rejected are terminal. Active has no inbound edge; it
    // exists only for wire compatibility and dead-ends immediately.
    fn allowed_next_states(self) -> &'static [Self] {
        match self {
            TransferStatus::Pending => &[TransferStatus::Approved, TransferStatus::Rejected],
            TransferStatus::Approved => &[],
            TransferStatus::Rejected => &[],
            TransferStatus::Active => &[],
        }
    }
}

impl StateTransitions for DisputeStatus {
    fn entity_name() -> &'static str {
        "dispute"
    }

    fn as_str(&self) -> &str {
        self.to_str()
    }

    fn allowed_next_states(self) -> &'static [Self] {
        match self {
            DisputeStatus::Pending => &[DisputeStatus::Resolved, DisputeStatus::Rejected],
            DisputeStatus::Resolved => &[],
            DisputeStatus::Rejected => &[],
        }
    }
}

impl StateTransitions for SurveyStatus {
    fn entity_name() -> &'static str {
        "survey"
    }

    fn as_str(&self) -> &str {
        self.to_str()
    }

    fn allowed_next_states(self) -> &'static [Self] {
        match self {
            SurveyStatus::Pending => &[SurveyStatus::InProgress, SurveyStatus::Completed],
            SurveyStatus::InProgress => &[SurveyStatus::Completed],
            SurveyStatus::Completed => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parcel_pending_can_be_reviewed() {
        assert!(ParcelStatus::Pending.can_transition_to(ParcelStatus::Approved));
        assert!(ParcelStatus::Pending.can_transition_to(ParcelStatus::Rejected));
        assert!(!ParcelStatus::Pending.can_transition_to(ParcelStatus::Active));
    }

    #[test]
    fn parcel_approved_can_only_activate() {
        assert!(ParcelStatus::Approved.can_transition_to(ParcelStatus::Active));
        assert!(!ParcelStatus::Approved.can_transition_to(ParcelStatus::Rejected));
        assert!(!ParcelStatus::Approved.can_transition_to(ParcelStatus::Pending));
    }

    #[test]
    fn parcel_rejected_is_terminal() {
        assert!(ParcelStatus::Rejected.is_terminal());
        assert!(!ParcelStatus::Rejected.can_transition_to(ParcelStatus::Approved));
    }

    #[test]
    fn transfer_leaves_pending_once() {
        assert!(TransferStatus::Pending.can_transition_to(TransferStatus::Approved));
        assert!(TransferStatus::Pending.can_transition_to(TransferStatus::Rejected));
        assert!(!TransferStatus::Approved.can_transition_to(TransferStatus::Rejected));
        assert!(!TransferStatus::Rejected.can_transition_to(TransferStatus::Approved));
    }

    #[test]
    fn transfer_active_has_no_inbound_edge() {
        for status in [
            TransferStatus::Pending,
            TransferStatus::Approved,
            TransferStatus::Rejected,
        ] {
            assert!(!status.can_transition_to(TransferStatus::Active));
        }
    }

    #[test]
    fn dispute_is_terminal_once_decided() {
        assert!(DisputeStatus::Pending.can_transition_to(DisputeStatus::Resolved));
        assert!(DisputeStatus::Pending.can_transition_to(DisputeStatus::Rejected));
        assert!(DisputeStatus::Resolved.is_terminal());
        assert!(DisputeStatus::Rejected.is_terminal());
        assert!(!DisputeStatus::Resolved.can_transition_to(DisputeStatus::Rejected));
    }

    #[test]
    fn survey_completion_is_one_way() {
        assert!(SurveyStatus::Pending.can_transition_to(SurveyStatus::Completed));
        assert!(SurveyStatus::InProgress.can_transition_to(SurveyStatus::Completed));
        assert!(SurveyStatus::Completed.is_terminal());
        assert!(!SurveyStatus::Completed.can_transition_to(SurveyStatus::Pending));
        assert!(!SurveyStatus::Completed.can_transition_to(SurveyStatus::InProgress));
    }

    #[test]
    fn same_state_is_a_no_op_not_an_error() {
        assert!(ParcelStatus::Approved.ensure_transition(ParcelStatus::Approved).is_ok());
        assert!(TransferStatus::Approved.ensure_transition(TransferStatus::Approved).is_ok());
        assert!(DisputeStatus::Resolved.ensure_transition(DisputeStatus::Resolved).is_ok());
    }

    #[test]
    fn denied_transition_stays_denied() {
        // Repeating an invalid request yields the same denial every time.
        for _ in 0..3 {
            let err = ParcelStatus::Rejected
                .ensure_transition(ParcelStatus::Approved)
                .unwrap_err();
            match err {
                WorkflowError::InvalidTransition { entity, from, to } => {
                    assert_eq!(entity, "parcel");
                    assert_eq!(from, "Rejected");
                    assert_eq!(to, "Approved");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
