use std::sync::Arc;

use super::domain::{
    ApplicationStatus, CandidateApplication, CannedReason, DisqualificationReason,
};
use super::repository::{DisqualificationStore, StoreError};

/// Menu entry that opens free-text reason entry instead of committing.
pub const OTHER_SENTINEL: &str = "Other";

/// Progress of one disqualification decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    ReasonSelection,
    CustomReasonEntry,
    Committed,
}

/// Errors raised by the disqualification flow. `EmptyReason` is
/// user-correctable and leaves the flow where it was; `CommitFailed` also
/// leaves the state unchanged so the caller decides whether to retry.
#[derive(Debug, thiserror::Error)]
pub enum DisqualifyError {
    #[error("custom reason must not be empty")]
    EmptyReason,
    #[error("reason {0:?} is not on the disqualification menu")]
    UnknownReason(String),
    #[error("operation not valid in state {0:?}")]
    InvalidState(FlowState),
    #[error("backend commit failed: {0}")]
    CommitFailed(#[from] StoreError),
}

/// Captures and commits a disqualification decision for one application.
/// One instance covers one decision; it is discarded after `Committed`.
pub struct DisqualificationFlow<D> {
    store: Arc<D>,
    state: FlowState,
}

impl<D: DisqualificationStore> DisqualificationFlow<D> {
    pub fn new(store: Arc<D>) -> Self {
        Self {
            store,
            state: FlowState::Idle,
        }
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Reason menu as presented to the operator: every canned reason plus
    /// the free-text sentinel.
    pub fn menu() -> Vec<&'static str> {
        let mut entries: Vec<&'static str> = CannedReason::ordered()
            .into_iter()
            .map(CannedReason::label)
            .collect();
        entries.push(OTHER_SENTINEL);
        entries
    }

    /// Commit an immediate rejection with no reason recorded.
    pub fn reject_immediately(
        &mut self,
        application: &mut CandidateApplication,
    ) -> Result<(), DisqualifyError> {
        if self.state != FlowState::Idle {
            return Err(DisqualifyError::InvalidState(self.state));
        }

        self.commit(application, DisqualificationReason::Unspecified)
    }

    pub fn open_reason_menu(&mut self) -> Result<(), DisqualifyError> {
        if self.state != FlowState::Idle {
            return Err(DisqualifyError::InvalidState(self.state));
        }

        self.state = FlowState::ReasonSelection;
        Ok(())
    }

    /// Pick a menu entry. The `Other` sentinel moves to free-text entry;
    /// any canned reason commits immediately.
    pub fn choose_canned(
        &mut self,
        application: &mut CandidateApplication,
        selection: &str,
    ) -> Result<FlowState, DisqualifyError> {
        if self.state != FlowState::ReasonSelection {
            return Err(DisqualifyError::InvalidState(self.state));
        }

        if selection.trim() == OTHER_SENTINEL {
            self.state = FlowState::CustomReasonEntry;
            return Ok(self.state);
        }

        let reason = CannedReason::from_label(selection)
            .ok_or_else(|| DisqualifyError::UnknownReason(selection.to_string()))?;

        self.commit(application, DisqualificationReason::Canned(reason))?;
        Ok(self.state)
    }

    /// Commit a free-text reason. Whitespace-only text is rejected and the
    /// flow stays in `CustomReasonEntry` so the operator can correct it.
    pub fn submit_custom(
        &mut self,
        application: &mut CandidateApplication,
        text: &str,
    ) -> Result<(), DisqualifyError> {
        if self.state != FlowState::CustomReasonEntry {
            return Err(DisqualifyError::InvalidState(self.state));
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DisqualifyError::EmptyReason);
        }

        self.commit(
            application,
            DisqualificationReason::Custom(trimmed.to_string()),
        )
    }

    /// Abandon the decision and discard any entered text.
    pub fn cancel(&mut self) -> Result<(), DisqualifyError> {
        if self.state == FlowState::Committed {
            return Err(DisqualifyError::InvalidState(self.state));
        }

        self.state = FlowState::Idle;
        Ok(())
    }

    fn commit(
        &mut self,
        application: &mut CandidateApplication,
        reason: DisqualificationReason,
    ) -> Result<(), DisqualifyError> {
        self.store
            .persist_disqualification(&application.id, &reason)?;

        application.status = ApplicationStatus::Disqualified;
        application.disqualification = Some(reason);
        self.state = FlowState::Committed;

        Ok(())
    }
}
