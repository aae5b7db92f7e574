use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use super::domain::{ApplicationId, CandidateApplication, Stage, StageId};
use super::repository::{StageStore, StoreError};
use super::track::StageTrack;

/// Errors surfaced by stage transition attempts. Every failure leaves the
/// in-memory application exactly as it was before the call.
#[derive(Debug, thiserror::Error)]
pub enum TransitionError {
    #[error("a transition is already in flight for {0:?}")]
    TransitionInProgress(ApplicationId),
    #[error("transition rejected: {0}")]
    TransitionRejected(String),
    #[error("backend commit failed: {0}")]
    CommitFailed(#[from] StoreError),
}

/// Serializes stage transitions so each application has at most one in
/// flight, and enforces the pessimistic commit protocol: the store
/// confirms before in-memory state changes.
pub struct TransitionCoordinator<S> {
    store: Arc<S>,
    in_flight: Mutex<HashSet<ApplicationId>>,
}

impl<S: StageStore> TransitionCoordinator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Move the application to the stage immediately following its current
    /// one. Returns the stage entered on success.
    pub fn advance(
        &self,
        application: &mut CandidateApplication,
        track: &StageTrack,
    ) -> Result<Stage, TransitionError> {
        self.ensure_transitionable(application, track)?;

        let next = track
            .next_stage(application.current_stage_id.as_ref())
            .ok_or_else(|| {
                TransitionError::TransitionRejected(
                    "no next stage is defined for the current position".to_string(),
                )
            })?
            .clone();

        self.commit(application, next)
    }

    /// Move the application to an arbitrary stage of the track. Backward
    /// jumps are allowed; the target must exist and differ from the
    /// current stage.
    pub fn jump_to(
        &self,
        application: &mut CandidateApplication,
        track: &StageTrack,
        target: &StageId,
    ) -> Result<Stage, TransitionError> {
        self.ensure_transitionable(application, track)?;

        if application.current_stage_id.as_ref() == Some(target) {
            return Err(TransitionError::TransitionRejected(
                "target stage equals the current stage".to_string(),
            ));
        }

        let stage = track
            .stage(target)
            .ok_or_else(|| {
                TransitionError::TransitionRejected(format!(
                    "stage {} is not part of the track",
                    target.0
                ))
            })?
            .clone();

        self.commit(application, stage)
    }

    fn ensure_transitionable(
        &self,
        application: &CandidateApplication,
        track: &StageTrack,
    ) -> Result<(), TransitionError> {
        if application.is_disqualified() {
            return Err(TransitionError::TransitionRejected(
                "application is disqualified; its stage is frozen".to_string(),
            ));
        }

        if track.is_empty() {
            return Err(TransitionError::TransitionRejected(
                "stage track is empty".to_string(),
            ));
        }

        if track.is_terminal(application.current_stage_id.as_ref()) {
            return Err(TransitionError::TransitionRejected(
                "current stage is terminal".to_string(),
            ));
        }

        Ok(())
    }

    fn commit(
        &self,
        application: &mut CandidateApplication,
        stage: Stage,
    ) -> Result<Stage, TransitionError> {
        let _guard = self.begin(application.id.clone())?;

        self.store.persist_stage(&application.id, &stage.id)?;
        application.current_stage_id = Some(stage.id.clone());

        Ok(stage)
    }

    fn begin(&self, id: ApplicationId) -> Result<InFlightGuard<'_>, TransitionError> {
        let mut in_flight = self.in_flight.lock().expect("in-flight mutex poisoned");
        if !in_flight.insert(id.clone()) {
            return Err(TransitionError::TransitionInProgress(id));
        }

        Ok(InFlightGuard {
            in_flight: &self.in_flight,
            id,
        })
    }
}

/// Releases the per-application slot when the commit round trip resolves,
/// whether it confirmed or failed.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<ApplicationId>>,
    id: ApplicationId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().expect("in-flight mutex poisoned");
        in_flight.remove(&self.id);
    }
}
