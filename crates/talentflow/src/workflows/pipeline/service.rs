use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use super::access::{ActorRole, RoleGate, RoleRequirement, SessionProvider};
use super::disqualify::{DisqualificationFlow, DisqualifyError, FlowState, OTHER_SENTINEL};
use super::domain::{ApplicationId, CandidateApplication, CandidateId, StageId};
use super::repository::{
    ApplicationDirectory, ApplicationStatusView, DirectoryError, DisqualificationStore, StageStore,
};
use super::track::{StageTrack, TrackError};
use super::transition::{TransitionCoordinator, TransitionError};

/// Role requirements guarding the gated pipeline actions.
#[derive(Debug, Clone, Copy)]
pub struct GatePolicy {
    pub stage_transition: RoleRequirement,
    pub disqualification: RoleRequirement,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            stage_transition: RoleRequirement::role(ActorRole::Recruiter),
            disqualification: RoleRequirement::manager(ActorRole::Recruiter),
        }
    }
}

/// Operator decision carried by a disqualification request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum DisqualificationRequest {
    /// Reject with no reason recorded.
    Immediate,
    /// Reject with a reason picked from the canned menu.
    Canned { reason: String },
    /// Reject with operator-entered free text.
    Custom { reason: String },
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Service composing the role gate, stage track, and persistence
/// collaborators. The gate is consulted before any state machine runs.
pub struct PipelineService<P, S, D, R> {
    gate: RoleGate<P>,
    track: StageTrack,
    transitions: TransitionCoordinator<S>,
    disqualifications: Arc<D>,
    directory: Arc<R>,
    policy: GatePolicy,
}

impl<P, S, D, R> PipelineService<P, S, D, R>
where
    P: SessionProvider + 'static,
    S: StageStore + 'static,
    D: DisqualificationStore + 'static,
    R: ApplicationDirectory + 'static,
{
    pub fn new(
        session: Arc<P>,
        stages: Arc<S>,
        disqualifications: Arc<D>,
        directory: Arc<R>,
        track: StageTrack,
    ) -> Self {
        Self::with_policy(
            session,
            stages,
            disqualifications,
            directory,
            track,
            GatePolicy::default(),
        )
    }

    pub fn with_policy(
        session: Arc<P>,
        stages: Arc<S>,
        disqualifications: Arc<D>,
        directory: Arc<R>,
        track: StageTrack,
        policy: GatePolicy,
    ) -> Self {
        Self {
            gate: RoleGate::new(session),
            track,
            transitions: TransitionCoordinator::new(stages),
            disqualifications,
            directory,
            policy,
        }
    }

    pub fn track(&self) -> &StageTrack {
        &self.track
    }

    /// Place a candidate into the pipeline, optionally at a starting stage.
    pub fn register(
        &self,
        candidate_id: CandidateId,
        stage: Option<StageId>,
    ) -> Result<CandidateApplication, PipelineError> {
        if let Some(stage_id) = &stage {
            if !self.track.contains(stage_id) {
                return Err(PipelineError::UnknownStage(stage_id.0.clone()));
            }
        }

        let application =
            CandidateApplication::active(next_application_id(), candidate_id, stage)
                .applied_on(chrono::Local::now().date_naive());
        let stored = self.directory.insert(application)?;
        Ok(stored)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<CandidateApplication, PipelineError> {
        let application = self
            .directory
            .fetch(id)?
            .ok_or(DirectoryError::NotFound)?;
        Ok(application)
    }

    pub fn status(&self, id: &ApplicationId) -> Result<ApplicationStatusView, PipelineError> {
        Ok(self.get(id)?.status_view(&self.track))
    }

    /// Advance the application to the next stage of the track.
    pub fn advance(&self, id: &ApplicationId) -> Result<ApplicationStatusView, PipelineError> {
        if !self.gate.permits(self.policy.stage_transition) {
            return Err(PipelineError::PermissionDenied);
        }

        let mut application = self.get(id)?;
        let entered = self.transitions.advance(&mut application, &self.track)?;
        self.directory.update(application.clone())?;

        info!(application = %application.id.0, stage = %entered.name, "stage advanced");
        Ok(application.status_view(&self.track))
    }

    /// Move the application to an arbitrary stage of the track.
    pub fn jump(
        &self,
        id: &ApplicationId,
        target: &StageId,
    ) -> Result<ApplicationStatusView, PipelineError> {
        if !self.gate.permits(self.policy.stage_transition) {
            return Err(PipelineError::PermissionDenied);
        }

        let mut application = self.get(id)?;
        let entered = self
            .transitions
            .jump_to(&mut application, &self.track, target)?;
        self.directory.update(application.clone())?;

        info!(application = %application.id.0, stage = %entered.name, "stage set");
        Ok(application.status_view(&self.track))
    }

    /// Drive a full disqualification decision in one request. The flow's
    /// state machine still enforces the per-state rules underneath.
    pub fn disqualify(
        &self,
        id: &ApplicationId,
        request: DisqualificationRequest,
    ) -> Result<ApplicationStatusView, PipelineError> {
        if !self.gate.permits(self.policy.disqualification) {
            return Err(PipelineError::PermissionDenied);
        }

        let mut application = self.get(id)?;
        let mut flow = DisqualificationFlow::new(self.disqualifications.clone());

        match request {
            DisqualificationRequest::Immediate => {
                flow.reject_immediately(&mut application)?;
            }
            DisqualificationRequest::Canned { reason } => {
                flow.open_reason_menu()?;
                if flow.choose_canned(&mut application, &reason)? == FlowState::CustomReasonEntry {
                    // "Other" without accompanying text cannot commit.
                    return Err(DisqualifyError::EmptyReason.into());
                }
            }
            DisqualificationRequest::Custom { reason } => {
                flow.open_reason_menu()?;
                flow.choose_canned(&mut application, OTHER_SENTINEL)?;
                flow.submit_custom(&mut application, &reason)?;
            }
        }

        self.directory.update(application.clone())?;

        info!(application = %application.id.0, "application disqualified");
        Ok(application.status_view(&self.track))
    }
}

/// Error raised by the pipeline service.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("actor lacks permission for this action")]
    PermissionDenied,
    #[error("stage {0} is not part of the track")]
    UnknownStage(String),
    #[error(transparent)]
    Track(#[from] TrackError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Disqualification(#[from] DisqualifyError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
