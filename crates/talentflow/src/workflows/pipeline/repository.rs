use chrono::NaiveDate;
use serde::Serialize;

use super::domain::{
    ApplicationId, CandidateApplication, CandidateId, DisqualificationReason, StageId,
};
use super::track::StageTrack;

/// Commit target for validated stage transitions. Implementations must be
/// idempotent under retry with the same target stage.
pub trait StageStore: Send + Sync {
    fn persist_stage(
        &self,
        application: &ApplicationId,
        stage: &StageId,
    ) -> Result<(), StoreError>;
}

/// Commit target for disqualification decisions.
pub trait DisqualificationStore: Send + Sync {
    fn persist_disqualification(
        &self,
        application: &ApplicationId,
        reason: &DisqualificationReason,
    ) -> Result<(), StoreError>;
}

/// Directory of candidate applications backing the HTTP surface, so the
/// service module can be exercised in isolation.
pub trait ApplicationDirectory: Send + Sync {
    fn insert(
        &self,
        application: CandidateApplication,
    ) -> Result<CandidateApplication, DirectoryError>;
    fn update(&self, application: CandidateApplication) -> Result<(), DirectoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<CandidateApplication>, DirectoryError>;
    fn active(&self, limit: usize) -> Result<Vec<CandidateApplication>, DirectoryError>;
}

/// Error enumeration for persistence-collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("backend rejected the commit: {0}")]
    Rejected(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// Error enumeration for directory failures.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("application already exists")]
    Conflict,
    #[error("application not found")]
    NotFound,
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized representation of an application's exposed pipeline position.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatusView {
    pub application_id: ApplicationId,
    pub candidate_id: CandidateId,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_id: Option<StageId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    pub terminal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_on: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disqualification_reason: Option<String>,
}

impl CandidateApplication {
    pub fn status_view(&self, track: &StageTrack) -> ApplicationStatusView {
        let stage = track
            .current_stage(self.current_stage_id.as_ref())
            .map(|stage| stage.name.clone());

        ApplicationStatusView {
            application_id: self.id.clone(),
            candidate_id: self.candidate_id.clone(),
            status: self.status.label(),
            stage_id: self.current_stage_id.clone(),
            stage,
            terminal: track.is_terminal(self.current_stage_id.as_ref()),
            applied_on: self.applied_on,
            disqualification_reason: self
                .disqualification
                .as_ref()
                .map(|reason| reason.as_text().to_string()),
        }
    }
}
