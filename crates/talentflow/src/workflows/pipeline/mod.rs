//! Candidate pipeline management: role-gated stage transitions over an
//! ordered track, disqualification capture, debounced candidate lookup,
//! and tracker-export import.

pub mod access;
pub mod disqualify;
pub mod domain;
pub mod import;
pub mod repository;
pub mod router;
pub mod search;
pub mod service;
pub mod track;
pub mod transition;

#[cfg(test)]
mod tests;

pub use access::{evaluate, Actor, ActorRole, RoleGate, RoleRequirement, SessionProvider};
pub use disqualify::{DisqualificationFlow, DisqualifyError, FlowState, OTHER_SENTINEL};
pub use domain::{
    ApplicationId, ApplicationStatus, CandidateApplication, CandidateId, CannedReason,
    DisqualificationReason, Stage, StageId,
};
pub use import::{TrackerCsvImporter, TrackerImportError};
pub use repository::{
    ApplicationDirectory, ApplicationStatusView, DirectoryError, DisqualificationStore, StageStore,
    StoreError,
};
pub use router::pipeline_router;
pub use search::{CandidateFinder, CandidateHit, DebouncedLookup, LookupOutcome};
pub use service::{DisqualificationRequest, GatePolicy, PipelineError, PipelineService};
pub use track::{StageTrack, TrackError};
pub use transition::{TransitionCoordinator, TransitionError};
