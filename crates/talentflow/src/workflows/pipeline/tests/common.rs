use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::workflows::pipeline::access::{Actor, ActorRole, SessionProvider};
use crate::workflows::pipeline::domain::{
    ApplicationId, CandidateApplication, CandidateId, DisqualificationReason, Stage, StageId,
};
use crate::workflows::pipeline::repository::{
    ApplicationDirectory, DirectoryError, DisqualificationStore, StageStore, StoreError,
};
use crate::workflows::pipeline::service::PipelineService;
use crate::workflows::pipeline::track::StageTrack;

pub(super) fn track() -> StageTrack {
    StageTrack::new(vec![
        Stage::new("s-applied", "Applied"),
        Stage::new("s-screen", "Screen"),
        Stage::new("s-interview", "Interview"),
        Stage::new("s-offer", "Offer"),
    ])
    .expect("unique stage ids")
}

pub(super) fn application(stage: Option<&str>) -> CandidateApplication {
    CandidateApplication::active(
        ApplicationId("app-000100".to_string()),
        CandidateId("cand-42".to_string()),
        stage.map(|id| StageId(id.to_string())),
    )
}

/// Session double with a settable actor, standing in for the browser
/// session store.
#[derive(Default)]
pub(super) struct FixedSession {
    actor: Mutex<Option<Actor>>,
}

impl FixedSession {
    pub(super) fn with_actor(actor: Actor) -> Self {
        Self {
            actor: Mutex::new(Some(actor)),
        }
    }

    pub(super) fn recruiter() -> Self {
        Self::with_actor(Actor {
            role: ActorRole::Recruiter,
            is_manager: false,
        })
    }

    pub(super) fn recruiter_manager() -> Self {
        Self::with_actor(Actor {
            role: ActorRole::Recruiter,
            is_manager: true,
        })
    }

    pub(super) fn employee() -> Self {
        Self::with_actor(Actor {
            role: ActorRole::Employee,
            is_manager: false,
        })
    }

    pub(super) fn absent() -> Self {
        Self::default()
    }

    pub(super) fn set(&self, actor: Option<Actor>) {
        *self.actor.lock().expect("session mutex poisoned") = actor;
    }
}

impl SessionProvider for FixedSession {
    fn current_actor(&self) -> Option<Actor> {
        *self.actor.lock().expect("session mutex poisoned")
    }
}

#[derive(Default)]
pub(super) struct MemoryStageStore {
    commits: Mutex<Vec<(ApplicationId, StageId)>>,
}

impl MemoryStageStore {
    pub(super) fn commits(&self) -> Vec<(ApplicationId, StageId)> {
        self.commits.lock().expect("stage store mutex poisoned").clone()
    }
}

impl StageStore for MemoryStageStore {
    fn persist_stage(
        &self,
        application: &ApplicationId,
        stage: &StageId,
    ) -> Result<(), StoreError> {
        self.commits
            .lock()
            .expect("stage store mutex poisoned")
            .push((application.clone(), stage.clone()));
        Ok(())
    }
}

pub(super) struct UnavailableStageStore;

impl StageStore for UnavailableStageStore {
    fn persist_stage(&self, _: &ApplicationId, _: &StageId) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryDisqualificationStore {
    commits: Mutex<Vec<(ApplicationId, DisqualificationReason)>>,
}

impl MemoryDisqualificationStore {
    pub(super) fn commits(&self) -> Vec<(ApplicationId, DisqualificationReason)> {
        self.commits
            .lock()
            .expect("disqualification store mutex poisoned")
            .clone()
    }
}

impl DisqualificationStore for MemoryDisqualificationStore {
    fn persist_disqualification(
        &self,
        application: &ApplicationId,
        reason: &DisqualificationReason,
    ) -> Result<(), StoreError> {
        self.commits
            .lock()
            .expect("disqualification store mutex poisoned")
            .push((application.clone(), reason.clone()));
        Ok(())
    }
}

pub(super) struct UnavailableDisqualificationStore;

impl DisqualificationStore for UnavailableDisqualificationStore {
    fn persist_disqualification(
        &self,
        _: &ApplicationId,
        _: &DisqualificationReason,
    ) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("backend offline".to_string()))
    }
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    records: Mutex<HashMap<ApplicationId, CandidateApplication>>,
}

impl MemoryDirectory {
    pub(super) fn seed(&self, application: CandidateApplication) {
        self.records
            .lock()
            .expect("directory mutex poisoned")
            .insert(application.id.clone(), application);
    }
}

impl ApplicationDirectory for MemoryDirectory {
    fn insert(
        &self,
        application: CandidateApplication,
    ) -> Result<CandidateApplication, DirectoryError> {
        let mut records = self.records.lock().expect("directory mutex poisoned");
        if records.contains_key(&application.id) {
            return Err(DirectoryError::Conflict);
        }
        records.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update(&self, application: CandidateApplication) -> Result<(), DirectoryError> {
        let mut records = self.records.lock().expect("directory mutex poisoned");
        if !records.contains_key(&application.id) {
            return Err(DirectoryError::NotFound);
        }
        records.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<CandidateApplication>, DirectoryError> {
        let records = self.records.lock().expect("directory mutex poisoned");
        Ok(records.get(id).cloned())
    }

    fn active(&self, limit: usize) -> Result<Vec<CandidateApplication>, DirectoryError> {
        let records = self.records.lock().expect("directory mutex poisoned");
        Ok(records
            .values()
            .filter(|application| !application.is_disqualified())
            .take(limit)
            .cloned()
            .collect())
    }
}

pub(super) type TestService =
    PipelineService<FixedSession, MemoryStageStore, MemoryDisqualificationStore, MemoryDirectory>;

pub(super) struct TestHarness {
    pub(super) service: Arc<TestService>,
    pub(super) session: Arc<FixedSession>,
    pub(super) stages: Arc<MemoryStageStore>,
    pub(super) disqualifications: Arc<MemoryDisqualificationStore>,
    pub(super) directory: Arc<MemoryDirectory>,
}

pub(super) fn build_harness(session: FixedSession) -> TestHarness {
    let session = Arc::new(session);
    let stages = Arc::new(MemoryStageStore::default());
    let disqualifications = Arc::new(MemoryDisqualificationStore::default());
    let directory = Arc::new(MemoryDirectory::default());
    let service = Arc::new(PipelineService::new(
        session.clone(),
        stages.clone(),
        disqualifications.clone(),
        directory.clone(),
        track(),
    ));

    TestHarness {
        service,
        session,
        stages,
        disqualifications,
        directory,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
