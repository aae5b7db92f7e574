use std::collections::{BTreeMap, HashMap, HashSet};
use std::env;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use metrics_exporter_prometheus::PrometheusHandle;
use talentflow::workflows::documents::{
    employment_application, DocumentForm, DocumentTemplate, FieldSpecError, FillError,
    TemplateSource,
};
use talentflow::workflows::pipeline::{
    Actor, ActorRole, ApplicationDirectory, ApplicationId, CandidateApplication, DirectoryError,
    DisqualificationReason, DisqualificationStore, SessionProvider, Stage, StageId, StageStore,
    StageTrack, StoreError, TrackError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Session provider backed by environment variables, standing in for the
/// browser session store: `APP_ACTOR_ROLE` carries the role code and
/// `APP_ACTOR_IS_MANAGER` the manager flag. Unset or unparsable values
/// leave the session absent so every gated action fails closed.
pub(crate) struct EnvSession {
    actor: Option<Actor>,
}

impl EnvSession {
    pub(crate) fn from_env() -> Self {
        let role = env::var("APP_ACTOR_ROLE")
            .ok()
            .and_then(|value| value.trim().parse::<u8>().ok())
            .and_then(ActorRole::from_code);
        let is_manager = env::var("APP_ACTOR_IS_MANAGER")
            .map(|value| matches!(value.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            actor: role.map(|role| Actor { role, is_manager }),
        }
    }

    pub(crate) fn fixed(actor: Actor) -> Self {
        Self { actor: Some(actor) }
    }
}

impl SessionProvider for EnvSession {
    fn current_actor(&self) -> Option<Actor> {
        self.actor
    }
}

#[derive(Default)]
pub(crate) struct InMemoryStageStore {
    commits: Mutex<Vec<(ApplicationId, StageId)>>,
}

impl StageStore for InMemoryStageStore {
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

#[derive(Default)]
pub(crate) struct InMemoryDisqualificationStore {
    commits: Mutex<Vec<(ApplicationId, DisqualificationReason)>>,
}

impl DisqualificationStore for InMemoryDisqualificationStore {
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

#[derive(Default)]
pub(crate) struct InMemoryApplicationDirectory {
    records: Mutex<HashMap<ApplicationId, CandidateApplication>>,
}

impl ApplicationDirectory for InMemoryApplicationDirectory {
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
        if records.contains_key(&application.id) {
            records.insert(application.id.clone(), application);
            Ok(())
        } else {
            Err(DirectoryError::NotFound)
        }
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

/// Template stand-in for the byte-level PDF collaborator: tracks per-field
/// state and flattens to a line-based rendering so the serve and demo
/// paths produce real bytes.
pub(crate) struct InMemoryTemplate {
    fields: HashSet<String>,
    text: BTreeMap<String, String>,
    checks: BTreeMap<String, bool>,
}

impl InMemoryTemplate {
    fn with_fields(fields: HashSet<String>) -> Self {
        Self {
            fields,
            text: BTreeMap::new(),
            checks: BTreeMap::new(),
        }
    }

    fn ensure_known(&self, field: &str) -> Result<(), FillError> {
        if self.fields.contains(field) {
            Ok(())
        } else {
            Err(FillError::FieldNotFound(field.to_string()))
        }
    }
}

impl DocumentTemplate for InMemoryTemplate {
    fn set_text(&mut self, field: &str, value: &str) -> Result<(), FillError> {
        self.ensure_known(field)?;
        self.text.insert(field.to_string(), value.to_string());
        Ok(())
    }

    fn set_checkbox(&mut self, field: &str, checked: bool) -> Result<(), FillError> {
        self.ensure_known(field)?;
        self.checks.insert(field.to_string(), checked);
        Ok(())
    }

    fn flatten(&mut self) -> Result<Vec<u8>, FillError> {
        let mut lines = Vec::new();
        for (field, value) in &self.text {
            lines.push(format!("{field}={value}"));
        }
        for (field, checked) in &self.checks {
            lines.push(format!("{field}={}", if *checked { "[x]" } else { "[ ]" }));
        }
        Ok(lines.join("\n").into_bytes())
    }
}

pub(crate) struct InMemoryTemplateSource {
    templates: HashMap<String, HashSet<String>>,
}

impl InMemoryTemplateSource {
    pub(crate) fn with_form(document_id: &str, form: &DocumentForm) -> Self {
        let fields = form
            .fields()
            .iter()
            .map(|field| field.field_id().to_string())
            .collect();
        let mut templates = HashMap::new();
        templates.insert(document_id.to_string(), fields);
        Self { templates }
    }
}

impl TemplateSource for InMemoryTemplateSource {
    type Template = InMemoryTemplate;

    fn load(&self, document_id: &str) -> Result<Self::Template, FillError> {
        let fields = self
            .templates
            .get(document_id)
            .ok_or_else(|| FillError::UnknownTemplate(document_id.to_string()))?;
        Ok(InMemoryTemplate::with_fields(fields.clone()))
    }
}

/// Standard five-stage hiring track used when no job-specific track is
/// configured.
pub(crate) fn default_track() -> Result<StageTrack, TrackError> {
    StageTrack::new(vec![
        Stage::new("s-applied", "Applied"),
        Stage::new("s-screen", "Screen"),
        Stage::new("s-interview", "Interview"),
        Stage::new("s-offer", "Offer"),
        Stage::new("s-hire", "Hire"),
    ])
}

pub(crate) fn employment_form() -> Result<DocumentForm, FieldSpecError> {
    employment_application()
}
