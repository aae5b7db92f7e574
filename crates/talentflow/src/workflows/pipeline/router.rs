use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::access::SessionProvider;
use super::disqualify::DisqualifyError;
use super::domain::{ApplicationId, CandidateId, StageId};
use super::repository::{ApplicationDirectory, DirectoryError, DisqualificationStore, StageStore};
use super::service::{DisqualificationRequest, PipelineError, PipelineService};
use super::transition::TransitionError;

/// Router builder exposing HTTP endpoints for pipeline management.
pub fn pipeline_router<P, S, D, R>(service: Arc<PipelineService<P, S, D, R>>) -> Router
where
    P: SessionProvider + 'static,
    S: StageStore + 'static,
    D: DisqualificationStore + 'static,
    R: ApplicationDirectory + 'static,
{
    Router::new()
        .route("/api/v1/pipeline/stages", get(stages_handler::<P, S, D, R>))
        .route(
            "/api/v1/pipeline/applications",
            post(register_handler::<P, S, D, R>),
        )
        .route(
            "/api/v1/pipeline/applications/:application_id",
            get(status_handler::<P, S, D, R>),
        )
        .route(
            "/api/v1/pipeline/applications/:application_id/advance",
            post(advance_handler::<P, S, D, R>),
        )
        .route(
            "/api/v1/pipeline/applications/:application_id/jump",
            post(jump_handler::<P, S, D, R>),
        )
        .route(
            "/api/v1/pipeline/applications/:application_id/disqualify",
            post(disqualify_handler::<P, S, D, R>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterRequest {
    candidate_id: String,
    #[serde(default)]
    stage_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JumpRequest {
    stage_id: String,
}

pub(crate) async fn stages_handler<P, S, D, R>(
    State(service): State<Arc<PipelineService<P, S, D, R>>>,
) -> Response
where
    P: SessionProvider + 'static,
    S: StageStore + 'static,
    D: DisqualificationStore + 'static,
    R: ApplicationDirectory + 'static,
{
    (StatusCode::OK, axum::Json(service.track().stages())).into_response()
}

pub(crate) async fn register_handler<P, S, D, R>(
    State(service): State<Arc<PipelineService<P, S, D, R>>>,
    axum::Json(request): axum::Json<RegisterRequest>,
) -> Response
where
    P: SessionProvider + 'static,
    S: StageStore + 'static,
    D: DisqualificationStore + 'static,
    R: ApplicationDirectory + 'static,
{
    let stage = request.stage_id.map(StageId);
    match service.register(CandidateId(request.candidate_id), stage) {
        Ok(application) => {
            let view = application.status_view(service.track());
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<P, S, D, R>(
    State(service): State<Arc<PipelineService<P, S, D, R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    P: SessionProvider + 'static,
    S: StageStore + 'static,
    D: DisqualificationStore + 'static,
    R: ApplicationDirectory + 'static,
{
    match service.status(&ApplicationId(application_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn advance_handler<P, S, D, R>(
    State(service): State<Arc<PipelineService<P, S, D, R>>>,
    Path(application_id): Path<String>,
) -> Response
where
    P: SessionProvider + 'static,
    S: StageStore + 'static,
    D: DisqualificationStore + 'static,
    R: ApplicationDirectory + 'static,
{
    match service.advance(&ApplicationId(application_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn jump_handler<P, S, D, R>(
    State(service): State<Arc<PipelineService<P, S, D, R>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<JumpRequest>,
) -> Response
where
    P: SessionProvider + 'static,
    S: StageStore + 'static,
    D: DisqualificationStore + 'static,
    R: ApplicationDirectory + 'static,
{
    match service.jump(&ApplicationId(application_id), &StageId(request.stage_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn disqualify_handler<P, S, D, R>(
    State(service): State<Arc<PipelineService<P, S, D, R>>>,
    Path(application_id): Path<String>,
    axum::Json(request): axum::Json<DisqualificationRequest>,
) -> Response
where
    P: SessionProvider + 'static,
    S: StageStore + 'static,
    D: DisqualificationStore + 'static,
    R: ApplicationDirectory + 'static,
{
    match service.disqualify(&ApplicationId(application_id), request) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: PipelineError) -> Response {
    let status = match &error {
        PipelineError::PermissionDenied => StatusCode::FORBIDDEN,
        PipelineError::UnknownStage(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::Transition(TransitionError::TransitionInProgress(_)) => {
            StatusCode::CONFLICT
        }
        PipelineError::Transition(TransitionError::TransitionRejected(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        PipelineError::Transition(TransitionError::CommitFailed(_)) => StatusCode::BAD_GATEWAY,
        PipelineError::Disqualification(DisqualifyError::CommitFailed(_)) => {
            StatusCode::BAD_GATEWAY
        }
        PipelineError::Disqualification(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PipelineError::Directory(DirectoryError::NotFound) => StatusCode::NOT_FOUND,
        PipelineError::Directory(DirectoryError::Conflict) => StatusCode::CONFLICT,
        PipelineError::Directory(DirectoryError::Unavailable(_)) | PipelineError::Track(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
