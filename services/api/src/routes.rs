use crate::infra::{default_track, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::sync::Arc;
use talentflow::error::AppError;
use talentflow::workflows::documents::{document_router, DocumentService, TemplateSource};
use talentflow::workflows::pipeline::{
    pipeline_router, ApplicationDirectory, ApplicationStatusView, DisqualificationStore,
    PipelineError, PipelineService, SessionProvider, StageStore, TrackerCsvImporter,
};

pub(crate) fn with_app_routes<P, S, D, R, TS>(
    pipeline: Arc<PipelineService<P, S, D, R>>,
    documents: Arc<DocumentService<TS>>,
) -> axum::Router
where
    P: SessionProvider + 'static,
    S: StageStore + 'static,
    D: DisqualificationStore + 'static,
    R: ApplicationDirectory + 'static,
    TS: TemplateSource + 'static,
{
    pipeline_router(pipeline)
        .merge(document_router(documents))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/pipeline/import",
            axum::routing::post(pipeline_import_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[derive(Debug, Deserialize)]
pub(crate) struct PipelineImportRequest {
    pub(crate) tracker_csv: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct PipelineImportResponse {
    pub(crate) imported: usize,
    pub(crate) applications: Vec<ApplicationStatusView>,
}

pub(crate) async fn pipeline_import_endpoint(
    Json(payload): Json<PipelineImportRequest>,
) -> Result<Json<PipelineImportResponse>, AppError> {
    let track = default_track().map_err(PipelineError::from)?;

    let reader = Cursor::new(payload.tracker_csv.into_bytes());
    let applications = TrackerCsvImporter::from_reader(reader, &track)?;

    let views: Vec<ApplicationStatusView> = applications
        .iter()
        .map(|application| application.status_view(&track))
        .collect();

    Ok(Json(PipelineImportResponse {
        imported: views.len(),
        applications: views,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pipeline_import_endpoint_maps_tracker_rows() {
        let request = PipelineImportRequest {
            tracker_csv: "Candidate,Stage,Status,Reason\n\
                          Jordan Alvarez,Phone Screen,,\n\
                          Lee Fong,Interview,,Position filled\n"
                .to_string(),
        };

        let Json(body) = pipeline_import_endpoint(Json(request))
            .await
            .expect("import succeeds");

        assert_eq!(body.imported, 2);
        assert_eq!(body.applications[0].stage.as_deref(), Some("Screen"));
        assert_eq!(body.applications[1].status, "disqualified");
        assert_eq!(
            body.applications[1].disqualification_reason.as_deref(),
            Some("Position filled")
        );
    }

    #[tokio::test]
    async fn pipeline_import_endpoint_rejects_malformed_csv() {
        let request = PipelineImportRequest {
            tracker_csv: "Candidate,Stage\nJordan Alvarez,Screen,extra\n".to_string(),
        };

        match pipeline_import_endpoint(Json(request)).await {
            Err(AppError::Import(_)) => {}
            other => panic!("expected import error, got {other:?}"),
        }
    }
}
