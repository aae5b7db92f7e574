use crate::cli::ServeArgs;
use crate::infra::{
    default_track, employment_form, AppState, EnvSession, InMemoryApplicationDirectory,
    InMemoryDisqualificationStore, InMemoryStageStore, InMemoryTemplateSource,
};
use crate::routes::with_app_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talentflow::config::AppConfig;
use talentflow::error::AppError;
use talentflow::telemetry;
use talentflow::workflows::documents::{DocumentError, DocumentService, EMPLOYMENT_APPLICATION};
use talentflow::workflows::pipeline::{PipelineError, PipelineService};
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let track = default_track().map_err(PipelineError::from)?;
    let pipeline_service = Arc::new(PipelineService::new(
        Arc::new(EnvSession::from_env()),
        Arc::new(InMemoryStageStore::default()),
        Arc::new(InMemoryDisqualificationStore::default()),
        Arc::new(InMemoryApplicationDirectory::default()),
        track,
    ));

    let form = employment_form().map_err(DocumentError::from)?;
    let template_source = InMemoryTemplateSource::with_form(EMPLOYMENT_APPLICATION, &form);
    let document_service = Arc::new(DocumentService::new(Arc::new(template_source), form));

    let app = with_app_routes(pipeline_service, document_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "candidate pipeline service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
