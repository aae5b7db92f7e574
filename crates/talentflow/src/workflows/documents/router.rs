use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use serde_json::json;

use super::field::{FieldKind, ResolvedField};
use super::service::{DocumentError, DocumentService};
use super::submission::FormSubmission;
use super::template::{FillError, TemplateSource};

/// Router builder exposing the rendered-form listing and the fill
/// operation.
pub fn document_router<TS>(service: Arc<DocumentService<TS>>) -> Router
where
    TS: TemplateSource + 'static,
{
    Router::new()
        .route(
            "/api/v1/documents/forms/:form_name",
            get(form_handler::<TS>),
        )
        .route(
            "/api/v1/documents/:document_id/fill",
            post(fill_handler::<TS>),
        )
        .with_state(service)
}

/// One rendered form input as presented to the operator.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct FormFieldView {
    field_id: String,
    label: String,
    control: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
}

impl FormFieldView {
    fn from_resolved(field: &ResolvedField) -> Self {
        let (control, group) = match field {
            ResolvedField::Text { kind, .. } => {
                let control = match kind {
                    FieldKind::Date => "date",
                    FieldKind::Email => "email",
                    FieldKind::Tel => "tel",
                    FieldKind::Textarea => "textarea",
                    _ => "text",
                };
                (control, None)
            }
            ResolvedField::Checkbox { .. } => ("checkbox", None),
            ResolvedField::RadioMember { group, .. } => ("checkbox", Some(group.clone())),
            ResolvedField::PairMember { pair, .. } => ("checkbox", Some(pair.clone())),
        };

        Self {
            field_id: field.field_id().to_string(),
            label: field.label().to_string(),
            control,
            group,
        }
    }
}

pub(crate) async fn form_handler<TS>(
    State(service): State<Arc<DocumentService<TS>>>,
    Path(form_name): Path<String>,
) -> Response
where
    TS: TemplateSource + 'static,
{
    if form_name != service.form().name() {
        let payload = json!({ "error": format!("unknown form {form_name}") });
        return (StatusCode::NOT_FOUND, axum::Json(payload)).into_response();
    }

    let fields: Vec<FormFieldView> = service
        .form()
        .renderable_fields()
        .map(FormFieldView::from_resolved)
        .collect();

    (StatusCode::OK, axum::Json(fields)).into_response()
}

pub(crate) async fn fill_handler<TS>(
    State(service): State<Arc<DocumentService<TS>>>,
    Path(document_id): Path<String>,
    axum::Json(submission): axum::Json<FormSubmission>,
) -> Response
where
    TS: TemplateSource + 'static,
{
    match service.fill_submission(&document_id, &submission) {
        Ok(document) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime::APPLICATION_PDF.as_ref())],
            document.into_bytes(),
        )
            .into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: DocumentError) -> Response {
    let status = match &error {
        DocumentError::Submission(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DocumentError::Fill(FillError::FieldNotFound(_)) => StatusCode::UNPROCESSABLE_ENTITY,
        DocumentError::Fill(FillError::UnknownTemplate(_)) => StatusCode::NOT_FOUND,
        DocumentError::Fill(FillError::SourceUnavailable(_)) => StatusCode::BAD_GATEWAY,
        DocumentError::Fill(FillError::Flatten(_)) | DocumentError::Spec(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
