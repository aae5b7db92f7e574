use std::sync::Arc;

use super::field::{DocumentForm, FieldSpecError};
use super::plan::build_field_plan;
use super::submission::{validate_submission, FormSubmission, SubmissionError};
use super::template::{fill, FillError, FilledDocument, TemplateSource};

/// Composes validation, planning, and filling for one resolved form.
pub struct DocumentService<TS> {
    source: Arc<TS>,
    form: DocumentForm,
}

impl<TS> DocumentService<TS>
where
    TS: TemplateSource + 'static,
{
    pub fn new(source: Arc<TS>, form: DocumentForm) -> Self {
        Self { source, form }
    }

    pub fn form(&self) -> &DocumentForm {
        &self.form
    }

    /// Validate the submission, build the field plan, and apply it to the
    /// identified template. No bytes are produced on any failure.
    pub fn fill_submission(
        &self,
        document_id: &str,
        submission: &FormSubmission,
    ) -> Result<FilledDocument, DocumentError> {
        validate_submission(self.form.fields(), submission)?;
        let plan = build_field_plan(self.form.fields(), submission);
        let template = self.source.load(document_id)?;
        let document = fill(template, &plan)?;
        Ok(document)
    }
}

/// Error raised by the document service.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error(transparent)]
    Spec(#[from] FieldSpecError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
    #[error(transparent)]
    Fill(#[from] FillError),
}
