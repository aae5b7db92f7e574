//! Declarative document filling: a logical field registry resolved into
//! typed variants, a submission-to-field-operation mapper honoring radio
//! group and yes/no pair semantics, and the fill/flatten operation against
//! a template collaborator.

pub mod field;
pub mod forms;
pub mod plan;
pub mod router;
pub mod service;
pub mod submission;
pub mod template;

#[cfg(test)]
mod tests;

pub use field::{
    resolve_fields, DocumentForm, FieldKind, FieldSpecError, FormFieldSpec, PairRole,
    ResolvedField,
};
pub use forms::{employment_application, EMPLOYMENT_APPLICATION};
pub use plan::{build_field_plan, FieldOp, FieldPlan};
pub use router::document_router;
pub use service::{DocumentError, DocumentService};
pub use submission::{validate_submission, FieldValue, FormSubmission, SubmissionError};
pub use template::{fill, DocumentTemplate, FillError, FilledDocument, TemplateSource};
