use super::plan::{FieldOp, FieldPlan};

/// Byte-level document collaborator. Implementations own the concrete PDF
/// manipulation; this core only issues field operations against it.
pub trait DocumentTemplate {
    fn set_text(&mut self, field: &str, value: &str) -> Result<(), FillError>;
    fn set_checkbox(&mut self, field: &str, checked: bool) -> Result<(), FillError>;
    /// Convert interactive fields to static content and serialize.
    fn flatten(&mut self) -> Result<Vec<u8>, FillError>;
}

/// Source of fillable templates, keyed by document identifier.
pub trait TemplateSource: Send + Sync {
    type Template: DocumentTemplate;

    fn load(&self, document_id: &str) -> Result<Self::Template, FillError>;
}

/// Filled, flattened output bytes. Owned by the caller; the core retains
/// nothing after the fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilledDocument {
    bytes: Vec<u8>,
}

impl FilledDocument {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Errors raised while loading, filling, or flattening a template.
#[derive(Debug, thiserror::Error)]
pub enum FillError {
    #[error("template has no field named {0}")]
    FieldNotFound(String),
    #[error("unknown document template {0}")]
    UnknownTemplate(String),
    #[error("template source unavailable: {0}")]
    SourceUnavailable(String),
    #[error("failed to flatten document: {0}")]
    Flatten(String),
}

/// Apply every planned operation, then flatten and serialize. A field name
/// missing from the template aborts the whole fill; a template/mapping
/// mismatch must surface to the operator, never produce a partial
/// document.
pub fn fill<T: DocumentTemplate>(
    mut template: T,
    plan: &FieldPlan,
) -> Result<FilledDocument, FillError> {
    for op in plan.ops() {
        match op {
            FieldOp::SetText { field, value } => template.set_text(field, value)?,
            FieldOp::SetCheckbox { field, checked } => template.set_checkbox(field, *checked)?,
        }
    }

    let bytes = template.flatten()?;
    Ok(FilledDocument { bytes })
}
