use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use crate::workflows::documents::field::{DocumentForm, FieldKind, FormFieldSpec};
use crate::workflows::documents::forms;
use crate::workflows::documents::service::DocumentService;
use crate::workflows::documents::submission::FormSubmission;
use crate::workflows::documents::template::{DocumentTemplate, FillError, TemplateSource};

/// Template double that tracks per-field state and renders a line-based
/// flattened output so tests can assert on the final document.
pub(super) struct MemoryTemplate {
    fields: HashSet<String>,
    text: BTreeMap<String, String>,
    checks: BTreeMap<String, bool>,
}

impl MemoryTemplate {
    pub(super) fn with_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: fields.into_iter().map(Into::into).collect(),
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

impl DocumentTemplate for MemoryTemplate {
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

/// Source double keyed by document id.
#[derive(Default)]
pub(super) struct MemoryTemplateSource {
    templates: HashMap<String, Vec<String>>,
}

impl MemoryTemplateSource {
    pub(super) fn with_template<I, S>(document_id: &str, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut templates = HashMap::new();
        templates.insert(
            document_id.to_string(),
            fields.into_iter().map(Into::into).collect(),
        );
        Self { templates }
    }
}

impl TemplateSource for MemoryTemplateSource {
    type Template = MemoryTemplate;

    fn load(&self, document_id: &str) -> Result<Self::Template, FillError> {
        let fields = self
            .templates
            .get(document_id)
            .ok_or_else(|| FillError::UnknownTemplate(document_id.to_string()))?;
        Ok(MemoryTemplate::with_fields(fields.iter().cloned()))
    }
}

pub(super) fn employment_form() -> DocumentForm {
    forms::employment_application().expect("built-in form resolves")
}

pub(super) fn employment_field_ids() -> Vec<String> {
    employment_form()
        .fields()
        .iter()
        .map(|field| field.field_id().to_string())
        .collect()
}

pub(super) fn employment_service() -> DocumentService<MemoryTemplateSource> {
    let source = MemoryTemplateSource::with_template(
        forms::EMPLOYMENT_APPLICATION,
        employment_field_ids(),
    );
    DocumentService::new(Arc::new(source), employment_form())
}

/// Minimal submission that satisfies the form's required fields.
pub(super) fn baseline_submission() -> FormSubmission {
    FormSubmission::new()
        .set_text("First Name", "Jordan")
        .set_text("Last Name", "Alvarez")
        .set_text("Email", "jordan.alvarez@example.com")
}

/// Availability form used by the focused pair/radio tests: one radio
/// group and one yes/no pair, nothing else.
pub(super) fn availability_specs() -> Vec<FormFieldSpec> {
    vec![
        FormFieldSpec::new("Full Time Only", "Full time only", FieldKind::Checkbox)
            .in_radio_group("employment_type"),
        FormFieldSpec::new("Part Time Only", "Part time only", FieldKind::Checkbox)
            .in_radio_group("employment_type"),
        FormFieldSpec::new("Full or Part Time", "Full or part time", FieldKind::Checkbox)
            .in_radio_group("employment_type"),
        FormFieldSpec::new("Nights Yes", "Available nights", FieldKind::Checkbox)
            .in_yes_no_pair("availability_nights"),
        FormFieldSpec::new("Nights No", "Not available nights", FieldKind::Checkbox)
            .in_yes_no_pair("availability_nights"),
    ]
}
