use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::field::ResolvedField;

/// Submitted value for one logical field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Text(String),
}

/// Mapping of field id to submitted value. Absent entries read as empty
/// text or an unset flag depending on the field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSubmission(pub BTreeMap<String, FieldValue>);

impl FormSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_text(mut self, field_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(field_id.into(), FieldValue::Text(value.into()));
        self
    }

    pub fn set_flag(mut self, field_id: impl Into<String>, value: bool) -> Self {
        self.0.insert(field_id.into(), FieldValue::Flag(value));
        self
    }

    pub fn get(&self, field_id: &str) -> Option<&FieldValue> {
        self.0.get(field_id)
    }

    /// Boolean reading of a field: only an explicit `true` counts; absent
    /// or non-flag values read as unset.
    pub fn flag(&self, field_id: &str) -> bool {
        matches!(self.0.get(field_id), Some(FieldValue::Flag(true)))
    }

    /// Text reading of a field; absent values read as the empty string.
    pub fn text(&self, field_id: &str) -> &str {
        match self.0.get(field_id) {
            Some(FieldValue::Text(value)) => value,
            _ => "",
        }
    }
}

/// Validation failures for a submission against a resolved form.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("required field {0} is empty")]
    MissingRequired(String),
    #[error("field {0} expects a boolean value")]
    ExpectedFlag(String),
    #[error("field {0} expects text")]
    ExpectedText(String),
    #[error("radio group {group} has multiple selected members ({first} and {second})")]
    MultipleRadioSelections {
        group: String,
        first: String,
        second: String,
    },
}

/// Reject malformed submissions before they reach the field mapper. In
/// particular a radio group may carry at most one selected member; the
/// mapper's first-match-wins tie-break is a last resort, not a contract.
pub fn validate_submission(
    fields: &[ResolvedField],
    submission: &FormSubmission,
) -> Result<(), SubmissionError> {
    let mut selected_per_group: BTreeMap<&str, &str> = BTreeMap::new();

    for field in fields {
        let field_id = field.field_id();
        match field {
            ResolvedField::Text { required, hidden, .. } => {
                if let Some(FieldValue::Flag(_)) = submission.get(field_id) {
                    return Err(SubmissionError::ExpectedText(field_id.to_string()));
                }
                // Required-ness applies to the rendered form only; hidden
                // fields are fillable but never block a submission.
                if *required && !*hidden && submission.text(field_id).trim().is_empty() {
                    return Err(SubmissionError::MissingRequired(field_id.to_string()));
                }
            }
            ResolvedField::Checkbox { .. } | ResolvedField::PairMember { .. } => {
                if let Some(FieldValue::Text(_)) = submission.get(field_id) {
                    return Err(SubmissionError::ExpectedFlag(field_id.to_string()));
                }
            }
            ResolvedField::RadioMember { group, .. } => {
                if let Some(FieldValue::Text(_)) = submission.get(field_id) {
                    return Err(SubmissionError::ExpectedFlag(field_id.to_string()));
                }
                if submission.flag(field_id) {
                    if let Some(first) = selected_per_group.get(group.as_str()) {
                        return Err(SubmissionError::MultipleRadioSelections {
                            group: group.clone(),
                            first: (*first).to_string(),
                            second: field_id.to_string(),
                        });
                    }
                    selected_per_group.insert(group.as_str(), field_id);
                }
            }
        }
    }

    Ok(())
}
