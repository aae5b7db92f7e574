use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Logical input kinds supported by document forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Date,
    Email,
    Tel,
    Checkbox,
    Textarea,
}

impl FieldKind {
    pub const fn is_boolean(self) -> bool {
        matches!(self, FieldKind::Checkbox)
    }
}

/// Declarative description of one logical input in a document form, as
/// loaded from a form registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFieldSpec {
    pub field_id: String,
    pub label: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub radio_group: Option<String>,
    #[serde(default)]
    pub yes_no_pair: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl FormFieldSpec {
    pub fn new(field_id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            field_id: field_id.into(),
            label: label.into(),
            kind,
            required: false,
            radio_group: None,
            yes_no_pair: None,
            hidden: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn in_radio_group(mut self, group: impl Into<String>) -> Self {
        self.radio_group = Some(group.into());
        self
    }

    pub fn in_yes_no_pair(mut self, pair: impl Into<String>) -> Self {
        self.yes_no_pair = Some(pair.into());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Which side of a yes/no pair a member covers. The pair's first declared
/// member is its Yes field, the second its No field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairRole {
    Yes,
    No,
}

/// Field specs resolved once at load time into typed variants, so the fill
/// path never branches on string flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedField {
    Text {
        field_id: String,
        label: String,
        kind: FieldKind,
        required: bool,
        hidden: bool,
    },
    Checkbox {
        field_id: String,
        label: String,
        hidden: bool,
    },
    RadioMember {
        field_id: String,
        label: String,
        group: String,
        hidden: bool,
    },
    PairMember {
        field_id: String,
        label: String,
        pair: String,
        role: PairRole,
        hidden: bool,
    },
}

impl ResolvedField {
    pub fn field_id(&self) -> &str {
        match self {
            ResolvedField::Text { field_id, .. }
            | ResolvedField::Checkbox { field_id, .. }
            | ResolvedField::RadioMember { field_id, .. }
            | ResolvedField::PairMember { field_id, .. } => field_id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ResolvedField::Text { label, .. }
            | ResolvedField::Checkbox { label, .. }
            | ResolvedField::RadioMember { label, .. }
            | ResolvedField::PairMember { label, .. } => label,
        }
    }

    pub fn is_hidden(&self) -> bool {
        match self {
            ResolvedField::Text { hidden, .. }
            | ResolvedField::Checkbox { hidden, .. }
            | ResolvedField::RadioMember { hidden, .. }
            | ResolvedField::PairMember { hidden, .. } => *hidden,
        }
    }
}

/// Errors raised while resolving a field registry.
#[derive(Debug, thiserror::Error)]
pub enum FieldSpecError {
    #[error("duplicate field id {0}")]
    DuplicateFieldId(String),
    #[error("field {0} declares both a radio group and a yes/no pair")]
    ConflictingGrouping(String),
    #[error("field {field} belongs to {group} but is not a checkbox")]
    NonBooleanGroupMember { field: String, group: String },
    #[error("yes/no pair {pair} has {members} member(s); exactly two are required")]
    MalformedPair { pair: String, members: usize },
}

/// Resolve raw specs into typed variants, validating grouping invariants.
pub fn resolve_fields(specs: &[FormFieldSpec]) -> Result<Vec<ResolvedField>, FieldSpecError> {
    let mut seen_ids = HashSet::new();
    for spec in specs {
        if !seen_ids.insert(spec.field_id.as_str()) {
            return Err(FieldSpecError::DuplicateFieldId(spec.field_id.clone()));
        }
    }

    let mut pair_members: HashMap<&str, usize> = HashMap::new();
    for spec in specs {
        if let Some(pair) = &spec.yes_no_pair {
            *pair_members.entry(pair.as_str()).or_default() += 1;
        }
    }
    for (pair, members) in &pair_members {
        if *members != 2 {
            return Err(FieldSpecError::MalformedPair {
                pair: (*pair).to_string(),
                members: *members,
            });
        }
    }

    let mut pair_roles: HashMap<&str, PairRole> = HashMap::new();
    let mut resolved = Vec::with_capacity(specs.len());

    for spec in specs {
        match (&spec.radio_group, &spec.yes_no_pair) {
            (Some(_), Some(_)) => {
                return Err(FieldSpecError::ConflictingGrouping(spec.field_id.clone()));
            }
            (Some(group), None) => {
                if !spec.kind.is_boolean() {
                    return Err(FieldSpecError::NonBooleanGroupMember {
                        field: spec.field_id.clone(),
                        group: group.clone(),
                    });
                }
                resolved.push(ResolvedField::RadioMember {
                    field_id: spec.field_id.clone(),
                    label: spec.label.clone(),
                    group: group.clone(),
                    hidden: spec.hidden,
                });
            }
            (None, Some(pair)) => {
                if !spec.kind.is_boolean() {
                    return Err(FieldSpecError::NonBooleanGroupMember {
                        field: spec.field_id.clone(),
                        group: pair.clone(),
                    });
                }
                let role = match pair_roles.get(pair.as_str()) {
                    None => {
                        pair_roles.insert(pair.as_str(), PairRole::Yes);
                        PairRole::Yes
                    }
                    Some(_) => PairRole::No,
                };
                resolved.push(ResolvedField::PairMember {
                    field_id: spec.field_id.clone(),
                    label: spec.label.clone(),
                    pair: pair.clone(),
                    role,
                    hidden: spec.hidden,
                });
            }
            (None, None) => {
                if spec.kind.is_boolean() {
                    resolved.push(ResolvedField::Checkbox {
                        field_id: spec.field_id.clone(),
                        label: spec.label.clone(),
                        hidden: spec.hidden,
                    });
                } else {
                    resolved.push(ResolvedField::Text {
                        field_id: spec.field_id.clone(),
                        label: spec.label.clone(),
                        kind: spec.kind,
                        required: spec.required,
                        hidden: spec.hidden,
                    });
                }
            }
        }
    }

    Ok(resolved)
}

/// A named form resolved into typed fields.
#[derive(Debug, Clone)]
pub struct DocumentForm {
    name: String,
    fields: Vec<ResolvedField>,
}

impl DocumentForm {
    pub fn resolve(
        name: impl Into<String>,
        specs: &[FormFieldSpec],
    ) -> Result<Self, FieldSpecError> {
        Ok(Self {
            name: name.into(),
            fields: resolve_fields(specs)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[ResolvedField] {
        &self.fields
    }

    /// Fields shown on the rendered form. Hidden fields stay fillable but
    /// are never presented for input.
    pub fn renderable_fields(&self) -> impl Iterator<Item = &ResolvedField> {
        self.fields.iter().filter(|field| !field.is_hidden())
    }
}
