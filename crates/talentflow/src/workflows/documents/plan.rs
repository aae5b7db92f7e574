use std::collections::HashSet;

use super::field::{PairRole, ResolvedField};
use super::submission::FormSubmission;

/// One concrete operation against a document template field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldOp {
    SetText { field: String, value: String },
    SetCheckbox { field: String, checked: bool },
}

impl FieldOp {
    pub fn field(&self) -> &str {
        match self {
            FieldOp::SetText { field, .. } | FieldOp::SetCheckbox { field, .. } => field,
        }
    }
}

/// Ordered list of operations produced from one submission. Operations on
/// distinct fields commute; for the same field the later one is effective.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPlan {
    ops: Vec<FieldOp>,
}

impl FieldPlan {
    pub fn ops(&self) -> &[FieldOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Effective checkbox state for a field, after every op is applied.
    pub fn checkbox_state(&self, field: &str) -> Option<bool> {
        self.ops.iter().rev().find_map(|op| match op {
            FieldOp::SetCheckbox { field: name, checked } if name == field => Some(*checked),
            _ => None,
        })
    }

    /// Effective text value for a field, after every op is applied.
    pub fn text_value(&self, field: &str) -> Option<&str> {
        self.ops.iter().rev().find_map(|op| match op {
            FieldOp::SetText { field: name, value } if name == field => Some(value.as_str()),
            _ => None,
        })
    }

    fn push(&mut self, op: FieldOp) {
        self.ops.push(op);
    }
}

/// Map a submission onto concrete field operations.
///
/// Every checkbox-backed field is set explicitly on every fill, so a field
/// the operator never touched still lands in its unchecked state. Radio
/// groups are cleared before at most one member is checked; when a
/// submission slips past validation with several true members, the first
/// in declared field order wins. A yes/no pair always ends with exactly
/// one side checked, defaulting to No.
pub fn build_field_plan(fields: &[ResolvedField], submission: &FormSubmission) -> FieldPlan {
    let mut plan = FieldPlan::default();
    let mut handled_groups: HashSet<&str> = HashSet::new();
    let mut handled_pairs: HashSet<&str> = HashSet::new();

    for field in fields {
        match field {
            ResolvedField::Text { field_id, .. } => {
                plan.push(FieldOp::SetText {
                    field: field_id.clone(),
                    value: submission.text(field_id).to_string(),
                });
            }
            ResolvedField::Checkbox { field_id, .. } => {
                plan.push(FieldOp::SetCheckbox {
                    field: field_id.clone(),
                    checked: submission.flag(field_id),
                });
            }
            ResolvedField::RadioMember { group, .. } => {
                if !handled_groups.insert(group.as_str()) {
                    continue;
                }

                let members: Vec<&str> = fields
                    .iter()
                    .filter_map(|candidate| match candidate {
                        ResolvedField::RadioMember {
                            field_id,
                            group: candidate_group,
                            ..
                        } if candidate_group == group => Some(field_id.as_str()),
                        _ => None,
                    })
                    .collect();

                for member in &members {
                    plan.push(FieldOp::SetCheckbox {
                        field: (*member).to_string(),
                        checked: false,
                    });
                }

                if let Some(selected) = members.iter().find(|member| submission.flag(member)) {
                    plan.push(FieldOp::SetCheckbox {
                        field: (*selected).to_string(),
                        checked: true,
                    });
                }
            }
            ResolvedField::PairMember { pair, .. } => {
                if !handled_pairs.insert(pair.as_str()) {
                    continue;
                }

                let mut yes_field = None;
                let mut no_field = None;
                for candidate in fields {
                    if let ResolvedField::PairMember {
                        field_id,
                        pair: candidate_pair,
                        role,
                        ..
                    } = candidate
                    {
                        if candidate_pair == pair {
                            match role {
                                PairRole::Yes => yes_field = Some(field_id.as_str()),
                                PairRole::No => no_field = Some(field_id.as_str()),
                            }
                        }
                    }
                }

                // Resolution guarantees both sides exist for a valid form.
                if let (Some(yes), Some(no)) = (yes_field, no_field) {
                    let affirmed = submission.flag(yes);
                    plan.push(FieldOp::SetCheckbox {
                        field: yes.to_string(),
                        checked: affirmed,
                    });
                    plan.push(FieldOp::SetCheckbox {
                        field: no.to_string(),
                        checked: !affirmed,
                    });
                }
            }
        }
    }

    plan
}
