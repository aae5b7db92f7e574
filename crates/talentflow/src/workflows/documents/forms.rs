use super::field::{DocumentForm, FieldKind, FieldSpecError, FormFieldSpec};

/// Document identifier for the standard employment application template.
pub const EMPLOYMENT_APPLICATION: &str = "employment_application";

/// Standard employment application form: applicant identity, an
/// employment-type radio group, availability yes/no pairs, and the
/// e-signature field that is filled but never rendered for input.
pub fn employment_application() -> Result<DocumentForm, FieldSpecError> {
    DocumentForm::resolve(EMPLOYMENT_APPLICATION, &employment_application_specs())
}

fn employment_application_specs() -> Vec<FormFieldSpec> {
    vec![
        FormFieldSpec::new("First Name", "First name", FieldKind::Text).required(),
        FormFieldSpec::new("Last Name", "Last name", FieldKind::Text).required(),
        FormFieldSpec::new("Email", "Email address", FieldKind::Email).required(),
        FormFieldSpec::new("Phone", "Phone number", FieldKind::Tel),
        FormFieldSpec::new("Address", "Street address", FieldKind::Textarea),
        FormFieldSpec::new("Date Available", "Date available to start", FieldKind::Date),
        FormFieldSpec::new("Position", "Position applied for", FieldKind::Text),
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
        FormFieldSpec::new("Weekends Yes", "Available weekends", FieldKind::Checkbox)
            .in_yes_no_pair("availability_weekends"),
        FormFieldSpec::new("Weekends No", "Not available weekends", FieldKind::Checkbox)
            .in_yes_no_pair("availability_weekends"),
        FormFieldSpec::new(
            "Previously Employed",
            "Previously employed here",
            FieldKind::Checkbox,
        ),
        FormFieldSpec::new(
            "Signature1_es_:signer:signature",
            "Applicant signature",
            FieldKind::Text,
        )
        .hidden(),
    ]
}
