use std::sync::Arc;

use super::common::{
    baseline_submission, employment_field_ids, employment_form, employment_service,
    MemoryTemplate, MemoryTemplateSource,
};
use crate::workflows::documents::forms::EMPLOYMENT_APPLICATION;
use crate::workflows::documents::plan::build_field_plan;
use crate::workflows::documents::service::{DocumentError, DocumentService};
use crate::workflows::documents::submission::FormSubmission;
use crate::workflows::documents::template::{fill, FillError};

#[test]
fn fill_produces_flattened_bytes() {
    let form = employment_form();
    let submission = baseline_submission().set_flag("Nights Yes", true);
    let plan = build_field_plan(form.fields(), &submission);
    let template = MemoryTemplate::with_fields(employment_field_ids());

    let document = fill(template, &plan).expect("fill succeeds");

    let rendered = String::from_utf8(document.into_bytes()).expect("utf8 rendering");
    assert!(rendered.contains("First Name=Jordan"));
    assert!(rendered.contains("Nights Yes=[x]"));
    assert!(rendered.contains("Nights No=[ ]"));
}

#[test]
fn a_missing_template_field_aborts_the_whole_fill() {
    let form = employment_form();
    let submission =
        baseline_submission().set_text("Signature1_es_:signer:signature", "Jordan Alvarez");
    let plan = build_field_plan(form.fields(), &submission);

    // Template lacks the e-signature field referenced by the plan.
    let fields: Vec<String> = employment_field_ids()
        .into_iter()
        .filter(|field| field != "Signature1_es_:signer:signature")
        .collect();
    let template = MemoryTemplate::with_fields(fields);

    match fill(template, &plan) {
        Err(FillError::FieldNotFound(field)) => {
            assert_eq!(field, "Signature1_es_:signer:signature");
        }
        Ok(_) => panic!("fill must not produce a partial document"),
        Err(other) => panic!("expected field-not-found, got {other:?}"),
    }
}

#[test]
fn service_validates_before_loading_the_template() {
    let service = employment_service();
    // Required email is missing, so the template source must not be hit.
    let submission = FormSubmission::new()
        .set_text("First Name", "Jordan")
        .set_text("Last Name", "Alvarez");

    match service.fill_submission(EMPLOYMENT_APPLICATION, &submission) {
        Err(DocumentError::Submission(_)) => {}
        other => panic!("expected submission error, got {other:?}"),
    }
}

#[test]
fn service_fills_the_employment_application_end_to_end() {
    let service = employment_service();
    let submission = baseline_submission()
        .set_flag("Full or Part Time", true)
        .set_flag("Weekends Yes", true);

    let document = service
        .fill_submission(EMPLOYMENT_APPLICATION, &submission)
        .expect("fill succeeds");

    let rendered = String::from_utf8(document.into_bytes()).expect("utf8 rendering");
    assert!(rendered.contains("Full or Part Time=[x]"));
    assert!(rendered.contains("Full Time Only=[ ]"));
    assert!(rendered.contains("Weekends Yes=[x]"));
    assert!(rendered.contains("Weekends No=[ ]"));
    // Pair with no answer lands on No.
    assert!(rendered.contains("Nights Yes=[ ]"));
    assert!(rendered.contains("Nights No=[x]"));
}

#[test]
fn unknown_document_ids_surface_from_the_source() {
    let source = MemoryTemplateSource::default();
    let service = DocumentService::new(Arc::new(source), employment_form());

    match service.fill_submission("w4_2020", &baseline_submission()) {
        Err(DocumentError::Fill(FillError::UnknownTemplate(id))) => assert_eq!(id, "w4_2020"),
        other => panic!("expected unknown template, got {other:?}"),
    }
}
