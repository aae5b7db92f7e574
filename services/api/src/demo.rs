use crate::infra::{
    default_track, employment_form, EnvSession, InMemoryApplicationDirectory,
    InMemoryDisqualificationStore, InMemoryStageStore, InMemoryTemplateSource,
};
use clap::Args;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use talentflow::error::AppError;
use talentflow::workflows::documents::{
    DocumentError, DocumentService, FormSubmission, EMPLOYMENT_APPLICATION,
};
use talentflow::workflows::pipeline::{
    Actor, ActorRole, ApplicationStatusView, CandidateId, DisqualificationRequest, PipelineError,
    PipelineService, StageId, TrackerCsvImporter,
};

#[derive(Args, Debug)]
pub(crate) struct PipelineReportArgs {
    /// Path to a tracker CSV export
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Maximum number of applications to list individually
    #[arg(long, default_value_t = 20)]
    pub(crate) limit: usize,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Walk the pipeline without printing the filled document excerpt
    #[arg(long)]
    pub(crate) quiet: bool,
}

pub(crate) fn run_pipeline_report(args: PipelineReportArgs) -> Result<(), AppError> {
    let track = default_track().map_err(PipelineError::from)?;
    let applications = TrackerCsvImporter::from_path(&args.csv, &track)?;

    let mut per_stage: BTreeMap<String, usize> = BTreeMap::new();
    let mut disqualified = 0usize;
    for application in &applications {
        if application.is_disqualified() {
            disqualified += 1;
        }
        let stage = track
            .current_stage(application.current_stage_id.as_ref())
            .map(|stage| stage.name.clone())
            .unwrap_or_else(|| "(unplaced)".to_string());
        *per_stage.entry(stage).or_default() += 1;
    }

    println!("Imported {} application(s)", applications.len());
    println!("Disqualified: {disqualified}");
    println!();
    println!("Stage distribution:");
    for (stage, count) in &per_stage {
        println!("  {stage:<14} {count}");
    }

    println!();
    for application in applications.iter().take(args.limit) {
        print_view(&application.status_view(&track));
    }
    if applications.len() > args.limit {
        println!("  ... {} more", applications.len() - args.limit);
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("== Candidate pipeline ==");

    let track = default_track().map_err(PipelineError::from)?;
    let session = EnvSession::fixed(Actor {
        role: ActorRole::Recruiter,
        is_manager: true,
    });
    let service = PipelineService::new(
        Arc::new(session),
        Arc::new(InMemoryStageStore::default()),
        Arc::new(InMemoryDisqualificationStore::default()),
        Arc::new(InMemoryApplicationDirectory::default()),
        track,
    );

    let hired = service.register(
        CandidateId("cand-jordan".to_string()),
        Some(StageId("s-applied".to_string())),
    )?;
    println!("registered {}", hired.id.0);
    loop {
        match service.advance(&hired.id) {
            Ok(view) => {
                print_view(&view);
                if view.terminal {
                    break;
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
    match service.advance(&hired.id) {
        Err(PipelineError::Transition(err)) => {
            println!("further advance rejected: {err}");
        }
        Ok(_) => println!("unexpected advance past the terminal stage"),
        Err(err) => return Err(err.into()),
    }

    let rejected = service.register(
        CandidateId("cand-lee".to_string()),
        Some(StageId("s-screen".to_string())),
    )?;
    let view = service.disqualify(
        &rejected.id,
        DisqualificationRequest::Custom {
            reason: "Withdrew after the phone screen".to_string(),
        },
    )?;
    print_view(&view);
    match service.advance(&rejected.id) {
        Err(PipelineError::Transition(err)) => {
            println!("stage frozen after disqualification: {err}");
        }
        Ok(_) => println!("unexpected transition on a disqualified application"),
        Err(err) => return Err(err.into()),
    }

    println!();
    println!("== Employment application document ==");

    let form = employment_form().map_err(DocumentError::from)?;
    let source = InMemoryTemplateSource::with_form(EMPLOYMENT_APPLICATION, &form);
    let documents = DocumentService::new(Arc::new(source), form);

    let submission = FormSubmission::new()
        .set_text("First Name", "Jordan")
        .set_text("Last Name", "Alvarez")
        .set_text("Email", "jordan.alvarez@example.com")
        .set_text("Date Available", "2026-09-01")
        .set_flag("Full or Part Time", true)
        .set_flag("Nights Yes", true)
        .set_text("Signature1_es_:signer:signature", "Jordan Alvarez");

    let document = documents
        .fill_submission(EMPLOYMENT_APPLICATION, &submission)
        .map_err(AppError::from)?;
    println!("filled document: {} byte(s)", document.len());

    if !args.quiet {
        if let Ok(rendered) = String::from_utf8(document.into_bytes()) {
            for line in rendered.lines().take(8) {
                println!("  {line}");
            }
        }
    }

    Ok(())
}

fn print_view(view: &ApplicationStatusView) {
    let stage = view.stage.as_deref().unwrap_or("(unplaced)");
    let mut line = format!("  {} [{}] {}", view.application_id.0, view.status, stage);
    if let Some(reason) = &view.disqualification_reason {
        if !reason.is_empty() {
            line.push_str(&format!(" - {reason}"));
        }
    }
    println!("{line}");
}
