mod mapping;
mod normalizer;
mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use super::domain::{
    ApplicationId, ApplicationStatus, CandidateApplication, CandidateId, CannedReason,
    DisqualificationReason,
};
use super::track::StageTrack;

use parser::TrackerRecord;

#[derive(Debug)]
pub enum TrackerImportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl std::fmt::Display for TrackerImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerImportError::Io(err) => write!(f, "failed to read tracker export: {}", err),
            TrackerImportError::Csv(err) => write!(f, "invalid tracker CSV data: {}", err),
        }
    }
}

impl std::error::Error for TrackerImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackerImportError::Io(err) => Some(err),
            TrackerImportError::Csv(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for TrackerImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for TrackerImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Replays an applicant-tracker CSV export onto a stage track, producing
/// one application per candidate. The first row for a candidate wins;
/// later duplicates are ignored.
pub struct TrackerCsvImporter;

impl TrackerCsvImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        track: &StageTrack,
    ) -> Result<Vec<CandidateApplication>, TrackerImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, track)
    }

    pub fn from_reader<R: Read>(
        reader: R,
        track: &StageTrack,
    ) -> Result<Vec<CandidateApplication>, TrackerImportError> {
        let mut applied: HashSet<String> = HashSet::new();
        let mut applications = Vec::new();

        for record in parser::parse_records(reader)? {
            if !applied.insert(record.candidate_key.clone()) {
                continue;
            }

            let sequence = applications.len() + 1;
            applications.push(application_from_record(record, track, sequence));
        }

        Ok(applications)
    }
}

fn application_from_record(
    record: TrackerRecord,
    track: &StageTrack,
    sequence: usize,
) -> CandidateApplication {
    // A stage label the track does not know leaves the candidate imported
    // but unplaced rather than dropping the row.
    let stage = record
        .normalized_stage
        .as_deref()
        .and_then(|normalized| mapping::stage_for_normalized(track, normalized))
        .map(|stage| stage.id.clone());

    let mut application = CandidateApplication::active(
        ApplicationId(format!("import-{sequence:04}")),
        CandidateId(record.candidate_key),
        stage,
    );
    application.applied_on = record.applied_on;

    if record.disqualified {
        application.status = ApplicationStatus::Disqualified;
        application.disqualification = Some(reason_from_text(record.reason));
    }

    application
}

fn reason_from_text(text: Option<String>) -> DisqualificationReason {
    match text {
        None => DisqualificationReason::Unspecified,
        Some(text) => match CannedReason::from_label(&text) {
            Some(canned) => DisqualificationReason::Canned(canned),
            None => DisqualificationReason::Custom(text.trim().to_string()),
        },
    }
}
