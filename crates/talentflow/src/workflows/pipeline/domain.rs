use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifier wrapper for stages, unique within one job's track.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StageId(pub String);

/// One step in a hiring pipeline, ordered within its track.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: StageId,
    pub name: String,
}

impl Stage {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: StageId(id.into()),
            name: name.into(),
        }
    }
}

/// Identifier wrapper for candidate applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

/// Identifier wrapper for candidates in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CandidateId(pub String);

/// High level status tracked for a candidate in a pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Active,
    Disqualified,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::Active => "active",
            ApplicationStatus::Disqualified => "disqualified",
        }
    }
}

/// Candidate-in-pipeline record. The stage id is unset until the candidate
/// is placed on the track; a disqualified application keeps its last stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateApplication {
    pub id: ApplicationId,
    pub candidate_id: CandidateId,
    pub current_stage_id: Option<StageId>,
    pub status: ApplicationStatus,
    pub disqualification: Option<DisqualificationReason>,
    pub applied_on: Option<NaiveDate>,
}

impl CandidateApplication {
    pub fn active(
        id: ApplicationId,
        candidate_id: CandidateId,
        current_stage_id: Option<StageId>,
    ) -> Self {
        Self {
            id,
            candidate_id,
            current_stage_id,
            status: ApplicationStatus::Active,
            disqualification: None,
            applied_on: None,
        }
    }

    pub fn applied_on(mut self, date: NaiveDate) -> Self {
        self.applied_on = Some(date);
        self
    }

    pub fn is_disqualified(&self) -> bool {
        self.status == ApplicationStatus::Disqualified
    }
}

/// Reason attached to a committed disqualification decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisqualificationReason {
    /// Immediate rejection with no reason recorded.
    Unspecified,
    Canned(CannedReason),
    Custom(String),
}

impl DisqualificationReason {
    /// Persisted reason text; the unspecified variant maps to the empty
    /// string the backend contract expects.
    pub fn as_text(&self) -> &str {
        match self {
            DisqualificationReason::Unspecified => "",
            DisqualificationReason::Canned(reason) => reason.label(),
            DisqualificationReason::Custom(text) => text,
        }
    }
}

/// Fixed menu of disqualification reasons offered before free-text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CannedReason {
    LackOfFit,
    InsufficientExperience,
    MissingQualifications,
    CompensationMismatch,
    WithdrewApplication,
    PositionFilled,
}

impl CannedReason {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::LackOfFit,
            Self::InsufficientExperience,
            Self::MissingQualifications,
            Self::CompensationMismatch,
            Self::WithdrewApplication,
            Self::PositionFilled,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::LackOfFit => "Lack of fit",
            Self::InsufficientExperience => "Insufficient experience",
            Self::MissingQualifications => "Missing qualifications",
            Self::CompensationMismatch => "Compensation mismatch",
            Self::WithdrewApplication => "Withdrew application",
            Self::PositionFilled => "Position filled",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|reason| reason.label() == label.trim())
    }
}
