use std::collections::HashSet;

use super::domain::{Stage, StageId};

/// Ordered, finite stage list for one job. The last element is the
/// terminal stage; stage ids are unique within the track.
#[derive(Debug, Clone)]
pub struct StageTrack {
    stages: Vec<Stage>,
}

impl StageTrack {
    pub fn new(stages: Vec<Stage>) -> Result<Self, TrackError> {
        let mut seen = HashSet::new();
        for stage in &stages {
            if !seen.insert(stage.id.clone()) {
                return Err(TrackError::DuplicateStageId(stage.id.clone()));
            }
        }

        Ok(Self { stages })
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn contains(&self, id: &StageId) -> bool {
        self.position(id).is_some()
    }

    pub fn stage(&self, id: &StageId) -> Option<&Stage> {
        self.position(id).map(|index| &self.stages[index])
    }

    fn position(&self, id: &StageId) -> Option<usize> {
        self.stages.iter().position(|stage| &stage.id == id)
    }

    /// Stage the application currently sits in, or `None` when the id is
    /// unset or no longer part of the track.
    pub fn current_stage(&self, current: Option<&StageId>) -> Option<&Stage> {
        current.and_then(|id| self.stage(id))
    }

    /// Stage immediately following the current one, or `None` when the
    /// current stage is unset or already terminal. An unset current stage
    /// has no defined successor; callers surface that as a neutral state.
    pub fn next_stage(&self, current: Option<&StageId>) -> Option<&Stage> {
        let index = current.and_then(|id| self.position(id))?;
        self.stages.get(index + 1)
    }

    /// True iff the current stage is the last element of the track.
    pub fn is_terminal(&self, current: Option<&StageId>) -> bool {
        match current.and_then(|id| self.position(id)) {
            Some(index) => index + 1 == self.stages.len(),
            None => false,
        }
    }

    pub fn terminal_stage(&self) -> Option<&Stage> {
        self.stages.last()
    }
}

/// Errors raised while assembling a stage track.
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    #[error("stage track contains duplicate stage id {0:?}")]
    DuplicateStageId(StageId),
}
