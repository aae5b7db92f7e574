use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SearchConfig;

use super::domain::CandidateId;
use super::repository::StoreError;

/// Hit returned by the candidate lookup collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateHit {
    pub candidate_id: CandidateId,
    pub display_name: String,
}

/// Lookup collaborator queried once per settled input value.
pub trait CandidateFinder: Send + Sync {
    fn find(&self, query: &str) -> Result<Vec<CandidateHit>, StoreError>;
}

/// Outcome of one debounced lookup round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Results(Vec<CandidateHit>),
    /// A newer input value arrived; this round's response must not be
    /// applied to current state.
    Superseded,
}

/// Debounces rapid input changes and discards superseded responses.
///
/// Each `query` call takes a fresh generation ticket. After the quiet
/// period, and again after the collaborator responds, the ticket is checked
/// against the latest generation; a mismatch means newer input exists and
/// the round resolves to `Superseded` without touching the results.
pub struct DebouncedLookup<F> {
    finder: Arc<F>,
    quiet_period: Duration,
    generation: AtomicU64,
}

impl<F: CandidateFinder> DebouncedLookup<F> {
    pub fn new(finder: Arc<F>, quiet_period: Duration) -> Self {
        Self {
            finder,
            quiet_period,
            generation: AtomicU64::new(0),
        }
    }

    pub fn from_config(finder: Arc<F>, config: &SearchConfig) -> Self {
        Self::new(finder, config.quiet_period())
    }

    pub async fn query(&self, text: &str) -> Result<LookupOutcome, StoreError> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        tokio::time::sleep(self.quiet_period).await;
        if self.generation.load(Ordering::SeqCst) != ticket {
            return Ok(LookupOutcome::Superseded);
        }

        let hits = self.finder.find(text)?;

        // Best-effort cancellation: the response may still arrive after a
        // newer query started, and must then be ignored.
        if self.generation.load(Ordering::SeqCst) != ticket {
            return Ok(LookupOutcome::Superseded);
        }

        Ok(LookupOutcome::Results(hits))
    }
}
