use chrono::{DateTime, Utc};
use hotkeys_core::model::{ActionKey, GuessOutcome, LearningStats};
use hotkeys_core::tracker::ProgressTracker;

use crate::tutor_service::TutorService;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory state of one tutoring run.
///
/// Owns the catalog (through `TutorService`) and the progress tracker, and
/// remembers which question is waiting for an answer.
pub struct TutorSession {
    tutor: TutorService,
    tracker: ProgressTracker,
    pending: Option<ActionKey>,
    outcomes: Vec<GuessOutcome>,
    started_at: DateTime<Utc>,
}

impl TutorSession {
    /// `started_at` should come from the services layer clock to keep time deterministic.
    #[must_use]
    pub fn new(tutor: TutorService, tracker: ProgressTracker, started_at: DateTime<Utc>) -> Self {
        Self {
            tutor,
            tracker,
            pending: None,
            outcomes: Vec::new(),
            started_at,
        }
    }

    #[must_use]
    pub fn tutor(&self) -> &TutorService {
        &self.tutor
    }

    #[must_use]
    pub fn tracker(&self) -> &ProgressTracker {
        &self.tracker
    }

    pub(crate) fn tracker_mut(&mut self) -> &mut ProgressTracker {
        &mut self.tracker
    }

    #[must_use]
    pub fn app_name(&self) -> &str {
        self.tutor.catalog().app_name()
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Key of the question asked last and not answered yet.
    #[must_use]
    pub fn pending(&self) -> Option<&ActionKey> {
        self.pending.as_ref()
    }

    pub(crate) fn set_pending(&mut self, key: ActionKey) {
        self.pending = Some(key);
    }

    pub(crate) fn take_pending(&mut self) -> Option<ActionKey> {
        self.pending.take()
    }

    /// Drop the pending question without scoring it (help was requested).
    pub fn skip_pending(&mut self) -> Option<ActionKey> {
        self.pending.take()
    }

    pub(crate) fn record_outcome(&mut self, outcome: GuessOutcome) {
        self.outcomes.push(outcome);
    }

    /// Outcomes scored in this session, in order.
    #[must_use]
    pub fn outcomes(&self) -> &[GuessOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn all_learned(&self) -> bool {
        self.tracker.all_learned()
    }

    #[must_use]
    pub fn stats(&self) -> LearningStats {
        self.tracker.stats()
    }
}
