use std::sync::Arc;

use hotkeys_core::model::{ActionKey, Answer, CatalogError, GuessOutcome, LearningStats, SessionSummary};
use hotkeys_core::tracker::ProgressTracker;
use storage::repository::{CatalogSource, ProgressRepository, Storage};
use tracing::{debug, info, warn};

use crate::Clock;
use crate::error::TutorError;
use crate::tutor_service::TutorService;

use super::question::QuizQuestion;
use super::service::TutorSession;

/// Result of answering the pending question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub key: ActionKey,
    pub outcome: GuessOutcome,
    /// Accepted hotkeys, quoted and joined with `or`.
    pub correct_answers: String,
    /// Help line for the action, shown on request after a wrong answer.
    pub help: String,
    pub stats: LearningStats,
    pub all_learned: bool,
}

impl AnswerOutcome {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.outcome.is_correct()
    }
}

/// Orchestrates session start, question selection and persisted answering.
#[derive(Clone)]
pub struct SessionLoopService {
    clock: Clock,
    catalog: Arc<dyn CatalogSource>,
    progress: Arc<dyn ProgressRepository>,
    seed: Option<u64>,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<dyn CatalogSource>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            catalog,
            progress,
            seed: None,
        }
    }

    #[must_use]
    pub fn from_storage(clock: Clock, storage: &Storage) -> Self {
        Self::new(
            clock,
            Arc::clone(&storage.catalog),
            Arc::clone(&storage.progress),
        )
    }

    /// Seed question selection (deterministic order in tests).
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load the catalog and progress, and add empty records for new actions.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::Storage` if either source cannot be loaded.
    pub async fn start_session(&self) -> Result<TutorSession, TutorError> {
        let catalog = self.catalog.load_catalog().await?;
        let store = self.progress.load_progress().await?;

        let mut tracker = ProgressTracker::new(store);
        if let Some(seed) = self.seed {
            tracker = tracker.with_seed(seed);
        }
        tracker.reconcile(catalog.keys());

        info!(
            app = catalog.app_name(),
            actions = catalog.len(),
            learned = tracker.learned_count(),
            "session started"
        );
        Ok(TutorSession::new(
            TutorService::new(catalog),
            tracker,
            self.clock.now(),
        ))
    }

    /// Persist the session's progress store.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::Storage` if the store cannot be written.
    pub async fn save(&self, session: &TutorSession) -> Result<(), TutorError> {
        self.progress.save_progress(session.tracker().store()).await?;
        Ok(())
    }

    /// Pick the next question, or `None` once nothing is left to learn.
    ///
    /// Records whose action the catalog no longer has are dropped and the
    /// draw is repeated.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::Catalog` only for lookups that fail for another reason.
    pub fn next_question(&self, session: &mut TutorSession) -> Result<Option<QuizQuestion>, TutorError> {
        if session.all_learned() {
            return Ok(None);
        }
        loop {
            let Some(key) = session.tracker_mut().next_quiz_key() else {
                return Ok(None);
            };
            match session.tutor().question_for(&key) {
                Ok(question) => {
                    debug!(key = %key, "question picked");
                    session.set_pending(key);
                    return Ok(Some(question));
                }
                Err(CatalogError::NotFound { .. }) => {
                    warn!(key = %key, "dropping progress for action missing from catalog");
                    session.tracker_mut().remove_record(key.as_str());
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Help line for the pending question. The question stays pending until
    /// skipped or answered.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::NoPendingQuestion` if no question was asked.
    pub fn help_for_pending(&self, session: &TutorSession) -> Result<String, TutorError> {
        let key = session.pending().ok_or(TutorError::NoPendingQuestion)?;
        Ok(session.tutor().help_text(key)?)
    }

    /// Score `answer` against the pending question and save progress.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::NoPendingQuestion` if no question was asked, or
    /// `TutorError::Storage` if the progress cannot be saved. The guess is
    /// already scored in memory when a save fails.
    pub async fn answer(
        &self,
        session: &mut TutorSession,
        answer: &Answer,
    ) -> Result<AnswerOutcome, TutorError> {
        let key = session.take_pending().ok_or(TutorError::NoPendingQuestion)?;
        let is_correct = session.tutor().check_answer(&key, answer)?;
        let correct_answers = session.tutor().correct_answers(&key)?;
        let help = session.tutor().help_text(&key)?;

        let outcome = session.tracker_mut().score(&key, is_correct);
        session.record_outcome(outcome);
        debug!(key = %key, answer = %answer, ?outcome, "answer scored");
        if outcome == GuessOutcome::Learned {
            info!(key = %key, "action learned");
        }

        self.save(session).await?;

        Ok(AnswerOutcome {
            key,
            outcome,
            correct_answers,
            help,
            stats: session.stats(),
            all_learned: session.all_learned(),
        })
    }

    /// Summarize the session up to now.
    ///
    /// # Errors
    ///
    /// Returns `TutorError::Summary` if the clock went backwards.
    pub fn finish(&self, session: &TutorSession) -> Result<SessionSummary, TutorError> {
        let summary =
            SessionSummary::from_outcomes(session.started_at(), self.clock.now(), session.outcomes())?;
        info!(
            answered = summary.answered(),
            correct = summary.correct(),
            learned = summary.newly_learned(),
            "session finished"
        );
        Ok(summary)
    }
}
