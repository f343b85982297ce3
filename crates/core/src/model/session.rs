use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::model::progress::GuessOutcome;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,
}

/// Aggregate summary of one tutoring session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    answered: u32,
    correct: u32,
    wrong: u32,
    newly_learned: u32,
}

impl SessionSummary {
    /// Build a summary from the guesses scored during the session.
    ///
    /// # Errors
    ///
    /// Returns `SessionSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    pub fn from_outcomes(
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        outcomes: &[GuessOutcome],
    ) -> Result<Self, SessionSummaryError> {
        if completed_at < started_at {
            return Err(SessionSummaryError::InvalidTimeRange);
        }

        let mut correct = 0_u32;
        let mut wrong = 0_u32;
        let mut newly_learned = 0_u32;
        for outcome in outcomes {
            match outcome {
                GuessOutcome::Correct => correct = correct.saturating_add(1),
                GuessOutcome::Learned => {
                    correct = correct.saturating_add(1);
                    newly_learned = newly_learned.saturating_add(1);
                }
                GuessOutcome::Wrong => wrong = wrong.saturating_add(1),
            }
        }

        Ok(Self {
            started_at,
            completed_at,
            answered: correct.saturating_add(wrong),
            correct,
            wrong,
            newly_learned,
        })
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.completed_at - self.started_at
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn wrong(&self) -> u32 {
        self.wrong
    }

    #[must_use]
    pub fn newly_learned(&self) -> u32 {
        self.newly_learned
    }
}
