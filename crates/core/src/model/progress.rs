use serde::{Deserialize, Serialize};

/// Consecutive correct answers needed before an action counts as learned.
pub const LEARN_THRESHOLD: u32 = 3;

/// Result of scoring one guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    Correct,
    /// Correct, and this guess crossed the learn threshold.
    Learned,
    Wrong,
}

impl GuessOutcome {
    #[must_use]
    pub fn is_correct(self) -> bool {
        !matches!(self, GuessOutcome::Wrong)
    }
}

/// Per-action learning state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub guess_count: u32,
    pub correct_streak: u32,
    pub error_count: u32,
    pub learned: bool,
}

impl ProgressRecord {
    /// Applies one scored guess.
    ///
    /// A correct guess grows the streak; reaching `LEARN_THRESHOLD` marks the
    /// record learned for good. A wrong guess leaks one point off the streak
    /// (never below zero) instead of resetting it.
    pub fn score(&mut self, is_correct: bool) -> GuessOutcome {
        self.guess_count = self.guess_count.saturating_add(1);

        if !is_correct {
            self.correct_streak = self.correct_streak.saturating_sub(1);
            self.error_count = self.error_count.saturating_add(1);
            return GuessOutcome::Wrong;
        }

        self.correct_streak = (self.correct_streak + 1).min(LEARN_THRESHOLD);
        if self.correct_streak >= LEARN_THRESHOLD && !self.learned {
            self.learned = true;
            return GuessOutcome::Learned;
        }
        GuessOutcome::Correct
    }

    pub fn mark_learned(&mut self) {
        self.learned = true;
    }

    /// Guessed at least once but not learned yet.
    #[must_use]
    pub fn in_process(&self) -> bool {
        self.guess_count > 0 && !self.learned
    }
}
