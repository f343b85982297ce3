use std::fmt;

/// Aggregate counters over the progress store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LearningStats {
    pub total: usize,
    pub learned: usize,
    pub in_process: usize,
    pub guesses: u64,
    pub errors: u64,
}

impl LearningStats {
    #[must_use]
    pub fn to_learn(&self) -> usize {
        self.total.saturating_sub(self.learned)
    }

    /// Lines rendered by the front ends, joined with ", " for a single-line view.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("{} action(s) learned", self.learned),
            format!("{} in process", self.in_process),
            format!("{} guess(es)", self.guesses),
            format!("{} error guess(es)", self.errors),
            format!("{} action(s) left to learn", self.to_learn()),
            format!("{} action(s) total to learn", self.total),
        ]
    }
}

impl fmt::Display for LearningStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join(", "))
    }
}
