use hotkeys_core::model::SessionSummary;

use crate::vm::time_fmt::{format_datetime, format_duration};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionSummaryVm {
    pub started_at_str: String,
    pub duration_str: String,

    pub answered: u32,
    pub correct: u32,
    pub wrong: u32,
    pub newly_learned: u32,
}

impl From<&SessionSummary> for SessionSummaryVm {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            started_at_str: format_datetime(summary.started_at()),
            duration_str: format_duration(summary.duration()),
            answered: summary.answered(),
            correct: summary.correct(),
            wrong: summary.wrong(),
            newly_learned: summary.newly_learned(),
        }
    }
}

impl SessionSummaryVm {
    /// Lines printed when the tutor exits.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        if self.answered == 0 {
            return vec![format!(
                "Session started {} ({}), no answers given",
                self.started_at_str, self.duration_str
            )];
        }
        vec![
            format!(
                "Session started {} ({})",
                self.started_at_str, self.duration_str
            ),
            format!(
                "{} answer(s): {} correct, {} wrong, {} action(s) learned",
                self.answered, self.correct, self.wrong, self.newly_learned
            ),
        ]
    }
}
