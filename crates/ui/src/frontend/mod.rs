//! Front ends: how questions are shown and answers are read.

mod keys;
mod plain;
mod raw;
mod screen;

use hotkeys_core::model::{Answer, LearningStats};
use services::QuizQuestion;

use crate::error::FrontendError;

pub use keys::{KeyCollector, KeyInput, KeySource, TerminalKeys, map_key};
pub use plain::PlainFrontend;
pub use raw::KeysFrontend;
pub use screen::ScreenFrontend;

/// Visual role of a message; terminal front ends map it to a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Regular,
    Question,
    Success,
    Error,
    Statistics,
}

/// What the learner did at the answer prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnswerInput {
    Help,
    Exit,
    Answer(Answer),
}

/// Points in the loop where a front end may wait for the learner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pause {
    AfterHelp,
    AfterAnswer,
    BeforeExit,
}

/// A way of talking to the learner.
pub trait Frontend {
    /// Notes on how to type answers here, appended to the question notes.
    fn input_notes(&self, question: &QuizQuestion) -> Vec<String>;

    /// # Errors
    ///
    /// Returns `FrontendError::Terminal` if output fails.
    fn show_stats(&mut self, stats: &LearningStats) -> Result<(), FrontendError>;

    /// Start a new question screen.
    ///
    /// # Errors
    ///
    /// Returns `FrontendError::Terminal` if output fails.
    fn show_question(&mut self, text: &str) -> Result<(), FrontendError>;

    /// # Errors
    ///
    /// Returns `FrontendError::Terminal` if output fails.
    fn show_message(&mut self, text: &str, tone: Tone) -> Result<(), FrontendError>;

    /// Read one answer. Closed input reads as `AnswerInput::Exit`.
    ///
    /// # Errors
    ///
    /// Returns `FrontendError::Terminal` if input fails.
    fn read_answer(&mut self) -> Result<AnswerInput, FrontendError>;

    /// Show `prompt` and read a short reply. `None` when input is closed.
    ///
    /// # Errors
    ///
    /// Returns `FrontendError::Terminal` if input fails.
    fn read_choice(&mut self, prompt: &str) -> Result<Option<String>, FrontendError>;

    /// # Errors
    ///
    /// Returns `FrontendError::Terminal` if input fails.
    fn pause(&mut self, _at: Pause) -> Result<(), FrontendError> {
        Ok(())
    }
}

/// Hint shared by the keystroke front ends.
pub const KEYS_NOTE: &str = "Type keys combination or \"Ctrl+h\" for help or \"Ctrl+e\" to quit";

/// Status line of the keystroke front ends.
pub const STATUS_BAR: &str = "Press \"Ctrl+e\" to exit or \"Ctrl+h\" for help";
