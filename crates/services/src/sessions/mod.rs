mod question;
mod service;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::TutorError;
pub use question::{COMMAND_NOTE, QuizQuestion, render_notes};
pub use service::TutorSession;
pub use workflow::{AnswerOutcome, SessionLoopService};
