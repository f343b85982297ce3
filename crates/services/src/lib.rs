#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;
pub mod tutor_service;

pub use hotkeys_core::Clock;
pub use sessions as session;

pub use error::TutorError;
pub use tutor_service::TutorService;

pub use sessions::{AnswerOutcome, QuizQuestion, SessionLoopService, TutorSession};
