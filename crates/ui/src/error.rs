use services::TutorError;
use thiserror::Error;

/// Errors raised while driving a front end.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FrontendError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] std::io::Error),
    #[error(transparent)]
    Tutor(#[from] TutorError),
}
