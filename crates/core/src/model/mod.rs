mod action;
mod answer;
mod catalog;
mod ids;
mod progress;
mod session;
mod stats;

pub use ids::{ActionKey, ParseIdError};

pub use action::{Action, ActionError, AnswerKind};
pub use answer::{Answer, AnswerToken};
pub use catalog::{Catalog, CatalogError};
pub use progress::{GuessOutcome, LEARN_THRESHOLD, ProgressRecord};
pub use session::{SessionSummary, SessionSummaryError};
pub use stats::LearningStats;
