#![forbid(unsafe_code)]

pub mod error;
pub mod frontend;
pub mod tutor;
pub mod vm;

#[cfg(test)]
mod test_harness;

pub use error::FrontendError;
pub use frontend::{Frontend, KeysFrontend, PlainFrontend, ScreenFrontend};
pub use tutor::run_tutor;
