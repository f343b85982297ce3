#![forbid(unsafe_code)]

pub mod model;
pub mod time;
pub mod tracker;

pub use time::Clock;
pub use tracker::{ProgressStore, ProgressTracker};
