mod session_summary_vm;
mod time_fmt;

pub use session_summary_vm::SessionSummaryVm;
pub use time_fmt::{format_datetime, format_duration};
