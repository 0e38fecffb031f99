//! Query cycle and interactive session.

pub mod report;
pub mod session;

pub use report::{CycleReport, Extraction, ReportCommand};
pub use session::{Console, RepeatChoice, Session};
