//! Per-request outcomes, session accumulators, and run reports.
mod format;
mod histogram;
mod outcome;
mod report;
mod stats;


pub use format::{format_percent_x100, format_secs, rate_x100};
pub use histogram::{LatencyHistogram, LatencyPercentiles};
pub use outcome::RequestOutcome;
pub use report::{RunReport, TestKind};
pub use stats::SessionStats;
