use std::time::Duration;

use serde::Serialize;

use super::format::{format_percent_x100, format_secs};
use super::histogram::LatencyPercentiles;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Load,
    Stress,
}

impl TestKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TestKind::Load => "load",
            TestKind::Stress => "stress",
        }
    }
}

/// Aggregate result of one drive call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub kind: TestKind,
    pub elapsed: Duration,
    pub average_latency: Duration,
    /// Hundredths of a percent: 7_000 is 70.00%.
    pub error_rate_x100: u64,
    pub successful: u64,
    /// Denominator printed in the "out of" line.
    pub total: u64,
    pub attempted: u64,
    /// Attempt number of the first failure, stress runs only.
    pub failed_at: Option<u64>,
    pub percentiles: LatencyPercentiles,
}

#[derive(Serialize)]
struct ReportJson<'a> {
    test_type: &'a str,
    elapsed_secs: String,
    average_latency_secs: String,
    error_rate: String,
    successful_requests: u64,
    total_requests: u64,
    attempted_requests: u64,
    failed_at: Option<u64>,
    latency_percentiles_us: LatencyPercentiles,
}

impl RunReport {
    /// The four summary lines, in output order.
    #[must_use]
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Total time taken: {}s", format_secs(self.elapsed)),
            format!("Average latency: {}s", format_secs(self.average_latency)),
            format!("Error rate: {}", format_percent_x100(self.error_rate_x100)),
            format!(
                "{} successful requests out of {}",
                self.successful, self.total
            ),
        ]
    }

    pub fn print(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }

    /// Serializes the report as a single JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&ReportJson {
            test_type: self.kind.label(),
            elapsed_secs: format_secs(self.elapsed),
            average_latency_secs: format_secs(self.average_latency),
            error_rate: format_percent_x100(self.error_rate_x100),
            successful_requests: self.successful,
            total_requests: self.total,
            attempted_requests: self.attempted,
            failed_at: self.failed_at,
            latency_percentiles_us: self.percentiles,
        })
    }
}
