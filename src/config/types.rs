use serde::Deserialize;

use crate::args::{ErrorRateBasis, HttpMethod, OutputFormat, TestType};

/// Values accepted in `loadpace.toml` / `loadpace.json`. Every field is
/// optional; anything also given on the command line is ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub url: Option<String>,
    #[serde(alias = "requests")]
    pub num_requests: Option<u64>,
    pub qps: Option<f64>,
    pub test_type: Option<TestType>,
    pub method: Option<HttpMethod>,
    pub headers: Option<Vec<String>>,
    pub data: Option<String>,
    pub timeout: Option<DurationValue>,
    pub connect_timeout: Option<DurationValue>,
    pub error_rate_basis: Option<ErrorRateBasis>,
    pub output_format: Option<OutputFormat>,
    pub verbose: Option<bool>,
}

/// A duration written either as whole seconds or as text with a unit
/// (`"250ms"`, `"10s"`, `"2m"`).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}
