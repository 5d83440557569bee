use clap::Parser;
use std::time::Duration;

use super::defaults::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_NUM_REQUESTS, DEFAULT_QPS, DEFAULT_TIMEOUT};
use super::parsers::{parse_bool_env, parse_duration_arg, parse_header, parse_qps};
use super::types::{ErrorRateBasis, HttpMethod, OutputFormat, Qps, TestType};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Rate-paced HTTP load tester: run a fixed number of requests at a target QPS, or a stress run that stops at the first failed request."
)]
pub struct TesterArgs {
    /// URL to test
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Number of requests to send (maximum attempts for a stress test)
    #[arg(long = "num-requests", short = 'n', default_value = DEFAULT_NUM_REQUESTS)]
    pub num_requests: u64,

    /// Queries per second
    #[arg(long = "qps", short = 'q', default_value = DEFAULT_QPS, value_parser = parse_qps)]
    pub qps: Qps,

    /// Type of test to run: 'load' for a fixed-volume run, 'stress' to stop at the first failure
    #[arg(long = "test-type", short = 't', value_enum, default_value = "load")]
    pub test_type: TestType,

    /// HTTP method to use
    #[arg(long, short = 'X', default_value = "get", ignore_case = true)]
    pub method: HttpMethod,

    /// HTTP headers in 'Key: Value' format (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Request body data (for POST/PUT/PATCH)
    #[arg(long, short, default_value = "")]
    pub data: String,

    /// Request timeout (supports ms/s/m/h)
    #[arg(long = "timeout", default_value = DEFAULT_TIMEOUT, value_parser = parse_duration_arg)]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = DEFAULT_CONNECT_TIMEOUT,
        value_parser = parse_duration_arg
    )]
    pub connect_timeout: Duration,

    /// Denominator for the stress test error rate: the configured maximum or the attempts made
    #[arg(long = "error-rate-basis", value_enum, default_value = "configured")]
    pub error_rate_basis: ErrorRateBasis,

    /// Report format
    #[arg(long = "output-format", value_enum, default_value = "text")]
    pub output_format: OutputFormat,

    /// Path to config file (TOML/JSON). Defaults to ./loadpace.toml or ./loadpace.json if present.
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by LOADPACE_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
