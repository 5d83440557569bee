use std::time::Duration;

use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{Qps, TesterArgs, parse_duration_arg, parse_header};
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

use super::types::{ConfigFile, DurationValue};

/// Applies configuration values to CLI arguments. Values passed on the
/// command line always win.
///
/// # Errors
///
/// Returns an error when a config value is invalid.
pub fn apply_config(
    args: &mut TesterArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "num_requests")
        && let Some(num_requests) = config.num_requests
    {
        args.num_requests = num_requests;
    }

    if !is_cli(matches, "qps")
        && let Some(qps) = config.qps
    {
        args.qps = Qps::try_from(qps).map_err(|err| invalid_field("qps", err))?;
    }

    if !is_cli(matches, "test_type")
        && let Some(test_type) = config.test_type
    {
        args.test_type = test_type;
    }

    if !is_cli(matches, "method")
        && let Some(method) = config.method
    {
        args.method = method;
    }

    if !is_cli(matches, "headers")
        && let Some(headers) = config.headers.as_ref()
    {
        let mut parsed = Vec::with_capacity(headers.len());
        for header in headers {
            parsed.push(parse_header(header).map_err(|err| {
                AppError::config(ConfigError::InvalidHeader { source: err })
            })?);
        }
        args.headers = parsed;
    }

    if !is_cli(matches, "data")
        && let Some(data) = config.data.clone()
    {
        args.data = data;
    }

    if !is_cli(matches, "request_timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.request_timeout = duration_field(timeout, "timeout")?;
    }

    if !is_cli(matches, "connect_timeout")
        && let Some(timeout) = config.connect_timeout.as_ref()
    {
        args.connect_timeout = duration_field(timeout, "connect_timeout")?;
    }

    if !is_cli(matches, "error_rate_basis")
        && let Some(basis) = config.error_rate_basis
    {
        args.error_rate_basis = basis;
    }

    if !is_cli(matches, "output_format")
        && let Some(format) = config.output_format
    {
        args.output_format = format;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn duration_field(value: &DurationValue, field: &'static str) -> AppResult<Duration> {
    match value {
        DurationValue::Seconds(0) => Err(invalid_field(field, ValidationError::DurationZero)),
        DurationValue::Seconds(secs) => Ok(Duration::from_secs(*secs)),
        DurationValue::Text(text) => {
            parse_duration_arg(text).map_err(|err| invalid_field(field, err))
        }
    }
}

fn invalid_field(field: &'static str, source: ValidationError) -> AppError {
    AppError::config(ConfigError::InvalidField { field, source })
}
