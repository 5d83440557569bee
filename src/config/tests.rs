use super::{apply_config, load_config_file, types::ConfigFile};
use clap::{CommandFactory, FromArgMatches};
use std::time::Duration;
use tempfile::tempdir;

use crate::args::{ErrorRateBasis, HttpMethod, OutputFormat, TestType, TesterArgs};
use crate::error::{AppError, ConfigError};

fn parse_with_config(argv: &[&str], config: &ConfigFile) -> Result<TesterArgs, String> {
    let matches = TesterArgs::command()
        .try_get_matches_from(argv)
        .map_err(|err| format!("parse failed: {}", err))?;
    let mut args =
        TesterArgs::from_arg_matches(&matches).map_err(|err| format!("args failed: {}", err))?;
    apply_config(&mut args, &matches, config).map_err(|err| err.to_string())?;
    Ok(args)
}

#[test]
fn parse_toml_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadpace.toml");
    let content = r#"
url = "http://localhost:3000/health"
num_requests = 25
qps = 2.5
test_type = "stress"
method = "post"
headers = ["Accept: application/json"]
timeout = "750ms"
connect_timeout = 3
error_rate_basis = "attempted"
"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let args = parse_with_config(&["loadpace"], &config)?;

    let checks = [
        (
            args.url.as_deref() == Some("http://localhost:3000/health"),
            "url",
        ),
        (args.num_requests == 25, "num_requests"),
        (args.qps.get().to_bits() == 2.5f64.to_bits(), "qps"),
        (args.test_type == TestType::Stress, "test_type"),
        (args.method == HttpMethod::Post, "method"),
        (
            args.headers == [("Accept".to_owned(), "application/json".to_owned())],
            "headers",
        ),
        (args.request_timeout == Duration::from_millis(750), "timeout"),
        (args.connect_timeout == Duration::from_secs(3), "connect_timeout"),
        (
            args.error_rate_basis == ErrorRateBasis::Attempted,
            "error_rate_basis",
        ),
    ];
    for (ok, field) in checks {
        if !ok {
            return Err(format!("Unexpected {}", field));
        }
    }
    Ok(())
}

#[test]
fn parse_json_config() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadpace.json");
    let content = r#"{
  "url": "https://example.com",
  "requests": 3,
  "output_format": "json",
  "data": "payload"
}"#;
    std::fs::write(&path, content).map_err(|err| format!("write failed: {}", err))?;

    let config = load_config_file(&path).map_err(|err| err.to_string())?;
    let args = parse_with_config(&["loadpace"], &config)?;
    if args.num_requests != 3 || args.output_format != OutputFormat::Json || args.data != "payload"
    {
        return Err(format!("Unexpected args {:?}", args));
    }
    Ok(())
}

#[test]
fn cli_values_override_config() -> Result<(), String> {
    let config = ConfigFile {
        url: Some("http://config.test".to_owned()),
        num_requests: Some(99),
        qps: Some(7.0),
        test_type: Some(TestType::Stress),
        ..ConfigFile::default()
    };
    let args = parse_with_config(
        &[
            "loadpace",
            "http://cli.test",
            "--num-requests",
            "4",
            "--test-type",
            "load",
        ],
        &config,
    )?;

    if args.url.as_deref() != Some("http://cli.test") {
        return Err("CLI url should win".to_owned());
    }
    if args.num_requests != 4 || args.test_type != TestType::Load {
        return Err(format!("CLI values should win: {:?}", args));
    }
    // not on the command line, so the config value applies
    if args.qps.get().to_bits() != 7.0f64.to_bits() {
        return Err("Expected config qps".to_owned());
    }
    Ok(())
}

#[test]
fn config_rejects_non_positive_qps() -> Result<(), String> {
    let config = ConfigFile {
        qps: Some(0.0),
        ..ConfigFile::default()
    };
    match parse_with_config(&["loadpace", "http://localhost"], &config) {
        Err(message) if message.contains("qps") => Ok(()),
        Err(message) => Err(format!("Unexpected error: {}", message)),
        Ok(_) => Err("Expected qps error".to_owned()),
    }
}

#[test]
fn config_rejects_bad_header() -> Result<(), String> {
    let config = ConfigFile {
        headers: Some(vec!["no-colon".to_owned()]),
        ..ConfigFile::default()
    };
    if parse_with_config(&["loadpace", "http://localhost"], &config).is_ok() {
        return Err("Expected header error".to_owned());
    }
    Ok(())
}

#[test]
fn config_rejects_unknown_extension() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadpace.yaml");
    std::fs::write(&path, "url: x").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::UnsupportedExtension { ext })) if ext == "yaml" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected extension error".to_owned()),
    }
}

#[test]
fn config_reports_parse_errors() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = dir.path().join("loadpace.toml");
    std::fs::write(&path, "qps = \"fast\"").map_err(|err| format!("write failed: {}", err))?;
    match load_config_file(&path) {
        Err(AppError::Config(ConfigError::ParseToml { .. })) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected TOML error".to_owned()),
    }
}
