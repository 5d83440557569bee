use super::test_support::{ScriptedTransport, min_gap, run_paused, within};
use super::*;
use crate::args::{HttpMethod, TesterArgs};
use crate::error::{AppError, EngineError, HttpError, ValidationError};
use clap::Parser;
use std::time::Duration;
use tokio::time::Instant;

fn parse_args(argv: &[&str]) -> Result<TesterArgs, String> {
    TesterArgs::try_parse_from(argv).map_err(|err| format!("parse failed: {}", err))
}

#[test]
fn rate_limiter_rejects_non_positive_qps() -> Result<(), String> {
    for qps in [0.0, -1.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        match RateLimiter::new(qps) {
            Err(EngineError::InvalidConfiguration { .. }) => {}
            Err(err) => return Err(format!("Unexpected error for {}: {}", qps, err)),
            Ok(_) => return Err(format!("Expected qps {} to be rejected", qps)),
        }
    }
    Ok(())
}

#[test]
fn rate_limiter_rejects_qps_with_unrepresentable_interval() -> Result<(), String> {
    if RateLimiter::new(f64::MIN_POSITIVE).is_ok() {
        return Err("Expected a denormal qps to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn rate_limiter_interval_is_reciprocal_of_qps() -> Result<(), String> {
    let cases = [
        (1.0, Duration::from_secs(1)),
        (2.0, Duration::from_millis(500)),
        (4.0, Duration::from_millis(250)),
        (0.5, Duration::from_secs(2)),
    ];
    for (qps, expected) in cases {
        let limiter = RateLimiter::new(qps).map_err(|err| err.to_string())?;
        if limiter.interval() != expected {
            return Err(format!(
                "qps {}: expected {:?}, got {:?}",
                qps,
                expected,
                limiter.interval()
            ));
        }
    }
    Ok(())
}

#[test]
fn first_dispatch_is_not_delayed() -> Result<(), String> {
    run_paused(async {
        let mut limiter = RateLimiter::new(1.0).map_err(|err| err.to_string())?;
        let started = Instant::now();
        limiter.pace(async {}).await;
        if started.elapsed() != Duration::ZERO {
            return Err(format!("First dispatch waited {:?}", started.elapsed()));
        }
        Ok(())
    })
}

#[test]
fn consecutive_dispatches_are_spaced_by_interval() -> Result<(), String> {
    run_paused(async {
        let mut limiter = RateLimiter::new(4.0).map_err(|err| err.to_string())?;
        let mut marks = Vec::new();
        for _ in 0..5 {
            limiter.pace(async {}).await;
            marks.push(Instant::now());
        }
        let gap = min_gap(&marks).ok_or("Expected gaps")?;
        if gap < Duration::from_millis(245) {
            return Err(format!("Gap {:?} shorter than interval", gap));
        }
        Ok(())
    })
}

#[test]
fn interval_is_measured_from_dispatch_completion() -> Result<(), String> {
    run_paused(async {
        let mut limiter = RateLimiter::new(2.0).map_err(|err| err.to_string())?;
        let started = Instant::now();
        limiter
            .pace(tokio::time::sleep(Duration::from_millis(300)))
            .await;
        let second_start = limiter.pace(async { Instant::now() }).await;
        // completion at 300ms, plus a full 500ms interval
        let waited = second_start.duration_since(started);
        if !within(waited, Duration::from_millis(800)) {
            return Err(format!("Expected second dispatch at 800ms, got {:?}", waited));
        }
        Ok(())
    })
}

#[test]
fn throttle_does_not_sleep_once_interval_has_passed() -> Result<(), String> {
    run_paused(async {
        let mut limiter = RateLimiter::new(2.0).map_err(|err| err.to_string())?;
        limiter.mark_dispatched();
        tokio::time::sleep(Duration::from_secs(2)).await;
        let before = Instant::now();
        limiter.throttle().await;
        if before.elapsed() != Duration::ZERO {
            return Err(format!("Unexpected wait of {:?}", before.elapsed()));
        }
        Ok(())
    })
}

#[test]
fn throttled_timing_excludes_the_throttle_wait() -> Result<(), String> {
    run_paused(async {
        let limiter = RateLimiter::new(1.0).map_err(|err| err.to_string())?;
        let throttled = Throttled::new(
            ScriptedTransport::new(Duration::from_millis(100)),
            limiter,
        );
        let url = url::Url::parse("http://loadpace.test/").map_err(|err| err.to_string())?;
        let request = OutboundRequest::get(url);

        let started = Instant::now();
        let (first, _) = throttled.send_timed(&request).await;
        let (second, result) = throttled.send_timed(&request).await;
        if result.is_err() {
            return Err("Expected scripted success".to_owned());
        }
        if !within(first, Duration::from_millis(100)) || !within(second, Duration::from_millis(100)) {
            return Err(format!("Unexpected latencies {:?} / {:?}", first, second));
        }
        // 100ms send, 1s gap, 100ms send
        if !within(started.elapsed(), Duration::from_millis(1200)) {
            return Err(format!("Unexpected total {:?}", started.elapsed()));
        }
        let gap = min_gap(&throttled.inner().completions()).ok_or("Expected gaps")?;
        if gap < Duration::from_millis(995) {
            return Err(format!("Completion gap {:?} shorter than interval", gap));
        }
        Ok(())
    })
}

#[test]
fn build_request_uses_method_headers_and_body() -> Result<(), String> {
    let args = parse_args(&[
        "loadpace",
        "https://example.com/api",
        "-X",
        "POST",
        "-H",
        "X-Trace: abc",
        "-H",
        "Content-Type: application/json",
        "-d",
        "{\"k\":1}",
    ])?;
    let request = build_request(&args).map_err(|err| err.to_string())?;
    if request.method != HttpMethod::Post {
        return Err(format!("Unexpected method {:?}", request.method));
    }
    if request.url.as_str() != "https://example.com/api" {
        return Err(format!("Unexpected url {}", request.url));
    }
    if request.headers.get("x-trace").map(|v| v.as_bytes()) != Some(b"abc".as_slice()) {
        return Err("Missing X-Trace header".to_owned());
    }
    if request.body.as_deref() != Some("{\"k\":1}") {
        return Err(format!("Unexpected body {:?}", request.body));
    }
    Ok(())
}

#[test]
fn build_request_without_data_has_no_body() -> Result<(), String> {
    let args = parse_args(&["loadpace", "http://localhost:8080"])?;
    let request = build_request(&args).map_err(|err| err.to_string())?;
    if request.body.is_some() {
        return Err("Expected no body".to_owned());
    }
    if request.method != HttpMethod::Get {
        return Err("Expected GET".to_owned());
    }
    Ok(())
}

#[test]
fn build_request_requires_url() -> Result<(), String> {
    let args = parse_args(&["loadpace"])?;
    match build_request(&args) {
        Err(AppError::Validation(ValidationError::MissingUrl)) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected missing url error".to_owned()),
    }
}

#[test]
fn build_request_rejects_non_http_scheme() -> Result<(), String> {
    let args = parse_args(&["loadpace", "ftp://example.com/file"])?;
    match build_request(&args) {
        Err(AppError::Http(HttpError::UnsupportedScheme { scheme })) if scheme == "ftp" => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected scheme error".to_owned()),
    }
}

#[test]
fn build_request_rejects_invalid_url() -> Result<(), String> {
    let args = parse_args(&["loadpace", "not a url"])?;
    match build_request(&args) {
        Err(AppError::Http(HttpError::InvalidUrl { .. })) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected invalid url error".to_owned()),
    }
}

#[test]
fn build_request_rejects_invalid_header_name() -> Result<(), String> {
    let args = parse_args(&["loadpace", "http://localhost", "-H", "Bad Name: x"])?;
    match build_request(&args) {
        Err(AppError::Http(HttpError::InvalidHeaderName { header, .. })) if header == "Bad Name" => {
            Ok(())
        }
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected header error".to_owned()),
    }
}

#[test]
fn reqwest_transport_reports_connection_failure() -> Result<(), String> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(async {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")
            .map_err(|err| format!("bind failed: {}", err))?;
        let addr = listener
            .local_addr()
            .map_err(|err| format!("addr failed: {}", err))?;
        drop(listener);

        let args = parse_args(&["loadpace", &format!("http://{}", addr), "--timeout", "2s"])?;
        let transport = ReqwestTransport::from_args(&args).map_err(|err| err.to_string())?;
        let request = build_request(&args).map_err(|err| err.to_string())?;
        match transport.send(&request).await {
            Err(_) => Ok(()),
            Ok(response) => Err(format!("Expected failure, got {}", response.status)),
        }
    })
}
