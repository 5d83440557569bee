use std::collections::BTreeSet;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{Instant, sleep};
use url::Url;

use super::transport::{OutboundRequest, Transport, TransportResponse};
use crate::error::TransportError;

/// In-memory transport: answers after a fixed simulated latency and fails the
/// calls whose one-based numbers are listed in `fail_on`.
pub(crate) struct ScriptedTransport {
    latency: Duration,
    status: u16,
    fail_on: BTreeSet<u64>,
    calls: AtomicU64,
    completions: Mutex<Vec<Instant>>,
    urls: Mutex<Vec<Url>>,
}

impl ScriptedTransport {
    pub(crate) fn new(latency: Duration) -> Self {
        Self {
            latency,
            status: 200,
            fail_on: BTreeSet::new(),
            calls: AtomicU64::new(0),
            completions: Mutex::new(Vec::new()),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn failing_on<I>(mut self, calls: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        self.fail_on.extend(calls);
        self
    }

    pub(crate) fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub(crate) fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn completions(&self) -> Vec<Instant> {
        self.completions
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub(crate) fn urls(&self) -> Vec<Url> {
        self.urls
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        if let Ok(mut urls) = self.urls.lock() {
            urls.push(request.url.clone());
        }
        sleep(self.latency).await;
        if let Ok(mut completions) = self.completions.lock() {
            completions.push(Instant::now());
        }
        if self.fail_on.contains(&call) {
            return Err(TransportError::Connect {
                message: format!("scripted failure on call {}", call),
            });
        }
        Ok(TransportResponse {
            status: self.status,
            body_bytes: 2,
        })
    }
}

/// Runs `future` on a current-thread runtime whose clock starts paused, so
/// sleeps complete instantly in virtual time and elapsed times are exact.
pub(crate) fn run_paused<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .start_paused(true)
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

/// Smallest gap between consecutive instants.
pub(crate) fn min_gap(instants: &[Instant]) -> Option<Duration> {
    instants
        .windows(2)
        .filter_map(|pair| match pair {
            [earlier, later] => Some(later.duration_since(*earlier)),
            _ => None,
        })
        .min()
}

/// True when `actual` is `expected` give or take timer-wheel rounding.
pub(crate) fn within(actual: Duration, expected: Duration) -> bool {
    let slack = Duration::from_millis(5);
    actual >= expected.saturating_sub(slack) && actual <= expected.saturating_add(slack)
}
