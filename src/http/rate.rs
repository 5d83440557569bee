use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::trace;

use super::transport::{OutboundRequest, Transport, TransportResponse};
use crate::error::{EngineError, TransportError};
use crate::timing::timed;

/// Keeps successive dispatches at least `1/qps` apart.
///
/// The gap is measured from the completion of one dispatch to the start of
/// the next, so slow responses lower the achieved rate below `qps` rather
/// than causing bursts. The first dispatch is never delayed.
///
/// Not synchronized on its own; share it through [`Throttled`], which
/// serializes access.
#[derive(Debug)]
pub struct RateLimiter {
    interval: Duration,
    last_dispatch: Option<Instant>,
}

impl RateLimiter {
    /// Creates a limiter for the given queries-per-second target.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfiguration`] when `qps` is not a
    /// finite number greater than zero, or is so small that `1/qps` does not
    /// fit in a [`Duration`].
    pub fn new(qps: f64) -> Result<Self, EngineError> {
        if !qps.is_finite() || qps <= 0.0 {
            return Err(EngineError::invalid(format!(
                "QPS must be a finite number > 0, got {}",
                qps
            )));
        }
        let interval = Duration::try_from_secs_f64(qps.recip()).map_err(|err| {
            EngineError::invalid(format!("QPS {} gives an unusable interval: {}", qps, err))
        })?;
        Ok(Self {
            interval,
            last_dispatch: None,
        })
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Sleeps until a full interval has passed since the last completed
    /// dispatch. Returns immediately if no dispatch has completed yet.
    pub async fn throttle(&self) {
        let Some(last) = self.last_dispatch else {
            return;
        };
        if let Some(remaining) = self.interval.checked_sub(last.elapsed())
            && !remaining.is_zero()
        {
            trace!("throttling for {:?}", remaining);
            sleep(remaining).await;
        }
    }

    /// Records "now" as the completion of the latest dispatch.
    pub fn mark_dispatched(&mut self) {
        self.last_dispatch = Some(Instant::now());
    }

    /// Throttles, runs `dispatch`, then marks it complete regardless of its
    /// outcome.
    pub async fn pace<F>(&mut self, dispatch: F) -> F::Output
    where
        F: Future,
    {
        self.throttle().await;
        let output = dispatch.await;
        self.mark_dispatched();
        output
    }
}

/// Transport decorator that routes every send through a [`RateLimiter`].
///
/// The limiter lock is held for throttle, send, and completion marking, so
/// callers sharing one `Throttled` are serialized and the pacing gap holds
/// between all of them.
#[derive(Debug)]
pub struct Throttled<T> {
    inner: T,
    limiter: Mutex<RateLimiter>,
}

impl<T> Throttled<T>
where
    T: Transport,
{
    #[must_use]
    pub fn new(inner: T, limiter: RateLimiter) -> Self {
        Self {
            inner,
            limiter: Mutex::new(limiter),
        }
    }

    #[must_use]
    pub const fn inner(&self) -> &T {
        &self.inner
    }

    /// Sends through the limiter and returns the time spent in the inner
    /// transport only; the throttle wait is excluded.
    pub async fn send_timed(
        &self,
        request: &OutboundRequest,
    ) -> (Duration, Result<TransportResponse, TransportError>) {
        let mut limiter = self.limiter.lock().await;
        limiter.pace(timed(self.inner.send(request))).await
    }
}

#[async_trait]
impl<T> Transport for Throttled<T>
where
    T: Transport,
{
    async fn send(&self, request: &OutboundRequest) -> Result<TransportResponse, TransportError> {
        let (_, result) = self.send_timed(request).await;
        result
    }
}
