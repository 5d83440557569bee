use async_trait::async_trait;
use url::Url;

use crate::error::{HookError, TransportError};
use crate::http::{OutboundRequest, Transport, TransportResponse};

/// What a behavior hook can see and use while it runs.
///
/// Requests sent through the context share the engine's rate limiter, so a
/// hook that performs its own requests is paced together with the timed ones.
pub struct HookContext<'a> {
    iteration: u64,
    target: &'a Url,
    transport: &'a dyn Transport,
}

impl<'a> HookContext<'a> {
    pub(crate) fn new(iteration: u64, target: &'a Url, transport: &'a dyn Transport) -> Self {
        Self {
            iteration,
            target,
            transport,
        }
    }

    /// One-based iteration number the hook runs before.
    #[must_use]
    pub const fn iteration(&self) -> u64 {
        self.iteration
    }

    #[must_use]
    pub const fn target(&self) -> &Url {
        self.target
    }

    /// Sends an arbitrary request through the rate-limited transport.
    ///
    /// # Errors
    ///
    /// Returns the transport error when no response was obtained.
    pub async fn send(
        &self,
        request: &OutboundRequest,
    ) -> Result<TransportResponse, TransportError> {
        self.transport.send(request).await
    }

    /// Issues a GET for `reference`, resolved against the target URL
    /// (e.g. `"/search?q=rust"`).
    ///
    /// # Errors
    ///
    /// Returns an error when the reference cannot be joined to the target or
    /// the request gets no response.
    pub async fn get(&self, reference: &str) -> Result<TransportResponse, HookError> {
        let url = self
            .target
            .join(reference)
            .map_err(|err| HookError::Message(format!("Invalid hook URL '{}': {}", reference, err)))?;
        Ok(self.transport.send(&OutboundRequest::get(url)).await?)
    }
}

/// Caller-defined step run before every timed request.
///
/// Errors are not absorbed by the engine: the first failing hook aborts the
/// drive call and no report is produced.
#[async_trait]
pub trait Behavior: Send + Sync {
    async fn execute(&self, ctx: &HookContext<'_>) -> Result<(), HookError>;
}

/// Plain closures work as hooks when they need no access to the transport.
#[async_trait]
impl<F> Behavior for F
where
    F: Fn() -> Result<(), HookError> + Send + Sync,
{
    async fn execute(&self, _ctx: &HookContext<'_>) -> Result<(), HookError> {
        self()
    }
}
