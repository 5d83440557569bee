//! Outbound HTTP: the transport seam, the QPS throttle, and the reqwest client.
mod client;
mod rate;
mod transport;

#[cfg(test)]
pub(crate) mod test_support;
#[cfg(test)]
mod tests;

pub use client::{ReqwestTransport, build_request};
pub(crate) use client::parse_target_url;
pub use rate::{RateLimiter, Throttled};
pub use transport::{OutboundRequest, Transport, TransportResponse};
