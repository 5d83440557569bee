//! Core library for the `loadpace` CLI.
//!
//! The engine sends requests to one target strictly one at a time, paced so
//! that consecutive requests complete at least `1/qps` apart, and reports
//! elapsed time, mean latency, error rate, and successful request count.
//! Two drive strategies are provided: a fixed-volume load test and a stress
//! test that stops at the first request that gets no response.
//!
//! Library callers can attach [`engine::Behavior`] hooks that run before
//! every timed request, for example to walk a multi-step user session
//! through the same rate-limited transport.
pub mod args;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod metrics;
pub mod timing;

mod entry;
mod logger;

pub use entry::run;
