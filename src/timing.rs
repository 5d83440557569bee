use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

/// Awaits `operation` and returns how long it took alongside its output.
pub async fn timed<F>(operation: F) -> (Duration, F::Output)
where
    F: Future,
{
    let started = Instant::now();
    let output = operation.await;
    (started.elapsed(), output)
}
