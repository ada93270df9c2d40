//! Async event loop for an [`Engine`].
//!
//! Sleeps until the next timer deadline, polls, and repeats. Meant for a
//! current-thread tokio runtime so ticks keep run-to-completion semantics.

use std::future::Future;

use crate::engine::Engine;

/// Drive `engine` until `shutdown` resolves or no chain is left pending.
///
/// Always leaves the engine stopped.
pub async fn run_until_stopped<F>(engine: &mut Engine, shutdown: F)
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        let Some(wait) = engine.time_until_next_deadline() else {
            tracing::debug!("no pending ticks, driver exiting");
            break;
        };
        tokio::select! {
            biased;
            () = &mut shutdown => {
                tracing::debug!("shutdown requested");
                break;
            }
            () = tokio::time::sleep(wait) => engine.poll(),
        }
    }
    engine.stop();
}
