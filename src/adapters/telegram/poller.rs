//! Long-polling transport.
//!
//! Pulls updates with `getUpdates` and spawns one task per update. A failed
//! poll is logged and followed by a short pause; it never stops the loop.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use super::bot_api::TelegramBotApi;
use super::update_router::UpdateRouter;
use super::wire_types::Update;

/// Pause after a failed poll before asking again.
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(3);

/// Drives `getUpdates` until shutdown.
pub struct UpdatePoller {
    api: Arc<TelegramBotApi>,
    router: Arc<UpdateRouter>,
    poll_timeout: Duration,
}

impl UpdatePoller {
    pub fn new(api: Arc<TelegramBotApi>, router: Arc<UpdateRouter>, poll_timeout: Duration) -> Self {
        Self {
            api,
            router,
            poll_timeout,
        }
    }

    /// Polls until `shutdown` resolves.
    pub async fn run(self, shutdown: impl Future<Output = ()>) {
        tokio::pin!(shutdown);
        let mut offset: Option<i64> = None;

        tracing::info!(poll_timeout_secs = self.poll_timeout.as_secs(), "update poller started");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("shutdown requested, update poller stopping");
                    return;
                }
                polled = self.api.get_updates(offset, self.poll_timeout) => match polled {
                    Ok(updates) => {
                        offset = next_offset(offset, &updates);
                        for update in updates {
                            self.router.spawn(update);
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "getUpdates failed");
                        if pause_unless_shutdown(shutdown.as_mut(), POLL_ERROR_PAUSE).await {
                            tracing::info!("shutdown requested, update poller stopping");
                            return;
                        }
                    }
                }
            }
        }
    }
}

/// Sleeps for `pause`. Returns true if shutdown was requested meanwhile.
async fn pause_unless_shutdown<F>(shutdown: Pin<&mut F>, pause: Duration) -> bool
where
    F: Future<Output = ()>,
{
    tokio::select! {
        _ = shutdown => true,
        _ = tokio::time::sleep(pause) => false,
    }
}

/// Offset confirming every update in the batch, so none is delivered twice.
fn next_offset(current: Option<i64>, updates: &[Update]) -> Option<i64> {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .max(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn updates(ids: &[i64]) -> Vec<Update> {
        ids.iter()
            .map(|id| serde_json::from_value(serde_json::json!({"update_id": id})).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn shutdown_cuts_error_pause_short() {
        let shutdown = std::future::ready(());
        tokio::pin!(shutdown);

        let stopped = tokio::time::timeout(
            Duration::from_secs(1),
            pause_unless_shutdown(shutdown.as_mut(), Duration::from_secs(60)),
        )
        .await;

        assert_eq!(stopped, Ok(true));
    }

    #[tokio::test]
    async fn pause_elapses_without_shutdown() {
        let shutdown = std::future::pending::<()>();
        tokio::pin!(shutdown);

        assert!(!pause_unless_shutdown(shutdown.as_mut(), Duration::from_millis(10)).await);
    }

    #[test]
    fn empty_batch_keeps_offset() {
        assert_eq!(next_offset(Some(10), &[]), Some(10));
        assert_eq!(next_offset(None, &[]), None);
    }

    #[test]
    fn offset_moves_past_highest_update() {
        assert_eq!(next_offset(None, &updates(&[5, 7, 6])), Some(8));
    }

    #[test]
    fn offset_never_moves_backwards() {
        assert_eq!(next_offset(Some(100), &updates(&[3])), Some(100));
    }
}
