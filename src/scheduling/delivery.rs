use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// One delivery request: human-readable title and body, and a non-negative
/// delay from the moment of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    pub delay: Duration,
}

/// The external notification-delivery facility. Fire-and-forget: nothing
/// is returned, no confirmation is awaited, and no handle is retained for
/// cancelling an individual request.
#[async_trait]
pub trait NotificationSink: Send + Sync + 'static {
    async fn request_delivery(&self, notification: Notification);
}

/// Waits out the delay, then delivers. Shutdown wins the race and drops
/// the delivery on the floor.
pub(crate) async fn deliver_after_delay<F, Fut>(
    delay: Duration,
    shutdown: CancellationToken,
    deliver: F,
) where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    tokio::select! {
        _ = shutdown.cancelled() => {
            log::debug!("Delivery task cancelled before firing");
        }
        _ = tokio::time::sleep(delay) => {
            deliver().await;
        }
    }
}
