use async_trait::async_trait;
use teloxide::prelude::*;
use tokio_util::sync::CancellationToken;

use crate::scheduling::{
    Notification, NotificationCapability, NotificationSink, deliver_after_delay,
};

/// Delivers reminders as Telegram messages. Each request becomes one
/// detached task that sleeps out the delay and then sends; delivery errors
/// are logged and swallowed. Dropping the sink cancels every still-pending
/// delivery.
pub struct TelegramNotificationSink {
    bot: Bot,
    chat_id: ChatId,
    shutdown: CancellationToken,
}

impl TelegramNotificationSink {
    pub fn new(bot: Bot, chat_id: i64) -> Self {
        Self {
            bot,
            chat_id: ChatId(chat_id),
            shutdown: CancellationToken::new(),
        }
    }
}

impl Drop for TelegramNotificationSink {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[async_trait]
impl NotificationSink for TelegramNotificationSink {
    async fn request_delivery(&self, notification: Notification) {
        let bot = self.bot.clone();
        let chat_id = self.chat_id;
        let shutdown = self.shutdown.child_token();
        let delay = notification.delay;

        tokio::spawn(async move {
            deliver_after_delay(delay, shutdown, move || async move {
                let text = format!("{}\n{}", notification.title, notification.body);
                if let Err(err) = bot.send_message(chat_id, text).await {
                    log::warn!("Failed to deliver notification: {err}");
                }
            })
            .await;
        });
    }
}

/// Resolves whether this process can deliver notifications at all. Always
/// lands on one of the three outcomes; a missing token means there is no
/// delivery target to speak to, a rejected probe means Telegram refused
/// the credentials.
pub async fn probe_delivery_capability(token: &str) -> NotificationCapability {
    if token.is_empty() {
        return NotificationCapability::Unsupported;
    }

    let bot = Bot::new(token);
    match bot.get_me().await {
        Ok(_) => NotificationCapability::Granted,
        Err(err) => {
            log::debug!("Delivery capability probe failed: {err}");
            NotificationCapability::Denied
        }
    }
}
