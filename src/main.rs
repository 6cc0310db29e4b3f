mod appsettings;
mod medication;
mod scheduling;
mod session;
mod telegram;

use std::sync::Arc;

use teloxide::Bot;
use tokio::sync::Mutex;

use crate::scheduling::ReminderDispatcher;
use crate::session::DaySession;
use crate::telegram::{
    TelegramInteractionInterface, TelegramNotificationSink, probe_delivery_capability,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = appsettings::get();
    settings.schedule.validate()?;

    let capability = probe_delivery_capability(&settings.telegram.token).await;
    if let Some(advisory) = capability.advisory() {
        log::warn!("{advisory}");
    }

    let bot = Bot::new(settings.telegram.token.clone());
    let sink = Arc::new(TelegramNotificationSink::new(
        bot.clone(),
        settings.telegram.chat_id,
    ));
    let dispatcher = Arc::new(ReminderDispatcher::new(sink));
    let session = Arc::new(Mutex::new(DaySession::new()));
    let book = Arc::new(settings.schedule.clone());

    TelegramInteractionInterface::start(bot, session, book, dispatcher).await;

    Ok(())
}
