mod delivery_channel;

pub use delivery_channel::{TelegramNotificationSink, probe_delivery_capability};

use std::sync::Arc;

use chrono::{Local, NaiveDateTime};
use teloxide::{dptree, prelude::*, utils::command::BotCommands};
use tokio::sync::Mutex;

use crate::medication::{MedicationBook, MedicationSchedule};
use crate::scheduling::{ReminderDispatcher, plan_medication};
use crate::session::{DaySession, ScheduleGate};

type HandlerResult = anyhow::Result<()>;
type SharedSession = Arc<Mutex<DaySession>>;

#[derive(BotCommands, Clone)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
enum Command {
    #[command(description = "record that you just woke up.")]
    WakeUp,
    #[command(description = "schedule today's medication reminders.")]
    Schedule,
    #[command(description = "list today's planned dose times.")]
    Plan,
    #[command(description = "show this text.")]
    Help,
}

pub struct TelegramInteractionInterface;

impl TelegramInteractionInterface {
    pub async fn start(
        bot: Bot,
        session: SharedSession,
        book: Arc<MedicationBook>,
        dispatcher: Arc<ReminderDispatcher>,
    ) {
        log::info!("Starting Telegram interaction interface");

        let schema = Update::filter_message()
            .branch(teloxide::filter_command::<Command, _>().endpoint(handle_command));

        Dispatcher::builder(bot, schema)
            .dependencies(dptree::deps![session, book, dispatcher])
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await
    }
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    session: SharedSession,
    book: Arc<MedicationBook>,
    dispatcher: Arc<ReminderDispatcher>,
) -> HandlerResult {
    match cmd {
        Command::WakeUp => wake_up(&bot, &msg, &session).await,
        Command::Schedule => schedule_reminders(&bot, &msg, &session, &book, &dispatcher).await,
        Command::Plan => show_plan(&bot, &msg, &session, &book).await,
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string())
                .await?;
            Ok(())
        }
    }
}

async fn wake_up(bot: &Bot, msg: &Message, session: &SharedSession) -> HandlerResult {
    let now = Local::now().naive_local();
    session.lock().await.record_wake_up(now);

    bot.send_message(
        msg.chat.id,
        format!(
            "Good morning! Wake-up time recorded at {}.\nUse /schedule to set up today's medication reminders.",
            now.format("%H:%M")
        ),
    )
    .await?;

    Ok(())
}

async fn schedule_reminders(
    bot: &Bot,
    msg: &Message,
    session: &SharedSession,
    book: &MedicationBook,
    dispatcher: &ReminderDispatcher,
) -> HandlerResult {
    // The lock is held across dispatching so a /wakeup arriving mid-flight
    // cannot slip between the gate check and the scheduled flag.
    let mut session = session.lock().await;

    let reply = match session.schedule_gate() {
        ScheduleGate::NotAwake => {
            "I don't know when you woke up yet. Use /wakeup first.".to_string()
        }
        ScheduleGate::AlreadyScheduled => {
            "Today's medication reminders are already scheduled.".to_string()
        }
        ScheduleGate::Ready { wake_time } => {
            let count = dispatcher.dispatch_day(book, wake_time).await;
            session.mark_scheduled();
            log::info!("Scheduled {count} medication reminders");
            format!("Scheduled {count} medication reminders for today.")
        }
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

async fn show_plan(
    bot: &Bot,
    msg: &Message,
    session: &SharedSession,
    book: &MedicationBook,
) -> HandlerResult {
    let wake_time = session.lock().await.wake_time();

    let text = match wake_time {
        None => "No wake-up time recorded yet. Use /wakeup first.".to_string(),
        Some(wake_time) => render_day_plan(book, wake_time),
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}

fn render_day_plan(book: &MedicationBook, wake_time: NaiveDateTime) -> String {
    let mut out = format!("Wake-up time: {}\n", wake_time.format("%H:%M"));

    out.push_str("\nEye drops\n");
    render_group(&mut out, &book.eye_drops, wake_time);

    out.push_str("\nOral medications\n");
    render_group(&mut out, &book.oral, wake_time);

    out
}

fn render_group(out: &mut String, medications: &[MedicationSchedule], wake_time: NaiveDateTime) {
    for medication in medications {
        out.push_str(&medication.name);
        out.push('\n');

        for instance in plan_medication(medication, wake_time) {
            out.push_str(&format!("- {} planned\n", instance.fire_time_display()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::plan_day;
    use chrono::NaiveDate;

    fn wake_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    #[test]
    fn day_plan_groups_eye_drops_before_oral_medications() {
        let rendered = render_day_plan(&MedicationBook::default(), wake_time());

        let eye_drops = rendered.find("Eye drops").unwrap();
        let oral = rendered.find("Oral medications").unwrap();

        assert!(rendered.starts_with("Wake-up time: 08:00\n"));
        assert!(eye_drops < oral);
    }

    #[test]
    fn day_plan_lists_every_dose_under_its_medication() {
        let rendered = render_day_plan(&MedicationBook::default(), wake_time());

        assert!(rendered.contains(
            "Cyporin-N\n- 08:00 planned\n- 12:00 planned\n- 16:00 planned\n- 20:00 planned\n"
        ));
        assert!(rendered.contains("Cravit\n- 08:25 planned\n- 16:25 planned\n"));
        assert!(rendered.contains("Blood pressure pills (1x daily)\n- 08:05 planned\n"));
    }

    #[test]
    fn rendered_times_match_the_dispatched_plan() {
        let book = MedicationBook::default();
        let rendered = render_day_plan(&book, wake_time());

        for instance in plan_day(&book, wake_time()) {
            assert!(
                rendered.contains(&format!("- {} planned", instance.fire_time_display())),
                "missing {} in rendered plan",
                instance.fire_time_display()
            );
        }
    }
}
