use chrono::NaiveDateTime;

/// What the caller is allowed to do with a `/schedule` request right now.
/// Neither blocked variant is an error: the chat handler answers with an
/// advisory and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleGate {
    Ready { wake_time: NaiveDateTime },
    NotAwake,
    AlreadyScheduled,
}

/// In-memory state for the current day: the wake-up anchor and whether the
/// reminders for that anchor were already dispatched. A new wake event
/// overwrites the anchor and re-arms scheduling.
#[derive(Debug, Default)]
pub struct DaySession {
    wake_time: Option<NaiveDateTime>,
    reminders_scheduled: bool,
}

impl DaySession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_wake_up(&mut self, now: NaiveDateTime) {
        self.wake_time = Some(now);
        self.reminders_scheduled = false;
    }

    pub fn wake_time(&self) -> Option<NaiveDateTime> {
        self.wake_time
    }

    pub fn schedule_gate(&self) -> ScheduleGate {
        match (self.wake_time, self.reminders_scheduled) {
            (None, _) => ScheduleGate::NotAwake,
            (Some(_), true) => ScheduleGate::AlreadyScheduled,
            (Some(wake_time), false) => ScheduleGate::Ready { wake_time },
        }
    }

    pub fn mark_scheduled(&mut self) {
        self.reminders_scheduled = true;
    }
}
