use std::time::Duration;

use chrono::{NaiveDateTime, TimeDelta};

use crate::medication::{MedicationBook, MedicationSchedule};

use super::delivery::Notification;

/// One concrete dose: a medication paired with a repetition index and the
/// absolute wall-clock instant it fires at. Derived on demand, never
/// stored; display and dispatch both read from the same instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderInstance {
    pub medication: MedicationSchedule,
    pub dose_index: u32,
    pub offset_minutes: i64,
    pub fire_at: NaiveDateTime,
}

impl ReminderInstance {
    /// 24-hour wall-clock rendering used everywhere a dose time is shown.
    pub fn fire_time_display(&self) -> String {
        self.fire_at.format("%H:%M").to_string()
    }

    pub fn notification(&self) -> Notification {
        Notification {
            title: format!("{} reminder", self.medication.name),
            body: format!("Time to take or instill {} now!", self.medication.name),
            delay: Duration::from_secs(self.offset_minutes as u64 * 60),
        }
    }
}

/// All doses of one medication, anchored at the wake-up time. Instance `i`
/// fires at `wake_time + delay + i * interval`; a repeat count of zero
/// yields an empty plan.
pub fn plan_medication(
    medication: &MedicationSchedule,
    wake_time: NaiveDateTime,
) -> Vec<ReminderInstance> {
    (0..medication.repeat_count)
        .map(|dose_index| {
            let offset_minutes = i64::from(medication.delay_minutes)
                + i64::from(dose_index) * i64::from(medication.interval_minutes);

            ReminderInstance {
                medication: medication.clone(),
                dose_index,
                offset_minutes,
                fire_at: wake_time + TimeDelta::minutes(offset_minutes),
            }
        })
        .collect()
}

/// The whole day in dispatch order: every medication of the book in list
/// order, eye drops before oral. Overlapping instances are left as-is.
pub fn plan_day(book: &MedicationBook, wake_time: NaiveDateTime) -> Vec<ReminderInstance> {
    book.all()
        .flat_map(|medication| plan_medication(medication, wake_time))
        .collect()
}
