use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::medication::MedicationBook;

use super::delivery::NotificationSink;
use super::plan::plan_day;

/// Fans a day plan out to the notification sink, one request per dose, in
/// plan order. Stateless between calls: invoking it twice for the same
/// anchor produces duplicate requests, which is why the day session gates
/// it at the caller boundary.
pub struct ReminderDispatcher {
    sink: Arc<dyn NotificationSink>,
}

impl ReminderDispatcher {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Returns the number of delivery requests issued.
    pub async fn dispatch_day(&self, book: &MedicationBook, wake_time: NaiveDateTime) -> usize {
        let plan = plan_day(book, wake_time);

        for instance in &plan {
            log::info!(
                "Requesting delivery for {} dose {} at {}",
                instance.medication.name,
                instance.dose_index,
                instance.fire_time_display()
            );

            self.sink.request_delivery(instance.notification()).await;
        }

        plan.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::medication::MedicationSchedule;
    use crate::scheduling::delivery::Notification;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    type RecordedNotifications = Arc<Mutex<Vec<Notification>>>;

    struct RecordingSink {
        received: RecordedNotifications,
    }

    #[async_trait]
    impl NotificationSink for RecordingSink {
        async fn request_delivery(&self, notification: Notification) {
            self.received.lock().unwrap().push(notification);
        }
    }

    fn wake_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn dispatcher() -> (ReminderDispatcher, RecordedNotifications) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let sink = RecordingSink {
            received: Arc::clone(&received),
        };

        (ReminderDispatcher::new(Arc::new(sink)), received)
    }

    #[tokio::test]
    async fn dispatches_one_request_per_dose() {
        let book = MedicationBook::default();
        let (dispatcher, received) = dispatcher();

        let count = dispatcher.dispatch_day(&book, wake_time()).await;

        assert_eq!(count, book.dose_count());
        assert_eq!(received.lock().unwrap().len(), book.dose_count());
    }

    #[tokio::test]
    async fn requests_carry_anchor_relative_delays_in_seconds() {
        let book = MedicationBook {
            eye_drops: vec![MedicationSchedule::new("Pred Forte", 120, 6, 10)],
            oral: vec![],
        };
        let (dispatcher, received) = dispatcher();

        dispatcher.dispatch_day(&book, wake_time()).await;

        let delays: Vec<u64> = received
            .lock()
            .unwrap()
            .iter()
            .map(|notification| notification.delay.as_secs())
            .collect();

        assert_eq!(
            delays,
            [10 * 60, 130 * 60, 250 * 60, 370 * 60, 490 * 60, 610 * 60]
        );
    }

    #[tokio::test]
    async fn requests_interpolate_the_medication_name() {
        let book = MedicationBook {
            eye_drops: vec![],
            oral: vec![MedicationSchedule::new("Cravit", 480, 1, 0)],
        };
        let (dispatcher, received) = dispatcher();

        dispatcher.dispatch_day(&book, wake_time()).await;

        let received = received.lock().unwrap();
        assert_eq!(received[0].title, "Cravit reminder");
        assert_eq!(received[0].body, "Time to take or instill Cravit now!");
    }

    #[tokio::test]
    async fn zero_repeat_count_dispatches_nothing() {
        let book = MedicationBook {
            eye_drops: vec![MedicationSchedule::new("Cyporin-N", 240, 0, 0)],
            oral: vec![],
        };
        let (dispatcher, received) = dispatcher();

        let count = dispatcher.dispatch_day(&book, wake_time()).await;

        assert_eq!(count, 0);
        assert!(received.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn requests_follow_plan_order() {
        let book = MedicationBook::default();
        let (dispatcher, received) = dispatcher();

        dispatcher.dispatch_day(&book, wake_time()).await;

        let expected: Vec<Notification> = plan_day(&book, wake_time())
            .iter()
            .map(|instance| instance.notification())
            .collect();

        assert_eq!(*received.lock().unwrap(), expected);
    }
}
