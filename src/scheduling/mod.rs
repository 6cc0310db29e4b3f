mod capability;
mod delivery;
mod dispatcher;
mod plan;

pub use capability::NotificationCapability;
pub use delivery::{Notification, NotificationSink};
pub use dispatcher::ReminderDispatcher;
pub use plan::{ReminderInstance, plan_day, plan_medication};

pub(crate) use delivery::deliver_after_delay;
