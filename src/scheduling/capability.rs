/// Outcome of the startup delivery-capability probe. The probe never
/// fails; every runtime condition maps onto one of these three.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationCapability {
    Granted,
    Denied,
    Unsupported,
}

impl NotificationCapability {
    /// One-time user-facing advisory for non-granted outcomes. Scheduling
    /// keeps working either way; delivery just has no observable effect.
    pub fn advisory(&self) -> Option<&'static str> {
        match self {
            NotificationCapability::Granted => None,
            NotificationCapability::Denied => Some(
                "Notification delivery was denied; reminders will be scheduled but not delivered",
            ),
            NotificationCapability::Unsupported => Some(
                "This runtime cannot deliver notifications; reminders will be scheduled but not delivered",
            ),
        }
    }
}
