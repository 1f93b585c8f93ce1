use super::kv::IKeyValueStore;
use std::sync::Arc;
use tanam_domain::{ISys, ReminderId};
use tracing::debug;

pub const DISMISSAL_NAMESPACE: &str = "dismissed:";
pub const DISMISSAL_WINDOW_MILLIS: i64 = 1000 * 60 * 60 * 24;

/// Remembers which reminders the user dismissed on this device. A dismissal
/// hides the reminder for 24 hours from the moment it was recorded.
#[derive(Clone)]
pub struct DismissalStore {
    store: Arc<dyn IKeyValueStore>,
    sys: Arc<dyn ISys>,
}

impl DismissalStore {
    pub fn new(store: Arc<dyn IKeyValueStore>, sys: Arc<dyn ISys>) -> Self {
        Self { store, sys }
    }

    fn key(reminder_id: &ReminderId) -> String {
        format!("{}{}", DISMISSAL_NAMESPACE, reminder_id)
    }

    /// Unreadable entries count as not dismissed
    pub fn is_dismissed_today(&self, reminder_id: &ReminderId) -> bool {
        let dismissed_at = match self
            .store
            .get(&Self::key(reminder_id))
            .and_then(|value| value.parse::<i64>().ok())
        {
            Some(ts) => ts,
            None => return false,
        };
        self.sys.get_timestamp_millis() - dismissed_at < DISMISSAL_WINDOW_MILLIS
    }

    pub fn mark_dismissed(&self, reminder_id: &ReminderId) -> anyhow::Result<()> {
        let now = self.sys.get_timestamp_millis();
        debug!("Dismissing reminder {} at {}", reminder_id, now);
        self.store.set(&Self::key(reminder_id), now.to_string())
    }
}
