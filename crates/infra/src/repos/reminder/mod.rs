mod inmemory;
mod postgres;

use chrono::{DateTime, Utc};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use tanam_domain::{Reminder, ReminderType, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    /// Reminders of the user that are not completed and scheduled at or before `scheduled_before`
    async fn find_due(
        &self,
        user_id: &ID,
        scheduled_before: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>>;
    /// Reminders of the user with the given type created at or after `created_after`,
    /// completed or not
    async fn find_by_type_created_after(
        &self,
        user_id: &ID,
        reminder_type: ReminderType,
        created_after: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>>;
    async fn find_by_user(&self, reminder_id: &ID, user_id: &ID)
        -> anyhow::Result<Option<Reminder>>;
    /// Atomically marks the reminder owned by `user_id` as completed.
    /// Returns `None` when there is no such reminder for that user.
    async fn complete(
        &self,
        reminder_id: &ID,
        user_id: &ID,
        completed_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Reminder>>;
}
