use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use chrono::{DateTime, Utc};
use tanam_domain::{Reminder, ReminderType, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(vec![]),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn find_due(
        &self,
        user_id: &ID,
        scheduled_before: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| {
            r.user_id == *user_id && !r.is_completed && r.scheduled_date <= scheduled_before
        }))
    }

    async fn find_by_type_created_after(
        &self,
        user_id: &ID,
        reminder_type: ReminderType,
        created_after: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |r| {
            r.user_id == *user_id && r.reminder_type == reminder_type && r.created_at >= created_after
        }))
    }

    async fn find_by_user(
        &self,
        reminder_id: &ID,
        user_id: &ID,
    ) -> anyhow::Result<Option<Reminder>> {
        Ok(find(reminder_id, &self.reminders).filter(|r| r.user_id == *user_id))
    }

    async fn complete(
        &self,
        reminder_id: &ID,
        user_id: &ID,
        completed_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<Reminder>> {
        Ok(update_one(
            &self.reminders,
            |r| r.id == *reminder_id && r.user_id == *user_id,
            |r| r.complete(completed_at),
        ))
    }
}
