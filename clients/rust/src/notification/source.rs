use crate::{APIResponse, ReminderClient};
use tanam_api_structs::dtos::DueReminderDTO;
use tanam_domain::ReminderId;

/// Where the notification surface reads due reminders from and reports
/// completions to
#[async_trait::async_trait]
pub trait IReminderSource: Send + Sync {
    async fn fetch_due(&self) -> APIResponse<Vec<DueReminderDTO>>;
    async fn complete(&self, reminder_id: &ReminderId) -> APIResponse<()>;
}

#[async_trait::async_trait]
impl IReminderSource for ReminderClient {
    async fn fetch_due(&self) -> APIResponse<Vec<DueReminderDTO>> {
        self.upcoming().await
    }

    async fn complete(&self, reminder_id: &ReminderId) -> APIResponse<()> {
        ReminderClient::complete(self, reminder_id).await.map(|_| ())
    }
}
