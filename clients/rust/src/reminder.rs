use crate::{APIResponse, BaseClient};
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use std::sync::Arc;
use tanam_api_structs::{complete_reminder, create_reminder, get_upcoming_reminders};
use tanam_domain::{ReminderId, ReminderType, ID};

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct CreateReminderInput {
    pub reminder_type: ReminderType,
    pub message: String,
    pub scheduled_date: DateTime<Utc>,
    pub planting_history_id: Option<ID>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    /// Stored and synthesized reminders of the session user that are due
    /// within the next week, overdue ones included
    pub async fn upcoming(&self) -> APIResponse<get_upcoming_reminders::APIResponse> {
        self.base
            .get("reminders/upcoming".into(), StatusCode::OK)
            .await
    }

    pub async fn complete(&self, reminder_id: &ReminderId) -> APIResponse<complete_reminder::APIResponse> {
        self.base
            .post(
                (),
                format!("reminders/{}/complete", reminder_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn create(
        &self,
        input: CreateReminderInput,
    ) -> APIResponse<create_reminder::APIResponse> {
        let body = create_reminder::RequestBody {
            reminder_type: input.reminder_type,
            message: input.message,
            scheduled_date: input.scheduled_date,
            planting_history_id: input.planting_history_id,
        };
        self.base
            .post(body, "reminders".into(), StatusCode::CREATED)
            .await
    }
}
