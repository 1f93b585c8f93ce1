use crate::dtos::{DueReminderDTO, ReminderDTO};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tanam_domain::{DueReminder, Reminder, ReminderType, ID};

pub mod get_upcoming_reminders {
    use super::*;

    pub type APIResponse = Vec<DueReminderDTO>;

    pub fn to_response(reminders: Vec<DueReminder>) -> APIResponse {
        reminders.into_iter().map(DueReminderDTO::new).collect()
    }
}

pub mod complete_reminder {
    use super::*;

    /// The id is kept raw, anything that is not a persisted reminder id
    /// is answered with not found
    #[derive(Deserialize)]
    pub struct PathParams {
        pub reminder_id: String,
    }

    #[derive(Debug, Deserialize, Serialize)]
    pub struct APIResponse {
        pub ok: bool,
    }

    impl APIResponse {
        pub fn new() -> Self {
            Self { ok: true }
        }
    }

    impl Default for APIResponse {
        fn default() -> Self {
            Self::new()
        }
    }
}

pub mod create_reminder {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub reminder_type: ReminderType,
        pub message: String,
        pub scheduled_date: DateTime<Utc>,
        #[serde(default)]
        pub planting_history_id: Option<ID>,
    }

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub reminder: ReminderDTO,
    }

    impl APIResponse {
        pub fn new(reminder: Reminder) -> Self {
            Self {
                reminder: ReminderDTO::new(reminder),
            }
        }
    }
}
