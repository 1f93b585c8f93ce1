use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tanam_domain::{DueReminder, Reminder, ReminderId, ReminderType, SynthesizedReminder, ID};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub user_id: ID,
    pub reminder_type: ReminderType,
    pub message: String,
    pub scheduled_date: DateTime<Utc>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub planting_history_id: Option<ID>,
    pub created_at: DateTime<Utc>,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            user_id: reminder.user_id,
            reminder_type: reminder.reminder_type,
            message: reminder.message,
            scheduled_date: reminder.scheduled_date,
            is_completed: reminder.is_completed,
            completed_at: reminder.completed_at,
            planting_history_id: reminder.planting_history_id,
            created_at: reminder.created_at,
        }
    }
}

/// An entry of the upcoming reminders list. Persisted reminders carry the
/// owner and bookkeeping timestamps, synthesized ones carry the crop name.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DueReminderDTO {
    pub id: ReminderId,
    pub reminder_type: ReminderType,
    pub message: String,
    pub scheduled_date: DateTime<Utc>,
    pub is_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_name: Option<String>,
    #[serde(default)]
    pub planting_history_id: Option<ID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<ID>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DueReminderDTO {
    pub fn new(reminder: DueReminder) -> Self {
        match reminder {
            DueReminder::Persisted(r) => Self::persisted(r),
            DueReminder::Synthesized(r) => Self::synthesized(r),
        }
    }

    fn persisted(r: Reminder) -> Self {
        Self {
            id: ReminderId::Persisted(r.id),
            reminder_type: r.reminder_type,
            message: r.message,
            scheduled_date: r.scheduled_date,
            is_completed: r.is_completed,
            crop_name: None,
            planting_history_id: r.planting_history_id,
            user_id: Some(r.user_id),
            completed_at: r.completed_at,
            created_at: Some(r.created_at),
        }
    }

    fn synthesized(r: SynthesizedReminder) -> Self {
        Self {
            id: r.id(),
            reminder_type: r.reminder_type,
            message: r.message,
            scheduled_date: r.scheduled_date,
            is_completed: false,
            crop_name: Some(r.crop_name),
            planting_history_id: Some(r.planting_history_id),
            user_id: None,
            completed_at: None,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn synthesized_reminder_json_shape() {
        let planting_id = ID::new();
        let now = Utc::now();
        let dto = DueReminderDTO::new(DueReminder::Synthesized(SynthesizedReminder::watering(
            planting_id.clone(),
            "Tomat",
            now,
        )));
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(
            json["id"],
            format!("auto-reminder-{}-watering", planting_id).as_str()
        );
        assert_eq!(json["reminderType"], "watering");
        assert_eq!(json["message"], "Siram tanaman Tomat Anda");
        assert_eq!(json["cropName"], "Tomat");
        assert_eq!(json["isCompleted"], false);
        assert_eq!(json["plantingHistoryId"], planting_id.as_string().as_str());
        assert!(json["scheduledDate"].is_string());
        assert!(json.get("userId").is_none());

        let back: DueReminderDTO = serde_json::from_value(json).unwrap();
        assert_eq!(back, dto);
    }

    #[test]
    fn persisted_reminder_json_shape() {
        let now = Utc::now();
        let reminder = Reminder::new(ID::new(), ReminderType::Harvest, "Panen", now, now);
        let dto = DueReminderDTO::new(DueReminder::Persisted(reminder.clone()));
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["id"], reminder.id.as_string().as_str());
        assert_eq!(json["userId"], reminder.user_id.as_string().as_str());
        assert_eq!(json["reminderType"], "harvest");
        assert!(json["plantingHistoryId"].is_null());
        assert!(json.get("cropName").is_none());
    }
}
