use crate::shared::entity::{Entity, InvalidIDError, ID};
use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Reserved prefix of the wire representation of a `SynthesizedReminder` id.
/// Persisted ids are uuids and can therefore never start with it.
pub const SYNTHESIZED_ID_PREFIX: &str = "auto-reminder-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    Watering,
    Fertilizing,
    DiseaseCheck,
    Harvest,
    Other,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Watering => "watering",
            Self::Fertilizing => "fertilizing",
            Self::DiseaseCheck => "disease_check",
            Self::Harvest => "harvest",
            Self::Other => "other",
        }
    }

    /// Human readable heading shown to the gardener
    pub fn title(&self) -> &'static str {
        match self {
            Self::Watering => "Siram Tanaman",
            Self::Fertilizing => "Beri Pupuk",
            Self::DiseaseCheck => "Periksa Penyakit",
            Self::Harvest => "Waktu Panen",
            Self::Other => "Pengingat",
        }
    }
}

impl Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReminderType {
    type Err = InvalidReminderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "watering" => Ok(Self::Watering),
            "fertilizing" => Ok(Self::Fertilizing),
            "disease_check" => Ok(Self::DiseaseCheck),
            "harvest" => Ok(Self::Harvest),
            "other" => Ok(Self::Other),
            _ => Err(InvalidReminderIdError::UnknownReminderType(s.to_string())),
        }
    }
}

/// A `Reminder` stored by the repository. It belongs to exactly one `User`
/// and stays due until it is completed.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// Never changes after creation
    pub user_id: ID,
    pub reminder_type: ReminderType,
    pub message: String,
    pub scheduled_date: DateTime<Utc>,
    pub is_completed: bool,
    /// Set if and only if `is_completed` is true
    pub completed_at: Option<DateTime<Utc>>,
    pub planting_history_id: Option<ID>,
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    pub fn new(
        user_id: ID,
        reminder_type: ReminderType,
        message: impl Into<String>,
        scheduled_date: DateTime<Utc>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Default::default(),
            user_id,
            reminder_type,
            message: message.into(),
            scheduled_date,
            is_completed: false,
            completed_at: None,
            planting_history_id: None,
            created_at,
        }
    }

    /// Completing twice is allowed, the latest completion time wins
    pub fn complete(&mut self, completed_at: DateTime<Utc>) {
        self.is_completed = true;
        self.completed_at = Some(completed_at);
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A watering `Reminder` computed on the fly for an active `PlantingHistory`.
/// It is never stored, so it cannot be completed server side.
#[derive(Debug, Clone, PartialEq)]
pub struct SynthesizedReminder {
    pub planting_history_id: ID,
    pub reminder_type: ReminderType,
    pub message: String,
    pub scheduled_date: DateTime<Utc>,
    pub crop_name: String,
}

impl SynthesizedReminder {
    pub fn watering(planting_history_id: ID, crop_name: &str, now: DateTime<Utc>) -> Self {
        Self {
            planting_history_id,
            reminder_type: ReminderType::Watering,
            message: format!("Siram tanaman {} Anda", crop_name),
            scheduled_date: now,
            crop_name: crop_name.to_string(),
        }
    }

    /// Derived only from the planting and kind so that every poll yields the same id
    pub fn id(&self) -> ReminderId {
        ReminderId::Synthesized {
            planting_id: self.planting_history_id.clone(),
            kind: self.reminder_type,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderIdError {
    #[error("Reminder id: {0} is malformed")]
    Malformed(String),
    #[error("Unknown reminder type: {0}")]
    UnknownReminderType(String),
}

impl From<InvalidIDError> for InvalidReminderIdError {
    fn from(e: InvalidIDError) -> Self {
        match e {
            InvalidIDError::Malformed(id) => Self::Malformed(id),
        }
    }
}

/// Identity of an item in the due list.
///
/// On the wire a persisted id is the plain uuid and a synthesized id is
/// `auto-reminder-{planting_id}-{kind}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ReminderId {
    Persisted(ID),
    Synthesized { planting_id: ID, kind: ReminderType },
}

impl ReminderId {
    pub fn is_synthesized(&self) -> bool {
        matches!(self, Self::Synthesized { .. })
    }
}

impl Display for ReminderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Persisted(id) => write!(f, "{}", id),
            Self::Synthesized { planting_id, kind } => {
                write!(f, "{}{}-{}", SYNTHESIZED_ID_PREFIX, planting_id, kind)
            }
        }
    }
}

impl FromStr for ReminderId {
    type Err = InvalidReminderIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(SYNTHESIZED_ID_PREFIX) {
            Some(rest) => {
                let (planting_id, kind) = rest
                    .rsplit_once('-')
                    .ok_or_else(|| InvalidReminderIdError::Malformed(s.to_string()))?;
                Ok(Self::Synthesized {
                    planting_id: planting_id.parse()?,
                    kind: kind.parse()?,
                })
            }
            None => Ok(Self::Persisted(s.parse()?)),
        }
    }
}

impl Serialize for ReminderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReminderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<ReminderId>().map_err(de::Error::custom)
    }
}

/// One entry of the reconciled due list
#[derive(Debug, Clone, PartialEq)]
pub enum DueReminder {
    Persisted(Reminder),
    Synthesized(SynthesizedReminder),
}

impl DueReminder {
    pub fn id(&self) -> ReminderId {
        match self {
            Self::Persisted(r) => ReminderId::Persisted(r.id.clone()),
            Self::Synthesized(r) => r.id(),
        }
    }
}
