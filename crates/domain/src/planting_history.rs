use crate::shared::entity::{Entity, ID};

/// A crop a `User` has planted. Only read by the reminder logic, the
/// planting flows own its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantingHistory {
    pub id: ID,
    pub user_id: ID,
    pub crop_name: String,
    /// Harvested or abandoned plantings no longer get reminders
    pub is_completed: bool,
}

impl PlantingHistory {
    pub fn new(user_id: ID, crop_name: impl Into<String>) -> Self {
        Self {
            id: Default::default(),
            user_id,
            crop_name: crop_name.into(),
            is_completed: false,
        }
    }
}

impl Entity for PlantingHistory {
    fn id(&self) -> &ID {
        &self.id
    }
}
