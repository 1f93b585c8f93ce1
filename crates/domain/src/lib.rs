mod planting_history;
mod reconcile;
mod reminder;
mod shared;
mod sys;

pub use planting_history::PlantingHistory;
pub use reconcile::{reconcile_due_reminders, synthesize_watering_reminders};
pub use reminder::{
    DueReminder, InvalidReminderIdError, Reminder, ReminderId, ReminderType,
    SynthesizedReminder, SYNTHESIZED_ID_PREFIX,
};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use sys::{ISys, RealSys};
