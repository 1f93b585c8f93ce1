use crate::{
    planting_history::PlantingHistory,
    reminder::{DueReminder, Reminder, ReminderType, SynthesizedReminder},
    shared::entity::ID,
};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Creates one watering reminder for every active planting that is not
/// referenced by any of the `recent_watering` reminders.
///
/// Whether a recent reminder was completed does not matter, its existence
/// alone suppresses the synthesis.
pub fn synthesize_watering_reminders(
    active_plantings: &[PlantingHistory],
    recent_watering: &[Reminder],
    now: DateTime<Utc>,
) -> Vec<SynthesizedReminder> {
    let mut covered: HashSet<&ID> = recent_watering
        .iter()
        .filter(|r| r.reminder_type == ReminderType::Watering)
        .filter_map(|r| r.planting_history_id.as_ref())
        .collect();

    let mut reminders = Vec::new();
    for planting in active_plantings.iter().filter(|p| !p.is_completed) {
        // `insert` returns false for an already covered planting, which also
        // holds for a planting listed twice
        if covered.insert(&planting.id) {
            reminders.push(SynthesizedReminder::watering(
                planting.id.clone(),
                &planting.crop_name,
                now,
            ));
        }
    }
    reminders
}

/// Persisted reminders first, then the synthesized ones
pub fn reconcile_due_reminders(
    persisted: Vec<Reminder>,
    active_plantings: &[PlantingHistory],
    recent_watering: &[Reminder],
    now: DateTime<Utc>,
) -> Vec<DueReminder> {
    let synthesized = synthesize_watering_reminders(active_plantings, recent_watering, now);

    persisted
        .into_iter()
        .map(DueReminder::Persisted)
        .chain(synthesized.into_iter().map(DueReminder::Synthesized))
        .collect()
}
