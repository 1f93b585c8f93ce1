use super::{dismissal::DismissalStore, source::IReminderSource};
use crate::APIError;
use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex, MutexGuard, PoisonError,
    },
    time::Duration,
};
use tanam_api_structs::dtos::DueReminderDTO;
use tanam_domain::ReminderId;
use tokio::{
    task::{JoinHandle, JoinSet},
    time::MissedTickBehavior,
};
use tracing::{debug, warn};

pub const POLL_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const BADGE_OVERFLOW_LABEL: &str = "9+";
const BADGE_MAX_COUNT: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceStatus {
    /// No fetch has finished yet
    Loading,
    IdleEmpty,
    IdleWithItems,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationItem {
    pub reminder: DueReminderDTO,
    pub title: &'static str,
    /// The last completion attempt of this item failed
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceView {
    pub status: SurfaceStatus,
    pub panel_open: bool,
    pub badge: Option<String>,
    pub items: Vec<NotificationItem>,
}

/// Whether dismissing the reminder is recorded in the dismissal store.
///
/// Only synthesized reminders are remembered. A dismissed persisted reminder
/// is hidden until the next poll returns it again.
pub fn dismissal_is_remembered(reminder_id: &ReminderId) -> bool {
    reminder_id.is_synthesized()
}

fn badge_label(count: usize) -> Option<String> {
    match count {
        0 => None,
        c if c > BADGE_MAX_COUNT => Some(BADGE_OVERFLOW_LABEL.to_string()),
        c => Some(c.to_string()),
    }
}

#[derive(Default)]
struct SurfaceState {
    loaded: bool,
    reminders: Vec<DueReminderDTO>,
    failed: HashSet<ReminderId>,
    panel_open: bool,
    applied_seq: u64,
}

impl SurfaceState {
    fn status(&self) -> SurfaceStatus {
        if !self.loaded {
            SurfaceStatus::Loading
        } else if self.reminders.is_empty() {
            SurfaceStatus::IdleEmpty
        } else {
            SurfaceStatus::IdleWithItems
        }
    }

    fn contains(&self, reminder_id: &ReminderId) -> bool {
        self.reminders.iter().any(|r| &r.id == reminder_id)
    }

    fn remove(&mut self, reminder_id: &ReminderId) {
        self.reminders.retain(|r| &r.id != reminder_id);
        self.failed.remove(reminder_id);
    }
}

struct SurfaceInner {
    source: Arc<dyn IReminderSource>,
    dismissals: DismissalStore,
    state: Mutex<SurfaceState>,
    issued_seq: AtomicU64,
    mount_generation: AtomicU64,
    torn_down: AtomicBool,
}

/// Keeps the due reminders of the session user fresh and tracks what the
/// user has acted on.
///
/// Every fetch is tagged with an increasing sequence number and a response
/// is only applied when no newer response has been applied before it. Once
/// the surface is torn down responses and completion results are dropped.
#[derive(Clone)]
pub struct NotificationSurface {
    inner: Arc<SurfaceInner>,
}

impl NotificationSurface {
    pub fn new(source: Arc<dyn IReminderSource>, dismissals: DismissalStore) -> Self {
        Self {
            inner: Arc::new(SurfaceInner {
                source,
                dismissals,
                state: Mutex::new(SurfaceState::default()),
                issued_seq: AtomicU64::new(0),
                mount_generation: AtomicU64::new(0),
                torn_down: AtomicBool::new(false),
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, SurfaceState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn is_torn_down(&self) -> bool {
        self.inner.torn_down.load(Ordering::SeqCst)
    }

    pub fn view(&self) -> SurfaceView {
        let state = self.state();
        let items = state
            .reminders
            .iter()
            .map(|r| NotificationItem {
                reminder: r.clone(),
                title: r.reminder_type.title(),
                failed: state.failed.contains(&r.id),
            })
            .collect();

        SurfaceView {
            status: state.status(),
            panel_open: state.panel_open,
            badge: badge_label(state.reminders.len()),
            items,
        }
    }

    pub fn status(&self) -> SurfaceStatus {
        self.state().status()
    }

    pub fn badge(&self) -> Option<String> {
        badge_label(self.state().reminders.len())
    }

    pub fn toggle_panel(&self) {
        let mut state = self.state();
        state.panel_open = !state.panel_open;
    }

    pub fn close_panel(&self) {
        self.state().panel_open = false;
    }

    fn visible(&self, reminders: Vec<DueReminderDTO>) -> Vec<DueReminderDTO> {
        reminders
            .into_iter()
            .filter(|r| !r.is_completed)
            .filter(|r| {
                !(dismissal_is_remembered(&r.id) && self.inner.dismissals.is_dismissed_today(&r.id))
            })
            .collect()
    }

    /// Fetches the due reminders once and applies the result unless a newer
    /// fetch already won
    pub async fn refresh(&self) {
        let seq = self.inner.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
        let res = self.inner.source.fetch_due().await;
        if self.is_torn_down() {
            debug!("Dropping reminders response {} after teardown", seq);
            return;
        }

        let fresh = res.map(|reminders| self.visible(reminders));
        let mut state = self.state();
        state.loaded = true;
        if seq <= state.applied_seq {
            debug!(
                "Discarding stale reminders response {}, already showing {}",
                seq, state.applied_seq
            );
            return;
        }

        match fresh {
            Ok(reminders) => {
                state.applied_seq = seq;
                state
                    .failed
                    .retain(|id| reminders.iter().any(|r| &r.id == id));
                state.reminders = reminders;
            }
            Err(APIError::Unauthorized) => {
                warn!("Session rejected while fetching reminders, clearing the list");
                state.applied_seq = seq;
                state.reminders.clear();
                state.failed.clear();
            }
            Err(e) => {
                warn!("Unable to fetch reminders, keeping the current list: {:?}", e);
            }
        }
    }

    /// Hides the reminder. Synthesized reminders stay hidden for a day.
    pub fn dismiss(&self, reminder_id: &ReminderId) {
        if dismissal_is_remembered(reminder_id) {
            if let Err(e) = self.inner.dismissals.mark_dismissed(reminder_id) {
                warn!("Unable to remember dismissal of {}: {:?}", reminder_id, e);
            }
        }
        self.state().remove(reminder_id);
    }

    /// Completes a stored reminder through the source. A synthesized reminder
    /// has nothing stored to complete and is dismissed instead.
    ///
    /// A failed completion keeps the item and flags it.
    pub async fn complete(&self, reminder_id: &ReminderId) -> Result<(), APIError> {
        if reminder_id.is_synthesized() {
            self.dismiss(reminder_id);
            return Ok(());
        }

        let res = self.inner.source.complete(reminder_id).await;
        if self.is_torn_down() {
            return res;
        }

        let mut state = self.state();
        match &res {
            Ok(()) => {
                state.remove(reminder_id);
                // Fetches issued before the completion may still list it
                state.applied_seq = self.inner.issued_seq.load(Ordering::SeqCst);
            }
            Err(e) => {
                warn!("Unable to complete reminder {}: {:?}", reminder_id, e);
                if state.contains(reminder_id) {
                    state.failed.insert(reminder_id.clone());
                }
            }
        }
        res
    }

    /// Starts polling with the default interval, the first fetch is
    /// issued right away
    pub fn mount(&self) -> SurfaceHandle {
        self.mount_with_interval(POLL_INTERVAL)
    }

    pub fn mount_with_interval(&self, period: Duration) -> SurfaceHandle {
        let generation = self.inner.mount_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.torn_down.store(false, Ordering::SeqCst);
        let surface = self.clone();
        let poller = tokio::spawn(async move {
            let mut ticks = tokio::time::interval(period);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // In flight fetches are aborted together with the poller
            let mut refreshes = JoinSet::new();
            loop {
                tokio::select! {
                    _ = ticks.tick() => {
                        let surface = surface.clone();
                        refreshes.spawn(async move { surface.refresh().await });
                    }
                    Some(_) = refreshes.join_next() => {}
                }
            }
        });

        SurfaceHandle {
            inner: self.inner.clone(),
            generation,
            poller,
        }
    }
}

/// Polling of a mounted surface. Dropping the handle tears the surface down
/// unless the surface has been mounted again since.
pub struct SurfaceHandle {
    inner: Arc<SurfaceInner>,
    generation: u64,
    poller: JoinHandle<()>,
}

impl SurfaceHandle {
    pub fn teardown(self) {
        drop(self)
    }
}

impl Drop for SurfaceHandle {
    fn drop(&mut self) {
        if self.inner.mount_generation.load(Ordering::SeqCst) == self.generation {
            self.inner.torn_down.store(true, Ordering::SeqCst);
        }
        self.poller.abort();
    }
}
