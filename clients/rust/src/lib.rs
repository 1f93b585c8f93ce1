mod base;
mod notification;
mod reminder;
mod status;

pub(crate) use base::BaseClient;
pub use base::{APIError, APIResponse, REQUEST_TIMEOUT};
pub use notification::{
    dismissal_is_remembered, DismissalStore, FileKeyValueStore, IKeyValueStore, IReminderSource,
    InMemoryKeyValueStore, NotificationItem, NotificationSurface, SurfaceHandle, SurfaceStatus,
    SurfaceView, BADGE_OVERFLOW_LABEL, DISMISSAL_NAMESPACE, DISMISSAL_WINDOW_MILLIS, POLL_INTERVAL,
};
pub use reminder::{CreateReminderInput, ReminderClient};
use status::StatusClient;
use std::sync::Arc;
pub use tanam_api_structs::dtos::*;
pub use tanam_domain::{ReminderId, ReminderType, ID};

/// Tanam Rust SDK
///
/// The SDK contains methods for interacting with the Tanam reminders server
/// API and the notification surface that keeps a user's due reminders fresh.
#[derive(Clone)]
pub struct TanamSDK {
    pub reminder: ReminderClient,
    pub status: StatusClient,
}

impl TanamSDK {
    fn create(base: BaseClient) -> Self {
        let base = Arc::new(base);
        let reminder = ReminderClient::new(base.clone());
        let status = StatusClient::new(base);

        Self { reminder, status }
    }

    pub fn new<T: Into<String>>(address: String, session_token: T) -> Self {
        let mut base = BaseClient::new(address);
        base.set_session_token(session_token.into());

        Self::create(base)
    }

    /// Client without a session, only public routes will accept its requests
    pub fn new_anonymous(address: String) -> Self {
        Self::create(BaseClient::new(address))
    }
}
