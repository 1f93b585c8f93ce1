mod dismissal;
mod kv;
mod source;
mod surface;

pub use dismissal::{DismissalStore, DISMISSAL_NAMESPACE, DISMISSAL_WINDOW_MILLIS};
pub use kv::{FileKeyValueStore, IKeyValueStore, InMemoryKeyValueStore};
pub use source::IReminderSource;
pub use surface::{
    dismissal_is_remembered, NotificationItem, NotificationSurface, SurfaceHandle, SurfaceStatus,
    SurfaceView, BADGE_OVERFLOW_LABEL, POLL_INTERVAL,
};
