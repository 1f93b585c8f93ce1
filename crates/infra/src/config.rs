use tanam_utils::create_random_secret;
use tracing::{info, warn};

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign and verify the session tokens of users
    pub session_secret: String,
    /// Port for the application to run on
    pub port: usize,
    /// How far ahead in millis a persisted `Reminder` counts as upcoming.
    /// Overdue reminders have no lower bound and stay upcoming until completed.
    pub upcoming_reminders_horizon: i64,
    /// A watering `Reminder` created within this many millis stops a new
    /// watering reminder from being synthesized for the same planting.
    pub recent_watering_window: i64,
}

impl Config {
    pub fn new() -> Self {
        let session_secret = match std::env::var("SESSION_SECRET") {
            Ok(secret) => secret,
            Err(_) => {
                info!("Did not find SESSION_SECRET environment variable. Going to create one.");
                let secret = create_random_secret(32);
                info!("Secret for signing session tokens was generated and set to: {}", secret);
                secret
            }
        };
        let default_port = 5000;
        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, default_port
                    );
                    default_port
                }
            },
            Err(_) => default_port,
        };
        Self {
            session_secret,
            port,
            upcoming_reminders_horizon: 7 * DAY_MILLIS,
            recent_watering_window: DAY_MILLIS,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
