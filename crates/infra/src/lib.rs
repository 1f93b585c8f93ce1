mod config;
mod repos;
mod session;

pub use config::Config;
pub use repos::{IPlantingHistoryRepo, IReminderRepo, Repos};
pub use session::{ISessionResolver, JwtSessionResolver};
use std::sync::Arc;
pub use tanam_domain::{ISys, RealSys};
use tracing::warn;

#[derive(Clone)]
pub struct TanamContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    pub sessions: Arc<dyn ISessionResolver>,
}

impl TanamContext {
    fn create(repos: Repos) -> Self {
        let config = Config::new();
        let sessions = Arc::new(JwtSessionResolver::new(&config.session_secret));
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            sessions,
        }
    }

    pub fn create_inmemory() -> Self {
        Self::create(Repos::create_inmemory())
    }
}

/// Will setup the infrastructure context given the environment.
///
/// Uses postgres when `DATABASE_URL` is set and inmemory repositories otherwise.
pub async fn setup_context() -> anyhow::Result<TanamContext> {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    match std::env::var(PSQL_CONNECTION_STRING) {
        Ok(connection_string) => {
            let repos = Repos::create_postgres(&connection_string).await?;
            Ok(TanamContext::create(repos))
        }
        Err(_) => {
            warn!(
                "{} env var not present, falling back to inmemory repositories. Nothing will be persisted.",
                PSQL_CONNECTION_STRING
            );
            Ok(TanamContext::create_inmemory())
        }
    }
}
