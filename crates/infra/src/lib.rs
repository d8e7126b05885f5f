mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{IEventRepo, IReminderRepo, ReminderChange, Repos};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::{ISys, RealSys, StaticTimeSys};
use tracing::info;

/// Handle to all the collaborators a use case needs. It is passed
/// explicitly to every operation instead of living in a global.
#[derive(Clone)]
pub struct EventideContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl EventideContext {
    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    async fn create_postgres(config: Config, connection_string: &str) -> anyhow::Result<Self> {
        let repos = Repos::create_postgres(connection_string).await?;
        Ok(Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
        })
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> anyhow::Result<EventideContext> {
    let config = Config::new();
    match config.database_url.clone() {
        Some(connection_string) => {
            info!("DATABASE_URL env var was provided. Going to use postgres.");
            EventideContext::create_postgres(config, &connection_string).await
        }
        None => Ok(EventideContext {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
        }),
    }
}

pub async fn run_migration(connection_string: &str) -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(connection_string)
        .await?;

    sqlx::migrate!().run(&pool).await
}

/// The in-memory context, plus a postgres one when `DATABASE_URL` is set,
/// so repository tests run against every backend that is available
#[cfg(test)]
pub(crate) async fn test_contexts() -> Vec<EventideContext> {
    let mut contexts = vec![EventideContext::create_inmemory()];
    if let Ok(connection_string) = std::env::var("DATABASE_URL") {
        run_migration(&connection_string)
            .await
            .expect("Migrations to run");
        let ctx = EventideContext::create_postgres(Config::new(), &connection_string)
            .await
            .expect("Postgres to be reachable");
        contexts.push(ctx);
    }
    contexts
}
