mod delivery;
mod event;
mod reminder;
mod shared;

use delivery::{IDeliveryRepo, InMemoryDeliveryRepo, PostgresDeliveryRepo};
use event::{InMemoryEventRepo, PostgresEventRepo};
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use shared::inmemory_repo::InMemoryStore;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

pub use event::{IEventRepo, ReminderChange};
pub use reminder::IReminderRepo;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub deliveries: Arc<dyn IDeliveryRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        Ok(Self {
            events: Arc::new(PostgresEventRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            deliveries: Arc::new(PostgresDeliveryRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        let store = InMemoryStore::new();
        Self {
            events: Arc::new(InMemoryEventRepo::new(store.clone())),
            reminders: Arc::new(InMemoryReminderRepo::new(store.clone())),
            deliveries: Arc::new(InMemoryDeliveryRepo::new(store)),
        }
    }
}
