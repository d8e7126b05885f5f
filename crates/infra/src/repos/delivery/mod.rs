mod inmemory;
mod postgres;

use eventide_domain::{DeliveryRecord, ID};
pub use inmemory::InMemoryDeliveryRepo;
pub use postgres::PostgresDeliveryRepo;

/// Read side of the delivery audit trail. Records are only ever written
/// by `IReminderRepo::deliver`.
#[async_trait::async_trait]
pub trait IDeliveryRepo: Send + Sync {
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<DeliveryRecord>>;
}
