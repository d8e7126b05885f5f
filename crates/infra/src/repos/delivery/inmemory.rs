use super::IDeliveryRepo;
use crate::repos::shared::inmemory_repo::*;
use eventide_domain::{DeliveryRecord, ID};

pub struct InMemoryDeliveryRepo {
    store: InMemoryStore,
}

impl InMemoryDeliveryRepo {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl IDeliveryRepo for InMemoryDeliveryRepo {
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<DeliveryRecord>> {
        Ok(find_by(&self.store.lock().deliveries, |d| {
            d.event_id == *event_id
        }))
    }
}
