use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use eventide_domain::{DeliveryRecord, Reminder, ReminderState, ID};

pub struct InMemoryReminderRepo {
    store: InMemoryStore,
}

impl InMemoryReminderRepo {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn find_by_event(&self, event_id: &ID, user_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let res = find_by(&self.store.lock().reminders, |r| {
            r.event_id == *event_id && r.user_id == *user_id
        });
        Ok(res.into_iter().next())
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.store.lock().reminders, |r| r.is_due(now)))
    }

    async fn deliver(&self, reminder: &Reminder, record: &DeliveryRecord) -> anyhow::Result<bool> {
        let mut guard = self.store.lock();
        let tables = &mut *guard;
        let stored = tables.reminders.iter_mut().find(|r| {
            r.id == reminder.id && r.remind_at == reminder.remind_at && !r.is_delivered()
        });
        match stored {
            Some(stored) => {
                stored.state = ReminderState::Delivered;
                tables.deliveries.push(record.clone());
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
