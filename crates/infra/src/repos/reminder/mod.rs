mod inmemory;
mod postgres;

use eventide_domain::{DeliveryRecord, Reminder, ID};
pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
pub(crate) use postgres::ReminderRaw;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn find_by_event(&self, event_id: &ID, user_id: &ID) -> anyhow::Result<Option<Reminder>>;
    /// Pending reminders with a trigger time at or before `now`
    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>>;
    /// Appends the `DeliveryRecord` and marks the reminder as delivered in one
    /// atomic write. Nothing is written and `false` is returned if the reminder
    /// is gone, already delivered or has been given another trigger time since
    /// it was read.
    async fn deliver(&self, reminder: &Reminder, record: &DeliveryRecord) -> anyhow::Result<bool>;
}
