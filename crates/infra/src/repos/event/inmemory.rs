use super::{IEventRepo, ReminderChange};
use crate::repos::shared::inmemory_repo::*;
use eventide_domain::{CalendarEvent, Reminder, ReminderState, ScheduledEvent, ID};

pub struct InMemoryEventRepo {
    store: InMemoryStore,
}

impl InMemoryEventRepo {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

fn reminder_of(event: &CalendarEvent, reminders: &[Reminder]) -> Option<Reminder> {
    reminders
        .iter()
        .find(|r| r.event_id == event.id && r.user_id == event.user_id)
        .cloned()
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, e: &CalendarEvent, reminder: Option<&Reminder>) -> anyhow::Result<()> {
        let mut tables = self.store.lock();
        if let Some(reminder) = reminder {
            if tables
                .reminders
                .iter()
                .any(|r| r.event_id == reminder.event_id && r.user_id == reminder.user_id)
            {
                anyhow::bail!("Event {} already has a reminder", reminder.event_id);
            }
            tables.reminders.push(reminder.clone());
        }
        tables.events.push(e.clone());
        Ok(())
    }

    async fn save(
        &self,
        e: &CalendarEvent,
        reminder: &ReminderChange,
    ) -> anyhow::Result<Option<Reminder>> {
        let mut guard = self.store.lock();
        let tables = &mut *guard;
        if find(&e.id, &tables.events).is_none() {
            anyhow::bail!("Event {} does not exist", e.id);
        }
        save(e, &mut tables.events);

        match reminder {
            ReminderChange::Upsert(reminder) => {
                let existing = tables
                    .reminders
                    .iter_mut()
                    .find(|r| r.event_id == reminder.event_id && r.user_id == reminder.user_id);
                match existing {
                    Some(existing) => {
                        existing.remind_at = reminder.remind_at;
                        existing.state = ReminderState::Pending;
                        Ok(Some(existing.clone()))
                    }
                    None => {
                        tables.reminders.push(reminder.clone());
                        Ok(Some(reminder.clone()))
                    }
                }
            }
            ReminderChange::Clear => {
                delete_by(&mut tables.reminders, |r| {
                    r.event_id == e.id && r.user_id == e.user_id
                });
                Ok(None)
            }
        }
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        Ok(find(event_id, &self.store.lock().events))
    }

    async fn find_with_reminder(&self, event_id: &ID) -> anyhow::Result<Option<ScheduledEvent>> {
        let tables = self.store.lock();
        Ok(find(event_id, &tables.events).map(|event| {
            let reminder = reminder_of(&event, &tables.reminders);
            ScheduledEvent { event, reminder }
        }))
    }

    async fn find_by_user_with_reminders(
        &self,
        user_id: &ID,
    ) -> anyhow::Result<Vec<ScheduledEvent>> {
        let tables = self.store.lock();
        Ok(find_by(&tables.events, |e| e.user_id == *user_id)
            .into_iter()
            .map(|event| {
                let reminder = reminder_of(&event, &tables.reminders);
                ScheduledEvent { event, reminder }
            })
            .collect())
    }

    async fn find_duplicate(
        &self,
        user_id: &ID,
        title: &str,
        scheduled_ts: i64,
        excluding: Option<&ID>,
    ) -> anyhow::Result<Option<CalendarEvent>> {
        let res = find_by(&self.store.lock().events, |e| {
            e.user_id == *user_id
                && e.collides_with(title, scheduled_ts)
                && Some(&e.id) != excluding
        });
        Ok(res.into_iter().next())
    }

    async fn find_published(&self) -> anyhow::Result<Vec<CalendarEvent>> {
        let mut events = find_by(&self.store.lock().events, |e| {
            e.status == eventide_domain::EventStatus::Published
        });
        events.sort_by_key(|e| e.scheduled_ts);
        Ok(events)
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        let mut tables = self.store.lock();
        let deleted = delete(event_id, &mut tables.events);
        if deleted.is_some() {
            delete_by(&mut tables.reminders, |r| r.event_id == *event_id);
        }
        Ok(deleted)
    }
}
