mod inmemory;
mod postgres;

use eventide_domain::{CalendarEvent, Reminder, ScheduledEvent, ID};
pub use inmemory::InMemoryEventRepo;
pub use postgres::PostgresEventRepo;

/// What should happen to the single `Reminder` of an event and its owner
/// when the event is saved
#[derive(Debug, Clone, PartialEq)]
pub enum ReminderChange {
    /// Create the reminder, or replace the trigger time of the existing one
    /// and mark it pending again
    Upsert(Reminder),
    /// Remove the reminder if there is one
    Clear,
}

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    /// Inserts the event and its reminder, if any, as one atomic write
    async fn insert(&self, e: &CalendarEvent, reminder: Option<&Reminder>) -> anyhow::Result<()>;
    /// Saves the event and applies the reminder change as one atomic write.
    /// Returns the reminder as it was stored by that write.
    async fn save(
        &self,
        e: &CalendarEvent,
        reminder: &ReminderChange,
    ) -> anyhow::Result<Option<Reminder>>;
    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>>;
    /// The event and its reminder read from one consistent snapshot
    async fn find_with_reminder(&self, event_id: &ID) -> anyhow::Result<Option<ScheduledEvent>>;
    /// Every event of the user with its reminder, read from one consistent snapshot
    async fn find_by_user_with_reminders(&self, user_id: &ID)
        -> anyhow::Result<Vec<ScheduledEvent>>;
    /// Finds an event of the user with exactly this title and time,
    /// ignoring the event with id `excluding`
    async fn find_duplicate(
        &self,
        user_id: &ID,
        title: &str,
        scheduled_ts: i64,
        excluding: Option<&ID>,
    ) -> anyhow::Result<Option<CalendarEvent>>;
    /// Published events ordered by when they take place
    async fn find_published(&self) -> anyhow::Result<Vec<CalendarEvent>>;
    /// Deletes the event together with its reminder
    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>>;
}

#[cfg(test)]
mod tests {
    use super::ReminderChange;
    use crate::test_contexts;
    use eventide_domain::{CalendarEvent, EventStatus, Reminder, ReminderState, ID};
    use serial_test::serial;

    fn generate_event(user_id: &ID, title: &str, scheduled_ts: i64) -> CalendarEvent {
        CalendarEvent {
            id: Default::default(),
            title: title.into(),
            description: None,
            scheduled_ts,
            location: "NO-OS: Oslo".into(),
            status: EventStatus::Published,
            user_id: *user_id,
            created: 0,
            updated: 0,
        }
    }

    #[actix_web::test]
    #[serial]
    async fn create_and_delete_cascades_to_reminder() {
        for ctx in test_contexts().await {
            let user_id = ID::default();
            let event = generate_event(&user_id, "Dinner", 10_000);
            let reminder = Reminder::new(event.id, user_id, 5_000);

            assert!(ctx.repos.events.insert(&event, Some(&reminder)).await.is_ok());
            assert_eq!(ctx.repos.events.find(&event.id).await.unwrap(), Some(event.clone()));
            assert_eq!(
                ctx.repos
                    .reminders
                    .find_by_event(&event.id, &user_id)
                    .await
                    .unwrap(),
                Some(reminder)
            );

            let deleted = ctx.repos.events.delete(&event.id).await.unwrap();
            assert_eq!(deleted, Some(event.clone()));
            assert!(ctx.repos.events.find(&event.id).await.unwrap().is_none());
            assert!(ctx
                .repos
                .reminders
                .find_by_event(&event.id, &user_id)
                .await
                .unwrap()
                .is_none());

            assert!(ctx.repos.events.delete(&event.id).await.unwrap().is_none());
        }
    }

    #[actix_web::test]
    #[serial]
    async fn upsert_keeps_a_single_pending_reminder() {
        for ctx in test_contexts().await {
            let user_id = ID::default();
            let mut event = generate_event(&user_id, "Dinner", 10_000);
            let mut reminder = Reminder::new(event.id, user_id, 5_000);
            reminder.state = ReminderState::Delivered;
            ctx.repos
                .events
                .insert(&event, Some(&reminder))
                .await
                .unwrap();

            event.scheduled_ts = 12_000;
            let replacement = Reminder::new(event.id, user_id, 7_000);
            let stored = ctx
                .repos
                .events
                .save(&event, &ReminderChange::Upsert(replacement))
                .await
                .unwrap()
                .expect("Reminder to be stored");
            assert_eq!(stored.id, reminder.id);
            assert_eq!(stored.remind_at, 7_000);
            assert_eq!(stored.state, ReminderState::Pending);

            let read = ctx
                .repos
                .events
                .find_with_reminder(&event.id)
                .await
                .unwrap()
                .expect("Event to exist");
            assert_eq!(read.event, event);
            assert_eq!(read.reminder, Some(stored));
            let pending = ctx
                .repos
                .reminders
                .find_due(i64::MAX)
                .await
                .unwrap()
                .into_iter()
                .filter(|r| r.event_id == event.id)
                .count();
            assert_eq!(pending, 1);

            let cleared = ctx
                .repos
                .events
                .save(&event, &ReminderChange::Clear)
                .await
                .unwrap();
            assert!(cleared.is_none());
            let read = ctx.repos.events.find_with_reminder(&event.id).await.unwrap();
            assert_eq!(read.map(|r| r.reminder), Some(None));
        }
    }

    #[actix_web::test]
    #[serial]
    async fn save_of_missing_event_writes_nothing() {
        for ctx in test_contexts().await {
            let user_id = ID::default();
            let event = generate_event(&user_id, "Ghost", 10_000);
            let reminder = Reminder::new(event.id, user_id, 5_000);

            assert!(ctx
                .repos
                .events
                .save(&event, &ReminderChange::Upsert(reminder))
                .await
                .is_err());
            assert!(ctx
                .repos
                .reminders
                .find_by_event(&event.id, &user_id)
                .await
                .unwrap()
                .is_none());
        }
    }

    #[actix_web::test]
    #[serial]
    async fn finds_duplicates_excluding_given_event() {
        for ctx in test_contexts().await {
            let user_id = ID::default();
            let event = generate_event(&user_id, "Dinner", 10_000);
            ctx.repos.events.insert(&event, None).await.unwrap();

            let repo = &ctx.repos.events;
            assert!(repo
                .find_duplicate(&user_id, "Dinner", 10_000, None)
                .await
                .unwrap()
                .is_some());
            assert!(repo
                .find_duplicate(&user_id, "Dinner", 10_000, Some(&event.id))
                .await
                .unwrap()
                .is_none());
            assert!(repo
                .find_duplicate(&user_id, "dinner", 10_000, None)
                .await
                .unwrap()
                .is_none());
            assert!(repo
                .find_duplicate(&ID::default(), "Dinner", 10_000, None)
                .await
                .unwrap()
                .is_none());
        }
    }

    #[actix_web::test]
    #[serial]
    async fn lists_events_with_their_reminders() {
        for ctx in test_contexts().await {
            let user_id = ID::default();
            let late = generate_event(&user_id, "Late", 30_000);
            let early = generate_event(&user_id, "Early", 10_000);
            let mut draft = generate_event(&user_id, "Draft", 20_000);
            draft.status = EventStatus::Draft;
            let reminder = Reminder::new(late.id, user_id, 25_000);
            ctx.repos.events.insert(&late, Some(&reminder)).await.unwrap();
            for e in [&early, &draft].iter() {
                ctx.repos.events.insert(e, None).await.unwrap();
            }
            ctx.repos
                .events
                .insert(&generate_event(&ID::default(), "Other", 15_000), None)
                .await
                .unwrap();

            let published = ctx
                .repos
                .events
                .find_published()
                .await
                .unwrap()
                .into_iter()
                .filter(|e| e.user_id == user_id)
                .collect::<Vec<_>>();
            assert_eq!(published, vec![early.clone(), late.clone()]);

            let mut own = ctx
                .repos
                .events
                .find_by_user_with_reminders(&user_id)
                .await
                .unwrap();
            own.sort_by_key(|s| s.event.scheduled_ts);
            let listed = own
                .into_iter()
                .map(|s| (s.event, s.reminder))
                .collect::<Vec<_>>();
            assert_eq!(
                listed,
                vec![(early, None), (draft, None), (late, Some(reminder))]
            );
        }
    }
}
