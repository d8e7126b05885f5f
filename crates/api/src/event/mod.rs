mod create_event;
mod delete_event;
mod get_event;
mod get_event_deliveries;
mod get_public_events;
mod get_user_events;
mod update_event;

use actix_web::web;
use create_event::create_event_controller;
use delete_event::delete_event_controller;
use eventide_api_structs::EventRequestBody;
use eventide_domain::EventInput;
use get_event::get_event_controller;
use get_event_deliveries::get_event_deliveries_controller;
use get_public_events::get_public_events_controller;
use get_user_events::get_user_events_controller;
use update_event::update_event_controller;

#[cfg(test)]
pub(crate) use create_event::CreateEventUseCase;
#[cfg(test)]
pub(crate) use delete_event::DeleteEventUseCase;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/events", web::post().to(create_event_controller));
    cfg.route("/events", web::get().to(get_user_events_controller));
    cfg.route("/events/public", web::get().to(get_public_events_controller));

    cfg.route("/events/{event_id}", web::get().to(get_event_controller));
    cfg.route("/events/{event_id}", web::put().to(update_event_controller));
    cfg.route(
        "/events/{event_id}",
        web::delete().to(delete_event_controller),
    );

    cfg.route(
        "/events/{event_id}/deliveries",
        web::get().to(get_event_deliveries_controller),
    );
}

fn event_input(body: &EventRequestBody) -> EventInput {
    EventInput {
        title: body.title.clone(),
        description: body.description.clone(),
        scheduled_ts: body.scheduled_ts,
        location: body.location.clone(),
        status: body.status.clone(),
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use eventide_domain::{CalendarEvent, EventInput, Reminder, ScheduledEvent, ID};
    use eventide_infra::{EventideContext, IEventRepo, ReminderChange, StaticTimeSys};
    use std::sync::{Arc, Mutex};

    pub const NOW: i64 = 1_700_000_000_000;
    pub const MINUTE: i64 = 1000 * 60;
    pub const HOUR: i64 = 60 * MINUTE;

    pub fn setup() -> (EventideContext, Arc<StaticTimeSys>) {
        let mut ctx = EventideContext::create_inmemory();
        let sys = Arc::new(StaticTimeSys::new(NOW));
        ctx.sys = sys.clone();
        (ctx, sys)
    }

    pub fn valid_input(title: &str, scheduled_ts: i64) -> EventInput {
        EventInput {
            title: title.into(),
            description: None,
            scheduled_ts,
            location: "US-NY: New York".into(),
            status: "PUBLISHED".into(),
        }
    }

    /// Event repo that commits a queued write right after every call to the
    /// inner repo has returned, like a concurrent request landing between two
    /// statements of a use case
    pub struct InterleavingEventRepo {
        inner: Arc<dyn IEventRepo>,
        write: Mutex<Option<(CalendarEvent, ReminderChange)>>,
    }

    impl InterleavingEventRepo {
        /// Installs the repo in front of the events repo of `ctx`
        pub fn install(ctx: &mut EventideContext) -> Arc<Self> {
            let repo = Arc::new(Self {
                inner: ctx.repos.events.clone(),
                write: Mutex::new(None),
            });
            ctx.repos.events = repo.clone();
            repo
        }

        pub fn queue(&self, e: CalendarEvent, change: ReminderChange) {
            *self.write.lock().unwrap() = Some((e, change));
        }

        async fn interleave(&self) {
            let write = self.write.lock().unwrap().take();
            if let Some((e, change)) = write {
                self.inner.save(&e, &change).await.unwrap();
            }
        }
    }

    #[async_trait::async_trait]
    impl IEventRepo for InterleavingEventRepo {
        async fn insert(
            &self,
            e: &CalendarEvent,
            reminder: Option<&Reminder>,
        ) -> anyhow::Result<()> {
            let res = self.inner.insert(e, reminder).await;
            self.interleave().await;
            res
        }

        async fn save(
            &self,
            e: &CalendarEvent,
            reminder: &ReminderChange,
        ) -> anyhow::Result<Option<Reminder>> {
            let res = self.inner.save(e, reminder).await;
            self.interleave().await;
            res
        }

        async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
            let res = self.inner.find(event_id).await;
            self.interleave().await;
            res
        }

        async fn find_with_reminder(
            &self,
            event_id: &ID,
        ) -> anyhow::Result<Option<ScheduledEvent>> {
            let res = self.inner.find_with_reminder(event_id).await;
            self.interleave().await;
            res
        }

        async fn find_by_user_with_reminders(
            &self,
            user_id: &ID,
        ) -> anyhow::Result<Vec<ScheduledEvent>> {
            let res = self.inner.find_by_user_with_reminders(user_id).await;
            self.interleave().await;
            res
        }

        async fn find_duplicate(
            &self,
            user_id: &ID,
            title: &str,
            scheduled_ts: i64,
            excluding: Option<&ID>,
        ) -> anyhow::Result<Option<CalendarEvent>> {
            let res = self
                .inner
                .find_duplicate(user_id, title, scheduled_ts, excluding)
                .await;
            self.interleave().await;
            res
        }

        async fn find_published(&self) -> anyhow::Result<Vec<CalendarEvent>> {
            let res = self.inner.find_published().await;
            self.interleave().await;
            res
        }

        async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
            let res = self.inner.delete(event_id).await;
            self.interleave().await;
            res
        }
    }
}
