use super::event_input;
use crate::error::EventideError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventide_api_structs::update_event::*;
use eventide_domain::{
    plan_reminder_for_key, EventInput, FieldError, Reminder, ReminderPlan, ScheduledEvent, ID,
};
use eventide_infra::{EventideContext, ReminderChange};

pub async fn update_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    path_params: web::Path<PathParams>,
    ctx: web::Data<EventideContext>,
) -> Result<HttpResponse, EventideError> {
    let user_id = protect_route(&http_req)?;

    let body = body.0;
    let usecase = UpdateEventUseCase {
        user_id,
        event_id: path_params.event_id,
        input: event_input(&body),
        reminder: body.reminder,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(
                res.event,
                res.reminder,
                ctx.sys.get_timestamp_millis(),
            ))
        })
        .map_err(EventideError::from)
}

/// Replaces the fields of an event and reconciles its single reminder
/// in the same atomic write
#[derive(Debug)]
pub struct UpdateEventUseCase {
    pub user_id: ID,
    pub event_id: ID,
    pub input: EventInput,
    /// Symbolic reminder offset key, `None` removes the reminder
    pub reminder: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    Validation(Vec<FieldError>),
    UnknownOffsetKey(String),
    NotFound(ID),
    Forbidden(ID),
    DuplicateEvent,
    StorageError,
}

impl From<UseCaseError> for EventideError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::Validation(errors) => Self::InvalidFields(errors),
            UseCaseError::UnknownOffsetKey(key) => {
                Self::BadClientData(format!("Invalid reminder option: `{}`", key))
            }
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::Forbidden(event_id) => Self::Forbidden(format!(
                "The calendar event with id: {}, is not owned by the requester.",
                event_id
            )),
            UseCaseError::DuplicateEvent => {
                Self::Conflict("You already have an event with this title and date.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateEventUseCase {
    type Response = ScheduledEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateEvent";

    async fn execute(&mut self, ctx: &EventideContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let input = self
            .input
            .clone()
            .validate(now)
            .map_err(UseCaseError::Validation)?;
        let plan = plan_reminder_for_key(input.scheduled_ts, self.reminder.as_deref(), now)
            .map_err(|e| UseCaseError::UnknownOffsetKey(e.0))?;

        let mut e = match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(event)) if event.user_id == self.user_id => event,
            Ok(Some(_)) => return Err(UseCaseError::Forbidden(self.event_id)),
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        let duplicate = ctx
            .repos
            .events
            .find_duplicate(
                &self.user_id,
                &input.title,
                input.scheduled_ts,
                Some(&e.id),
            )
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if duplicate.is_some() {
            return Err(UseCaseError::DuplicateEvent);
        }

        e.title = input.title;
        e.description = input.description;
        e.scheduled_ts = input.scheduled_ts;
        e.location = input.location;
        e.status = input.status;
        e.updated = now;

        let change = match plan {
            ReminderPlan::Upsert { remind_at } => {
                ReminderChange::Upsert(Reminder::new(e.id, e.user_id, remind_at))
            }
            ReminderPlan::Clear => ReminderChange::Clear,
        };

        // The stored reminder keeps its original id when it is replaced
        let reminder = ctx
            .repos
            .events
            .save(&e, &change)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(ScheduledEvent { event: e, reminder })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::{test_helpers::*, CreateEventUseCase, DeleteEventUseCase};
    use eventide_domain::ReminderState;

    async fn create_event(
        ctx: &EventideContext,
        user_id: ID,
        scheduled_ts: i64,
        reminder: Option<&str>,
    ) -> ScheduledEvent {
        let mut usecase = CreateEventUseCase {
            user_id,
            input: valid_input("Quarterly review", scheduled_ts),
            reminder: reminder.map(String::from),
        };
        usecase.execute(ctx).await.unwrap()
    }

    fn update(event: &ScheduledEvent, scheduled_ts: i64, reminder: Option<&str>) -> UpdateEventUseCase {
        UpdateEventUseCase {
            user_id: event.event.user_id,
            event_id: event.event.id,
            input: valid_input(&event.event.title, scheduled_ts),
            reminder: reminder.map(String::from),
        }
    }

    #[actix_web::test]
    async fn update_nonexisting_event() {
        let (ctx, _) = setup();
        let mut usecase = UpdateEventUseCase {
            user_id: ID::default(),
            event_id: ID::default(),
            input: valid_input("Ghost", NOW + HOUR),
            reminder: None,
        };
        let res = usecase.execute(&ctx).await;
        assert_eq!(res.unwrap_err(), UseCaseError::NotFound(usecase.event_id));
    }

    #[actix_web::test]
    async fn rejects_update_from_non_owner() {
        let (ctx, _) = setup();
        let created = create_event(&ctx, ID::default(), NOW + 2 * HOUR, Some("1h")).await;

        let mut usecase = update(&created, NOW + 3 * HOUR, None);
        usecase.user_id = ID::default();
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::Forbidden(created.event.id)
        );

        // Nothing changed
        assert_eq!(
            ctx.repos.events.find(&created.event.id).await.unwrap(),
            Some(created.event.clone())
        );
        assert_eq!(
            ctx.repos
                .reminders
                .find_by_event(&created.event.id, &created.event.user_id)
                .await
                .unwrap(),
            created.reminder
        );
    }

    #[actix_web::test]
    async fn moving_event_too_close_clears_reminder() {
        let (ctx, _) = setup();
        let created = create_event(&ctx, ID::default(), NOW + 2 * HOUR, Some("1h")).await;

        let mut usecase = update(&created, NOW + 5 * MINUTE, Some("1h"));
        let res = usecase.execute(&ctx).await.unwrap();

        assert!(res.reminder.is_none());
        assert_eq!(res.event.scheduled_ts, NOW + 5 * MINUTE);
        assert_eq!(
            ctx.repos.events.find(&created.event.id).await.unwrap(),
            Some(res.event)
        );
        assert!(ctx
            .repos
            .reminders
            .find_by_event(&created.event.id, &created.event.user_id)
            .await
            .unwrap()
            .is_none());
    }

    #[actix_web::test]
    async fn rescheduling_replaces_trigger_and_resets_delivery() {
        let (ctx, sys) = setup();
        let created = create_event(&ctx, ID::default(), NOW + 2 * HOUR, Some("1h")).await;
        let original = created.reminder.clone().unwrap();

        // Pretend the reminder was already delivered
        let event = created.event.clone();
        let record = eventide_domain::DeliveryRecord::new(&original, &event, NOW + HOUR);
        assert!(ctx.repos.reminders.deliver(&original, &record).await.unwrap());

        sys.advance(HOUR + MINUTE);
        let mut usecase = update(&created, NOW + 5 * HOUR, Some("30m"));
        let res = usecase.execute(&ctx).await.unwrap();

        let reminder = res.reminder.expect("Reminder to be replanned");
        assert_eq!(reminder.id, original.id);
        assert_eq!(reminder.remind_at, NOW + 5 * HOUR - 30 * MINUTE);
        assert_eq!(reminder.state, ReminderState::Pending);
    }

    #[actix_web::test]
    async fn rejects_duplicate_of_other_event_but_not_of_itself() {
        let (ctx, _) = setup();
        let user_id = ID::default();
        let first = create_event(&ctx, user_id, NOW + 2 * HOUR, None).await;
        let second = create_event(&ctx, user_id, NOW + 3 * HOUR, Some("1h")).await;

        // Keeping its own title and time is fine
        let mut usecase = update(&second, NOW + 3 * HOUR, Some("2h"));
        assert!(usecase.execute(&ctx).await.is_ok());

        let mut usecase = update(&second, NOW + 2 * HOUR, None);
        assert_eq!(
            usecase.execute(&ctx).await.unwrap_err(),
            UseCaseError::DuplicateEvent
        );
        assert_eq!(
            ctx.repos
                .events
                .find(&second.event.id)
                .await
                .unwrap()
                .unwrap()
                .scheduled_ts,
            NOW + 3 * HOUR
        );
        assert!(ctx.repos.events.find(&first.event.id).await.unwrap().is_some());
    }

    async fn count_reminders(ctx: &EventideContext, event_id: &ID) -> usize {
        ctx.repos
            .reminders
            .find_due(i64::MAX)
            .await
            .unwrap()
            .into_iter()
            .filter(|r| r.event_id == *event_id)
            .count()
    }

    #[actix_web::test]
    async fn never_more_than_one_reminder_per_event() {
        let (ctx, _) = setup();
        let created = create_event(&ctx, ID::default(), NOW + 10 * HOUR, Some("1h")).await;
        let event_id = created.event.id;

        assert_eq!(count_reminders(&ctx, &event_id).await, 1);

        for reminder in [Some("none"), Some("1h"), Some("2h"), None, Some("6h"), Some("1h")].iter() {
            let mut usecase = update(&created, NOW + 10 * HOUR, *reminder);
            usecase.execute(&ctx).await.unwrap();
            assert!(count_reminders(&ctx, &event_id).await <= 1);
        }
        assert_eq!(count_reminders(&ctx, &event_id).await, 1);

        let mut usecase = DeleteEventUseCase {
            user_id: created.event.user_id,
            event_id,
        };
        usecase.execute(&ctx).await.unwrap();
        assert_eq!(count_reminders(&ctx, &event_id).await, 0);
    }
}
