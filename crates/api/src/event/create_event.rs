use super::event_input;
use crate::error::EventideError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventide_api_structs::create_event::*;
use eventide_domain::{
    plan_reminder_for_key, CalendarEvent, EventInput, FieldError, Reminder, ReminderPlan,
    ScheduledEvent, ID,
};
use eventide_infra::EventideContext;

pub async fn create_event_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<EventideContext>,
) -> Result<HttpResponse, EventideError> {
    let user_id = protect_route(&http_req)?;

    let body = body.0;
    let usecase = CreateEventUseCase {
        user_id,
        input: event_input(&body),
        reminder: body.reminder,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Created().json(APIResponse::new(
                res.event,
                res.reminder,
                ctx.sys.get_timestamp_millis(),
            ))
        })
        .map_err(EventideError::from)
}

#[derive(Debug)]
pub struct CreateEventUseCase {
    pub user_id: ID,
    pub input: EventInput,
    /// Symbolic reminder offset key, `None` for no reminder
    pub reminder: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    Validation(Vec<FieldError>),
    UnknownOffsetKey(String),
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
            UseCaseError::DuplicateEvent => {
                Self::Conflict("You already have an event with this title and date.".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateEventUseCase {
    type Response = ScheduledEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateEvent";

    async fn execute(&mut self, ctx: &EventideContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let input = self
            .input
            .clone()
            .validate(now)
            .map_err(UseCaseError::Validation)?;
        let plan = plan_reminder_for_key(input.scheduled_ts, self.reminder.as_deref(), now)
            .map_err(|e| UseCaseError::UnknownOffsetKey(e.0))?;

        let duplicate = ctx
            .repos
            .events
            .find_duplicate(&self.user_id, &input.title, input.scheduled_ts, None)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if duplicate.is_some() {
            return Err(UseCaseError::DuplicateEvent);
        }

        let e = CalendarEvent {
            id: Default::default(),
            title: input.title,
            description: input.description,
            scheduled_ts: input.scheduled_ts,
            location: input.location,
            status: input.status,
            user_id: self.user_id,
            created: now,
            updated: now,
        };

        // Nothing to clear for an event that does not exist yet
        let reminder = match plan {
            ReminderPlan::Upsert { remind_at } => Some(Reminder::new(e.id, e.user_id, remind_at)),
            ReminderPlan::Clear => None,
        };

        ctx.repos
            .events
            .insert(&e, reminder.as_ref())
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(ScheduledEvent { event: e, reminder })
    }
}
