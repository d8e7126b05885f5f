use crate::{
    error::EventideError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventide_api_structs::get_event::*;
use eventide_domain::{ScheduledEvent, ID};
use eventide_infra::EventideContext;

pub async fn get_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<EventideContext>,
) -> Result<HttpResponse, EventideError> {
    let user_id = protect_route(&http_req)?;

    let usecase = GetEventUseCase {
        event_id: path_params.event_id,
        user_id,
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

#[derive(Debug)]
pub struct GetEventUseCase {
    pub event_id: ID,
    pub user_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Forbidden(ID),
    StorageError,
}

impl From<UseCaseError> for EventideError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(event_id) => Self::NotFound(format!(
                "The calendar event with id: {}, was not found.",
                event_id
            )),
            UseCaseError::Forbidden(event_id) => Self::Forbidden(format!(
                "The calendar event with id: {}, is not owned by the requester.",
                event_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetEventUseCase {
    type Response = ScheduledEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEvent";

    async fn execute(&mut self, ctx: &EventideContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.events.find_with_reminder(&self.event_id).await {
            Ok(Some(scheduled)) if scheduled.event.user_id == self.user_id => Ok(scheduled),
            Ok(Some(_)) => Err(UseCaseError::Forbidden(self.event_id)),
            Ok(None) => Err(UseCaseError::NotFound(self.event_id)),
            Err(_) => Err(UseCaseError::StorageError),
        }
    }
}
