use crate::error::EventideError;
use crate::shared::{
    auth::protect_route,
    usecase::{execute, UseCase},
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventide_api_structs::delete_event::*;
use eventide_domain::{CalendarEvent, ID};
use eventide_infra::EventideContext;

pub async fn delete_event_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<EventideContext>,
) -> Result<HttpResponse, EventideError> {
    let user_id = protect_route(&http_req)?;

    let usecase = DeleteEventUseCase {
        user_id,
        event_id: path_params.event_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|event| {
            HttpResponse::Ok().json(APIResponse::new(
                event,
                None,
                ctx.sys.get_timestamp_millis(),
            ))
        })
        .map_err(EventideError::from)
}

/// Deletes an event and its reminder. Delivery records of the event are kept.
#[derive(Debug)]
pub struct DeleteEventUseCase {
    pub user_id: ID,
    pub event_id: ID,
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
impl UseCase for DeleteEventUseCase {
    type Response = CalendarEvent;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteEvent";

    async fn execute(&mut self, ctx: &EventideContext) -> Result<Self::Response, Self::Error> {
        match ctx.repos.events.find(&self.event_id).await {
            Ok(Some(event)) if event.user_id == self.user_id => (),
            Ok(Some(_)) => return Err(UseCaseError::Forbidden(self.event_id)),
            Ok(None) => return Err(UseCaseError::NotFound(self.event_id)),
            Err(_) => return Err(UseCaseError::StorageError),
        };

        ctx.repos
            .events
            .delete(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?
            // Deleted concurrently by another request
            .ok_or(UseCaseError::NotFound(self.event_id))
    }
}
