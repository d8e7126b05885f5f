use crate::{
    error::EventideError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use eventide_api_structs::get_public_events::*;
use eventide_domain::CalendarEvent;
use eventide_infra::EventideContext;

pub async fn get_public_events_controller(
    ctx: web::Data<EventideContext>,
) -> Result<HttpResponse, EventideError> {
    let usecase = GetPublicEventsUseCase {};

    execute(usecase, &ctx)
        .await
        .map(|events| {
            HttpResponse::Ok().json(APIResponse::new(events, ctx.sys.get_timestamp_millis()))
        })
        .map_err(EventideError::from)
}

/// Lists the published events of every user, soonest first
#[derive(Debug)]
pub struct GetPublicEventsUseCase {}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for EventideError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetPublicEventsUseCase {
    type Response = Vec<CalendarEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetPublicEvents";

    async fn execute(&mut self, ctx: &EventideContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .events
            .find_published()
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
