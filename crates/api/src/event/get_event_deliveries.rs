use crate::{
    error::EventideError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventide_api_structs::get_event_deliveries::*;
use eventide_domain::{DeliveryRecord, ID};
use eventide_infra::EventideContext;

pub async fn get_event_deliveries_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<EventideContext>,
) -> Result<HttpResponse, EventideError> {
    let user_id = protect_route(&http_req)?;

    let usecase = GetEventDeliveriesUseCase {
        event_id: path_params.event_id,
        user_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|deliveries| HttpResponse::Ok().json(APIResponse::new(deliveries)))
        .map_err(EventideError::from)
}

/// The reminders that were delivered to the requester for an event. This also
/// works after the event itself has been deleted.
#[derive(Debug)]
pub struct GetEventDeliveriesUseCase {
    pub event_id: ID,
    pub user_id: ID,
}

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
impl UseCase for GetEventDeliveriesUseCase {
    type Response = Vec<DeliveryRecord>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetEventDeliveries";

    async fn execute(&mut self, ctx: &EventideContext) -> Result<Self::Response, Self::Error> {
        let deliveries = ctx
            .repos
            .deliveries
            .find_by_event(&self.event_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(deliveries
            .into_iter()
            .filter(|d| d.user_id == self.user_id)
            .collect())
    }
}
