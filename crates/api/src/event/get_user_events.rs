use crate::{
    error::EventideError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use eventide_api_structs::get_user_events::*;
use eventide_domain::{EventPage, EventQuery, EventSortKey, ScheduledEvent, ID};
use eventide_infra::EventideContext;

const MAX_PAGE_SIZE: usize = 100;

fn parse_query(params: QueryParams) -> Result<EventQuery, EventideError> {
    let mut query = EventQuery::default();

    if let Some(status) = params.status {
        query.status = Some(status.parse().map_err(|_| {
            EventideError::BadClientData(format!("Invalid event status: `{}`", status))
        })?);
    }
    query.sort_by = match params.sort_by.as_deref() {
        None | Some("date") => EventSortKey::ScheduledTs,
        Some("title") => EventSortKey::Title,
        Some("created") => EventSortKey::Created,
        Some(other) => {
            return Err(EventideError::BadClientData(format!(
                "Invalid sort key: `{}`",
                other
            )))
        }
    };
    query.descending = params.sort_order.as_deref() == Some("desc");
    query.start_ts = params.start_ts;
    query.end_ts = params.end_ts;
    query.has_reminder = params.reminder;
    query.search = params.search;
    if let Some(page) = params.page {
        query.page = page.max(1);
    }
    if let Some(limit) = params.limit {
        query.limit = limit.max(1).min(MAX_PAGE_SIZE);
    }

    Ok(query)
}

pub async fn get_user_events_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<EventideContext>,
) -> Result<HttpResponse, EventideError> {
    let user_id = protect_route(&http_req)?;
    let query = parse_query(query_params.0)?;

    let usecase = GetUserEventsUseCase { user_id, query };

    execute(usecase, &ctx)
        .await
        .map(|page| HttpResponse::Ok().json(APIResponse::new(page, ctx.sys.get_timestamp_millis())))
        .map_err(EventideError::from)
}

/// Lists the events owned by the requester together with their reminders
#[derive(Debug)]
pub struct GetUserEventsUseCase {
    pub user_id: ID,
    pub query: EventQuery,
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
impl UseCase for GetUserEventsUseCase {
    type Response = EventPage<ScheduledEvent>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUserEvents";

    async fn execute(&mut self, ctx: &EventideContext) -> Result<Self::Response, Self::Error> {
        let events = ctx
            .repos
            .events
            .find_by_user_with_reminders(&self.user_id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(self
            .query
            .apply(events, |s| (&s.event, s.reminder.is_some())))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::event::{test_helpers::*, CreateEventUseCase};
    use eventide_domain::Reminder;
    use eventide_infra::ReminderChange;

    #[actix_web::test]
    async fn lists_only_own_events_with_their_reminders() {
        let (ctx, _) = setup();
        let user_id = ID::default();
        for (title, reminder) in [("Standup", Some("15m")), ("Retro", None)].iter() {
            let mut usecase = CreateEventUseCase {
                user_id,
                input: valid_input(title, NOW + 2 * HOUR),
                reminder: reminder.map(String::from),
            };
            usecase.execute(&ctx).await.unwrap();
        }
        let mut usecase = CreateEventUseCase {
            user_id: ID::default(),
            input: valid_input("Someone else's", NOW + 2 * HOUR),
            reminder: None,
        };
        usecase.execute(&ctx).await.unwrap();

        let mut usecase = GetUserEventsUseCase {
            user_id,
            query: EventQuery {
                sort_by: EventSortKey::Title,
                ..Default::default()
            },
        };
        let page = usecase.execute(&ctx).await.unwrap();
        assert_eq!(page.total, 2);
        let listed = page
            .items
            .iter()
            .map(|s| (s.event.title.as_str(), s.reminder.as_ref().map(|r| r.remind_at)))
            .collect::<Vec<_>>();
        assert_eq!(
            listed,
            vec![("Retro", None), ("Standup", Some(NOW + 2 * HOUR - 15 * MINUTE))]
        );

        let mut usecase = GetUserEventsUseCase {
            user_id,
            query: EventQuery {
                has_reminder: Some(true),
                ..Default::default()
            },
        };
        let page = usecase.execute(&ctx).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].event.title, "Standup");
    }

    #[actix_web::test]
    async fn lists_each_event_with_the_reminder_it_was_saved_with() {
        let (mut ctx, _) = setup();
        let repo = InterleavingEventRepo::install(&mut ctx);
        let user_id = ID::default();
        let mut usecase = CreateEventUseCase {
            user_id,
            input: valid_input("Standup", NOW + 2 * HOUR),
            reminder: Some("1h".into()),
        };
        let before = usecase.execute(&ctx).await.unwrap();

        let mut moved = before.event.clone();
        moved.scheduled_ts = NOW + 10 * HOUR;
        let reminder = Reminder::new(moved.id, user_id, NOW + 4 * HOUR);
        repo.queue(moved.clone(), ReminderChange::Upsert(reminder));

        let mut usecase = GetUserEventsUseCase {
            user_id,
            query: EventQuery::default(),
        };
        for _ in 0..2 {
            let page = usecase.execute(&ctx).await.unwrap();
            assert_eq!(page.items.len(), 1);
            let listed = &page.items[0];
            let remind_at = listed.reminder.as_ref().unwrap().remind_at;
            assert!(remind_at < listed.event.scheduled_ts);
            assert!(
                (listed.event.scheduled_ts, remind_at) == (NOW + 2 * HOUR, NOW + HOUR)
                    || (listed.event.scheduled_ts, remind_at) == (NOW + 10 * HOUR, NOW + 4 * HOUR)
            );
        }
    }

    #[test]
    fn parses_query_params() {
        let query = parse_query(QueryParams {
            status: Some("DRAFT".into()),
            sort_by: Some("created".into()),
            sort_order: Some("desc".into()),
            page: Some(0),
            limit: Some(1000),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(query.status, Some(eventide_domain::EventStatus::Draft));
        assert_eq!(query.sort_by, EventSortKey::Created);
        assert!(query.descending);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, MAX_PAGE_SIZE);

        assert!(parse_query(QueryParams {
            status: Some("ARCHIVED".into()),
            ..Default::default()
        })
        .is_err());
        assert!(parse_query(QueryParams {
            sort_by: Some("location".into()),
            ..Default::default()
        })
        .is_err());
    }
}
