use crate::dtos::{CalendarEventDTO, DeliveryRecordDTO, ReminderDTO};
use eventide_domain::{CalendarEvent, DeliveryRecord, Reminder, ID};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventResponse {
    pub event: CalendarEventDTO,
    pub reminder: Option<ReminderDTO>,
}

impl CalendarEventResponse {
    pub fn new(event: CalendarEvent, reminder: Option<Reminder>, now: i64) -> Self {
        let reminder = reminder.map(|r| ReminderDTO::new(r, &event));
        Self {
            event: CalendarEventDTO::new(event, now),
            reminder,
        }
    }
}

/// Body shared by event creation and update. The reminder is the symbolic
/// offset key, e.g. "1h", and defaults to no reminder.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EventRequestBody {
    pub title: String,
    pub description: Option<String>,
    pub scheduled_ts: i64,
    pub location: String,
    pub status: String,
    pub reminder: Option<String>,
}

pub mod create_event {
    use super::*;

    pub type RequestBody = EventRequestBody;

    pub type APIResponse = CalendarEventResponse;
}

pub mod update_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type RequestBody = EventRequestBody;

    pub type APIResponse = CalendarEventResponse;
}

pub mod delete_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod get_event {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    pub type APIResponse = CalendarEventResponse;
}

pub mod get_user_events {
    use super::*;
    use eventide_domain::{EventPage, ScheduledEvent};

    #[derive(Deserialize, Serialize, Debug, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct QueryParams {
        pub status: Option<String>,
        pub start_ts: Option<i64>,
        pub end_ts: Option<i64>,
        pub reminder: Option<bool>,
        pub search: Option<String>,
        pub sort_by: Option<String>,
        pub sort_order: Option<String>,
        pub page: Option<usize>,
        pub limit: Option<usize>,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct PageMeta {
        pub total: usize,
        pub page: usize,
        pub limit: usize,
        pub total_pages: usize,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<CalendarEventResponse>,
        pub meta: PageMeta,
    }

    impl APIResponse {
        pub fn new(page: EventPage<ScheduledEvent>, now: i64) -> Self {
            let meta = PageMeta {
                total: page.total,
                page: page.page,
                limit: page.limit,
                total_pages: page.total_pages(),
            };
            Self {
                events: page
                    .items
                    .into_iter()
                    .map(|s| CalendarEventResponse::new(s.event, s.reminder, now))
                    .collect(),
                meta,
            }
        }
    }
}

pub mod get_public_events {
    use super::*;

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub events: Vec<CalendarEventDTO>,
    }

    impl APIResponse {
        pub fn new(events: Vec<CalendarEvent>, now: i64) -> Self {
            Self {
                events: events
                    .into_iter()
                    .map(|e| CalendarEventDTO::new(e, now))
                    .collect(),
            }
        }
    }
}

pub mod get_event_deliveries {
    use super::*;

    #[derive(Deserialize)]
    pub struct PathParams {
        pub event_id: ID,
    }

    #[derive(Deserialize, Serialize, Debug)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deliveries: Vec<DeliveryRecordDTO>,
    }

    impl APIResponse {
        pub fn new(deliveries: Vec<DeliveryRecord>) -> Self {
            Self {
                deliveries: deliveries.into_iter().map(DeliveryRecordDTO::new).collect(),
            }
        }
    }
}
