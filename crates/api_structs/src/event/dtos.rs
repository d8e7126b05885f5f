use eventide_domain::{
    CalendarEvent, DeliveryKind, DeliveryRecord, EventLabel, EventStatus, Reminder,
    ReminderOffset, ReminderState, ID,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEventDTO {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_ts: i64,
    pub location: String,
    pub status: EventStatus,
    pub user_id: ID,
    pub created: i64,
    pub updated: i64,
    pub label: EventLabel,
}

impl CalendarEventDTO {
    pub fn new(event: CalendarEvent, now: i64) -> Self {
        let label = event.label(now);
        Self {
            id: event.id,
            title: event.title,
            description: event.description,
            scheduled_ts: event.scheduled_ts,
            location: event.location,
            status: event.status,
            user_id: event.user_id,
            created: event.created,
            updated: event.updated,
            label,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub event_id: ID,
    pub remind_at: i64,
    pub offset: ReminderOffset,
    pub delivered: bool,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder, event: &CalendarEvent) -> Self {
        Self {
            id: reminder.id,
            event_id: reminder.event_id,
            remind_at: reminder.remind_at,
            offset: ReminderOffset::from_lead_time(event.scheduled_ts, reminder.remind_at),
            delivered: reminder.state == ReminderState::Delivered,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryRecordDTO {
    pub id: ID,
    pub event_id: ID,
    pub user_id: ID,
    pub message: String,
    pub kind: DeliveryKind,
    pub delivered_at: i64,
}

impl DeliveryRecordDTO {
    pub fn new(record: DeliveryRecord) -> Self {
        Self {
            id: record.id,
            event_id: record.event_id,
            user_id: record.user_id,
            message: record.message,
            kind: record.kind,
            delivered_at: record.delivered_at,
        }
    }
}
