use crate::{
    event::CalendarEvent,
    reminder::Reminder,
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DeliveryKind {
    /// Produced by the reminder dispatcher
    Auto,
}

impl DeliveryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "AUTO",
        }
    }
}

/// Append-only record that a due `Reminder` was surfaced to its user.
/// Records outlive the `CalendarEvent` they refer to.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRecord {
    pub id: ID,
    pub event_id: ID,
    pub user_id: ID,
    pub message: String,
    pub kind: DeliveryKind,
    pub delivered_at: i64,
}

impl Entity for DeliveryRecord {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl DeliveryRecord {
    pub fn new(reminder: &Reminder, event: &CalendarEvent, delivered_at: i64) -> Self {
        let message = format!(
            "[REMINDER] Event: {}, User: {}, Time: {}",
            event.title,
            reminder.user_id,
            relative_time_phrase(event.scheduled_ts, delivered_at)
        );
        Self {
            id: Default::default(),
            event_id: reminder.event_id,
            user_id: reminder.user_id,
            message,
            kind: DeliveryKind::Auto,
            delivered_at,
        }
    }
}

const SECOND: f64 = 1000.0;
const MINUTE: f64 = 60.0 * SECOND;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const MONTH: f64 = 30.4375 * DAY;
const YEAR: f64 = 365.25 * DAY;

/// Humanized description of `ts` as seen from `now`, e.g. "in an hour"
/// or "3 days ago".
pub fn relative_time_phrase(ts: i64, now: i64) -> String {
    let diff = (ts - now) as f64;
    let abs = diff.abs();
    let in_units = |unit: f64| (abs / unit).round() as i64;

    let seconds = in_units(SECOND);
    let minutes = in_units(MINUTE);
    let hours = in_units(HOUR);
    let days = in_units(DAY);
    let months = in_units(MONTH);

    let amount = if seconds <= 44 {
        "a few seconds".to_string()
    } else if seconds <= 89 {
        "a minute".to_string()
    } else if minutes <= 44 {
        format!("{} minutes", minutes)
    } else if minutes <= 89 {
        "an hour".to_string()
    } else if hours <= 21 {
        format!("{} hours", hours)
    } else if hours <= 35 {
        "a day".to_string()
    } else if days <= 25 {
        format!("{} days", days)
    } else if days <= 45 {
        "a month".to_string()
    } else if months <= 10 {
        format!("{} months", months)
    } else if months <= 17 {
        "a year".to_string()
    } else {
        format!("{} years", in_units(YEAR))
    };

    if diff >= 0.0 {
        format!("in {}", amount)
    } else {
        format!("{} ago", amount)
    }
}
