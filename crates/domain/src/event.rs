use crate::{
    reminder::Reminder,
    shared::entity::{Entity, ID},
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventStatus {
    Draft,
    Published,
    Canceled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Published => "PUBLISHED",
            Self::Canceled => "CANCELED",
        }
    }
}

impl FromStr for EventStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DRAFT" => Ok(Self::Draft),
            "PUBLISHED" => Ok(Self::Published),
            "CANCELED" => Ok(Self::Canceled),
            _ => Err(()),
        }
    }
}

/// A `CalendarEvent` published by a user. It is owned exclusively by
/// the user who created it and has at most one `Reminder`.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    /// Timestamp in millis at which the event takes place
    pub scheduled_ts: i64,
    /// "REGION-SUBREGION: free text", e.g. "US-NY: New York"
    pub location: String,
    pub status: EventStatus,
    pub user_id: ID,
    pub created: i64,
    pub updated: i64,
}

impl Entity for CalendarEvent {
    fn id(&self) -> &ID {
        &self.id
    }
}

/// A `CalendarEvent` together with its `Reminder`, as they were committed
/// by the same write
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledEvent {
    pub event: CalendarEvent,
    pub reminder: Option<Reminder>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLabel {
    Past,
    New,
    Upcoming,
}

const DAY_MILLIS: i64 = 1000 * 60 * 60 * 24;

impl CalendarEvent {
    /// Events coming up within two weeks are labeled `New`
    pub fn label(&self, now: i64) -> EventLabel {
        let diff = self.scheduled_ts - now;
        let diff_in_days = (diff as f64 / DAY_MILLIS as f64).floor() as i64;
        if diff_in_days < 0 {
            EventLabel::Past
        } else if diff_in_days <= 14 {
            EventLabel::New
        } else {
            EventLabel::Upcoming
        }
    }

    /// Two events of the same owner collide when both title and time are identical
    pub fn collides_with(&self, title: &str, scheduled_ts: i64) -> bool {
        self.title == title && self.scheduled_ts == scheduled_ts
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn event_at(scheduled_ts: i64) -> CalendarEvent {
        CalendarEvent {
            id: Default::default(),
            title: "Standup".into(),
            description: None,
            scheduled_ts,
            location: "NO-OS: Oslo".into(),
            status: EventStatus::Published,
            user_id: Default::default(),
            created: 0,
            updated: 0,
        }
    }

    #[test]
    fn labels_events_relative_to_now() {
        let now = 100 * DAY_MILLIS;
        assert_eq!(event_at(now - 1).label(now), EventLabel::Past);
        assert_eq!(event_at(now).label(now), EventLabel::New);
        assert_eq!(event_at(now + 14 * DAY_MILLIS).label(now), EventLabel::New);
        assert_eq!(
            event_at(now + 15 * DAY_MILLIS).label(now),
            EventLabel::Upcoming
        );
    }

    #[test]
    fn collision_is_exact_and_case_sensitive() {
        let e = event_at(500);
        assert!(e.collides_with("Standup", 500));
        assert!(!e.collides_with("standup", 500));
        assert!(!e.collides_with("Standup", 501));
    }

    #[test]
    fn status_parses_uppercase_names() {
        assert_eq!("DRAFT".parse::<EventStatus>(), Ok(EventStatus::Draft));
        assert_eq!("CANCELED".parse::<EventStatus>(), Ok(EventStatus::Canceled));
        assert!("published".parse::<EventStatus>().is_err());
    }
}
