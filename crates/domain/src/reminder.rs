use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};

/// Delivery state of a `Reminder`. It only ever moves from `Pending`
/// to `Delivered`, unless the trigger time itself is replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderState {
    Pending,
    Delivered,
}

/// A `Reminder` represents a specific time before the occurrence of a
/// `CalendarEvent` at which the owner should be notified.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `CalendarEvent` this `Reminder` is associated with
    pub event_id: ID,
    /// The owner of the `CalendarEvent`
    pub user_id: ID,
    /// The timestamp at which the user should be notified.
    /// Always strictly before the event takes place
    pub remind_at: i64,
    pub state: ReminderState,
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

impl Reminder {
    pub fn new(event_id: ID, user_id: ID, remind_at: i64) -> Self {
        Self {
            id: Default::default(),
            event_id,
            user_id,
            remind_at,
            state: ReminderState::Pending,
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.state == ReminderState::Delivered
    }

    pub fn is_due(&self, now: i64) -> bool {
        !self.is_delivered() && self.remind_at <= now
    }
}
