mod delivery;
mod event;
mod event_query;
mod offset;
mod planner;
mod reminder;
mod shared;
mod validation;

pub use delivery::{relative_time_phrase, DeliveryKind, DeliveryRecord};
pub use event::{CalendarEvent, EventLabel, EventStatus, ScheduledEvent};
pub use event_query::{EventPage, EventQuery, EventSortKey};
pub use offset::{ReminderOffset, UnknownOffsetKey};
pub use planner::{plan_reminder, plan_reminder_for_key, ReminderPlan};
pub use reminder::{Reminder, ReminderState};
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use validation::{EventInput, FieldError, ValidEventInput};
