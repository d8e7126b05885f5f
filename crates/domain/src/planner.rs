use crate::offset::{ReminderOffset, UnknownOffsetKey};

/// The reminder consequence of creating or updating a `CalendarEvent`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderPlan {
    /// Any existing reminder for the event and owner should be removed
    Clear,
    /// The single reminder for the event and owner should trigger at `remind_at`
    Upsert { remind_at: i64 },
}

/// Decides what reminder an event scheduled at `scheduled_ts` should have.
///
/// A reminder whose trigger time is not strictly after `now` is dropped
/// rather than delivered instantly. Both the create and the update path
/// go through this function.
pub fn plan_reminder(scheduled_ts: i64, offset: ReminderOffset, now: i64) -> ReminderPlan {
    let offset = match offset.duration() {
        Some(duration) => duration,
        None => return ReminderPlan::Clear,
    };

    let remind_at = scheduled_ts - offset.num_milliseconds();
    if remind_at <= now {
        return ReminderPlan::Clear;
    }

    ReminderPlan::Upsert { remind_at }
}

/// Same as `plan_reminder` but starting from the raw symbolic key. An absent key
/// means no reminder.
pub fn plan_reminder_for_key(
    scheduled_ts: i64,
    key: Option<&str>,
    now: i64,
) -> Result<ReminderPlan, UnknownOffsetKey> {
    let offset = match key {
        Some(key) => key.parse::<ReminderOffset>()?,
        None => ReminderOffset::None,
    };
    Ok(plan_reminder(scheduled_ts, offset, now))
}
