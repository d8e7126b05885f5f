use super::{IEventRepo, ReminderChange};
use crate::repos::reminder::ReminderRaw;
use eventide_domain::{CalendarEvent, EventStatus, Reminder, ReminderState, ScheduledEvent, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresEventRepo {
    pool: PgPool,
}

impl PostgresEventRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct EventRaw {
    event_uid: Uuid,
    user_uid: Uuid,
    title: String,
    description: Option<String>,
    scheduled_ts: i64,
    location: String,
    status: String,
    created: i64,
    updated: i64,
}

impl TryFrom<EventRaw> for CalendarEvent {
    type Error = anyhow::Error;

    fn try_from(e: EventRaw) -> Result<Self, Self::Error> {
        let status = e
            .status
            .parse::<EventStatus>()
            .map_err(|_| anyhow::anyhow!("Event {} has unknown status {}", e.event_uid, e.status))?;
        Ok(Self {
            id: e.event_uid.into(),
            user_id: e.user_uid.into(),
            title: e.title,
            description: e.description,
            scheduled_ts: e.scheduled_ts,
            location: e.location,
            status,
            created: e.created,
            updated: e.updated,
        })
    }
}

fn into_events(raw: Vec<EventRaw>) -> anyhow::Result<Vec<CalendarEvent>> {
    raw.into_iter().map(CalendarEvent::try_from).collect()
}

/// An event row left joined with the reminder of its owner
#[derive(Debug, FromRow)]
struct ScheduledEventRaw {
    #[sqlx(flatten)]
    event: EventRaw,
    reminder_uid: Option<Uuid>,
    remind_at: Option<i64>,
    delivered: Option<bool>,
}

impl TryFrom<ScheduledEventRaw> for ScheduledEvent {
    type Error = anyhow::Error;

    fn try_from(raw: ScheduledEventRaw) -> Result<Self, Self::Error> {
        let event = CalendarEvent::try_from(raw.event)?;
        let reminder = match (raw.reminder_uid, raw.remind_at, raw.delivered) {
            (Some(reminder_uid), Some(remind_at), Some(delivered)) => Some(Reminder {
                id: reminder_uid.into(),
                event_id: event.id,
                user_id: event.user_id,
                remind_at,
                state: if delivered {
                    ReminderState::Delivered
                } else {
                    ReminderState::Pending
                },
            }),
            _ => None,
        };
        Ok(Self { event, reminder })
    }
}

// A single statement reads from one snapshot, so the event and its reminder
// always come from the same committed write
const SELECT_SCHEDULED_EVENTS: &str = r#"
    SELECT e.*, r.reminder_uid, r.remind_at, r.delivered
    FROM events AS e
    LEFT JOIN reminders AS r
    ON r.event_uid = e.event_uid AND r.user_uid = e.user_uid
"#;

#[async_trait::async_trait]
impl IEventRepo for PostgresEventRepo {
    async fn insert(&self, e: &CalendarEvent, reminder: Option<&Reminder>) -> anyhow::Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO events
            (event_uid, user_uid, title, description, scheduled_ts, location, status, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(e.user_id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.scheduled_ts)
        .bind(&e.location)
        .bind(e.status.as_str())
        .bind(e.created)
        .bind(e.updated)
        .execute(&mut *tx)
        .await?;

        if let Some(reminder) = reminder {
            sqlx::query(
                r#"
                INSERT INTO reminders
                (reminder_uid, event_uid, user_uid, remind_at, delivered)
                VALUES($1, $2, $3, $4, $5)
                "#,
            )
            .bind(reminder.id.inner_ref())
            .bind(reminder.event_id.inner_ref())
            .bind(reminder.user_id.inner_ref())
            .bind(reminder.remind_at)
            .bind(reminder.is_delivered())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn save(
        &self,
        e: &CalendarEvent,
        reminder: &ReminderChange,
    ) -> anyhow::Result<Option<Reminder>> {
        let mut tx = self.pool.begin().await?;

        let res = sqlx::query(
            r#"
            UPDATE events SET
                title = $2,
                description = $3,
                scheduled_ts = $4,
                location = $5,
                status = $6,
                updated = $7
            WHERE event_uid = $1
            "#,
        )
        .bind(e.id.inner_ref())
        .bind(&e.title)
        .bind(&e.description)
        .bind(e.scheduled_ts)
        .bind(&e.location)
        .bind(e.status.as_str())
        .bind(e.updated)
        .execute(&mut *tx)
        .await?;
        if res.rows_affected() == 0 {
            anyhow::bail!("Event {} does not exist", e.id);
        }

        let stored = match reminder {
            ReminderChange::Upsert(reminder) => {
                let raw: ReminderRaw = sqlx::query_as(
                    r#"
                    INSERT INTO reminders
                    (reminder_uid, event_uid, user_uid, remind_at, delivered)
                    VALUES($1, $2, $3, $4, false)
                    ON CONFLICT (event_uid, user_uid) DO UPDATE SET
                        remind_at = EXCLUDED.remind_at,
                        delivered = false
                    RETURNING *
                    "#,
                )
                .bind(reminder.id.inner_ref())
                .bind(reminder.event_id.inner_ref())
                .bind(reminder.user_id.inner_ref())
                .bind(reminder.remind_at)
                .fetch_one(&mut *tx)
                .await?;
                Some(raw.into())
            }
            ReminderChange::Clear => {
                sqlx::query(
                    r#"
                    DELETE FROM reminders
                    WHERE event_uid = $1 AND user_uid = $2
                    "#,
                )
                .bind(e.id.inner_ref())
                .bind(e.user_id.inner_ref())
                .execute(&mut *tx)
                .await?;
                None
            }
        };

        tx.commit().await?;
        Ok(stored)
    }

    async fn find(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        let raw: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.event_uid = $1
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        raw.map(CalendarEvent::try_from).transpose()
    }

    async fn find_with_reminder(&self, event_id: &ID) -> anyhow::Result<Option<ScheduledEvent>> {
        let raw: Option<ScheduledEventRaw> =
            sqlx::query_as(&format!("{} WHERE e.event_uid = $1", SELECT_SCHEDULED_EVENTS))
                .bind(event_id.inner_ref())
                .fetch_optional(&self.pool)
                .await?;

        raw.map(ScheduledEvent::try_from).transpose()
    }

    async fn find_by_user_with_reminders(
        &self,
        user_id: &ID,
    ) -> anyhow::Result<Vec<ScheduledEvent>> {
        let raw: Vec<ScheduledEventRaw> = sqlx::query_as(&format!(
            "{} WHERE e.user_uid = $1 ORDER BY e.scheduled_ts",
            SELECT_SCHEDULED_EVENTS
        ))
        .bind(user_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        raw.into_iter().map(ScheduledEvent::try_from).collect()
    }

    async fn find_duplicate(
        &self,
        user_id: &ID,
        title: &str,
        scheduled_ts: i64,
        excluding: Option<&ID>,
    ) -> anyhow::Result<Option<CalendarEvent>> {
        let raw: Option<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.user_uid = $1 AND
            e.title = $2 AND
            e.scheduled_ts = $3 AND
            ($4::uuid IS NULL OR e.event_uid <> $4)
            LIMIT 1
            "#,
        )
        .bind(user_id.inner_ref())
        .bind(title)
        .bind(scheduled_ts)
        .bind(excluding.map(|id| id.inner()))
        .fetch_optional(&self.pool)
        .await?;

        raw.map(CalendarEvent::try_from).transpose()
    }

    async fn find_published(&self) -> anyhow::Result<Vec<CalendarEvent>> {
        let raw: Vec<EventRaw> = sqlx::query_as(
            r#"
            SELECT * FROM events AS e
            WHERE e.status = $1
            ORDER BY e.scheduled_ts ASC
            "#,
        )
        .bind(EventStatus::Published.as_str())
        .fetch_all(&self.pool)
        .await?;

        into_events(raw)
    }

    async fn delete(&self, event_id: &ID) -> anyhow::Result<Option<CalendarEvent>> {
        // Reminders are removed by the ON DELETE CASCADE constraint
        let raw: Option<EventRaw> = sqlx::query_as(
            r#"
            DELETE FROM events AS e
            WHERE e.event_uid = $1
            RETURNING *
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        raw.map(CalendarEvent::try_from).transpose()
    }
}
