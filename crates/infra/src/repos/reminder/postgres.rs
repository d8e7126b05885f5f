use super::IReminderRepo;
use eventide_domain::{DeliveryRecord, Reminder, ReminderState, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
pub(crate) struct ReminderRaw {
    reminder_uid: Uuid,
    event_uid: Uuid,
    user_uid: Uuid,
    remind_at: i64,
    delivered: bool,
}

impl From<ReminderRaw> for Reminder {
    fn from(r: ReminderRaw) -> Self {
        Self {
            id: r.reminder_uid.into(),
            event_id: r.event_uid.into(),
            user_id: r.user_uid.into(),
            remind_at: r.remind_at,
            state: if r.delivered {
                ReminderState::Delivered
            } else {
                ReminderState::Pending
            },
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn find_by_event(&self, event_id: &ID, user_id: &ID) -> anyhow::Result<Option<Reminder>> {
        let raw: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.event_uid = $1 AND r.user_uid = $2
            "#,
        )
        .bind(event_id.inner_ref())
        .bind(user_id.inner_ref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(raw.map(|r| r.into()))
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        let raw: Vec<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE NOT r.delivered AND r.remind_at <= $1
            ORDER BY r.remind_at
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        Ok(raw.into_iter().map(|r| r.into()).collect())
    }

    async fn deliver(&self, reminder: &Reminder, record: &DeliveryRecord) -> anyhow::Result<bool> {
        let mut tx = self.pool.begin().await?;

        // Locks the row so a concurrent update of the trigger time waits for us
        let pending: Option<ReminderRaw> = sqlx::query_as(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.reminder_uid = $1 AND r.remind_at = $2 AND NOT r.delivered
            FOR UPDATE
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.remind_at)
        .fetch_optional(&mut *tx)
        .await?;

        if pending.is_none() {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO delivery_records
            (record_uid, event_uid, user_uid, message, kind, delivered_at)
            VALUES($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id.inner_ref())
        .bind(record.event_id.inner_ref())
        .bind(record.user_id.inner_ref())
        .bind(&record.message)
        .bind(record.kind.as_str())
        .bind(record.delivered_at)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE reminders SET delivered = true
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
