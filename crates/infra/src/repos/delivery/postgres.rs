use super::IDeliveryRepo;
use eventide_domain::{DeliveryKind, DeliveryRecord, ID};
use sqlx::{types::Uuid, FromRow, PgPool};

pub struct PostgresDeliveryRepo {
    pool: PgPool,
}

impl PostgresDeliveryRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct DeliveryRecordRaw {
    record_uid: Uuid,
    event_uid: Uuid,
    user_uid: Uuid,
    message: String,
    // Only automatic deliveries exist for now
    #[allow(dead_code)]
    kind: String,
    delivered_at: i64,
}

impl From<DeliveryRecordRaw> for DeliveryRecord {
    fn from(d: DeliveryRecordRaw) -> Self {
        Self {
            id: d.record_uid.into(),
            event_id: d.event_uid.into(),
            user_id: d.user_uid.into(),
            message: d.message,
            kind: DeliveryKind::Auto,
            delivered_at: d.delivered_at,
        }
    }
}

#[async_trait::async_trait]
impl IDeliveryRepo for PostgresDeliveryRepo {
    async fn find_by_event(&self, event_id: &ID) -> anyhow::Result<Vec<DeliveryRecord>> {
        let raw: Vec<DeliveryRecordRaw> = sqlx::query_as(
            r#"
            SELECT * FROM delivery_records AS d
            WHERE d.event_uid = $1
            ORDER BY d.delivered_at
            "#,
        )
        .bind(event_id.inner_ref())
        .fetch_all(&self.pool)
        .await?;

        Ok(raw.into_iter().map(|d| d.into()).collect())
    }
}
