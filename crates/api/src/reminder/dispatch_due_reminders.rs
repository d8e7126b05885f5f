use crate::shared::usecase::UseCase;
use eventide_domain::DeliveryRecord;
use eventide_infra::EventideContext;
use tracing::{info, warn};

/// One pass over the reminders that have come due.
///
/// Selection is re-evaluated against storage on every pass, and each delivery
/// is committed together with the `delivered` flag. A pass that is retried
/// after a failure therefore picks up exactly the reminders that were not
/// delivered yet.
#[derive(Debug)]
pub struct DispatchDueRemindersUseCase {}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Pending reminders whose trigger time had arrived
    pub due: usize,
    pub delivered: usize,
    /// Reminders that changed or disappeared between selection and delivery
    pub skipped: usize,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for DispatchDueRemindersUseCase {
    type Response = DispatchSummary;

    type Error = UseCaseError;

    const NAME: &'static str = "DispatchDueReminders";

    async fn execute(&mut self, ctx: &EventideContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due = ctx
            .repos
            .reminders
            .find_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut summary = DispatchSummary {
            due: due.len(),
            ..Default::default()
        };

        for reminder in due {
            let event = match ctx.repos.events.find(&reminder.event_id).await {
                Ok(Some(event)) => event,
                Ok(None) => {
                    // Event got deleted after the reminder was selected
                    summary.skipped += 1;
                    continue;
                }
                Err(_) => return Err(UseCaseError::StorageError),
            };

            let record = DeliveryRecord::new(&reminder, &event, now);
            let delivered = ctx
                .repos
                .reminders
                .deliver(&reminder, &record)
                .await
                .map_err(|_| UseCaseError::StorageError)?;

            if delivered {
                info!(
                    event_id = %record.event_id,
                    user_id = %record.user_id,
                    "{}",
                    record.message
                );
                summary.delivered += 1;
            } else {
                warn!(
                    reminder_id = %reminder.id,
                    "Reminder changed before it could be delivered"
                );
                summary.skipped += 1;
            }
        }

        Ok(summary)
    }
}
