use crate::{
    reminder::{DispatchDueRemindersUseCase, DispatchSummary},
    shared::usecase::execute,
};
use eventide_infra::EventideContext;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, warn};

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Another tick was still running
    Skipped,
    Completed(DispatchSummary),
    /// Storage failed. Undelivered reminders are picked up by the next tick.
    Failed,
}

/// Runs the dispatch of due reminders, never more than one at a time
#[derive(Clone)]
pub struct ReminderDispatcher {
    ctx: EventideContext,
    in_flight: Arc<Mutex<()>>,
}

impl ReminderDispatcher {
    pub fn new(ctx: EventideContext) -> Self {
        Self {
            ctx,
            in_flight: Arc::new(Mutex::new(())),
        }
    }

    pub async fn tick(&self) -> TickOutcome {
        let _in_flight = match self.in_flight.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                warn!("Previous reminder dispatch is still running. Skipping this tick.");
                return TickOutcome::Skipped;
            }
        };

        match execute(DispatchDueRemindersUseCase {}, &self.ctx).await {
            Ok(summary) => TickOutcome::Completed(summary),
            Err(_) => TickOutcome::Failed,
        }
    }

    /// Runs a tick and reports it as stalled when it is still running after
    /// `deadline`. A stalled tick is awaited to completion, never cancelled.
    pub async fn tick_with_deadline(&self, deadline: Duration) -> TickReport {
        let started = Instant::now();
        let tick = self.tick();
        tokio::pin!(tick);

        tokio::select! {
            outcome = &mut tick => TickReport { outcome, stalled: false },
            _ = tokio::time::sleep(deadline) => {
                error!(
                    "Reminder dispatch is still running after {:?}, the tick interval",
                    deadline
                );
                let outcome = tick.await;
                warn!(
                    "Stalled reminder dispatch finished after {:?}",
                    started.elapsed()
                );
                TickReport { outcome, stalled: true }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    pub outcome: TickOutcome,
    /// The tick ran past its deadline
    pub stalled: bool,
}

pub fn start_reminder_dispatcher_job(dispatcher: ReminderDispatcher) {
    let period = Duration::from_secs(dispatcher.ctx.config.reminder_tick_interval_secs);

    actix_web::rt::spawn(async move {
        // Minutely ticks are aligned with the wall clock minute
        let start_delay = if period == Duration::from_secs(60) {
            let now = dispatcher.ctx.sys.get_timestamp_millis();
            get_start_delay(now as usize, 0) as u64
        } else {
            0
        };
        let start = Instant::now() + Duration::from_secs(start_delay);

        let mut ticks = interval_at(start, period);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticks.tick().await;
            dispatcher.tick_with_deadline(period).await;
        }
    });
}
