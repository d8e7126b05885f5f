use eventide_api::{Application, ReminderDispatcher};
use eventide_infra::{EventideContext, StaticTimeSys};
use std::sync::Arc;

pub const NOW: i64 = 1_700_000_000_000;
pub const HOUR: i64 = 1000 * 60 * 60;

pub struct TestApp {
    pub address: String,
    pub sys: Arc<StaticTimeSys>,
    pub dispatcher: ReminderDispatcher,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}/api/v1{}", self.address, path)
    }
}

// Launch the application as a background task
pub async fn spawn_app() -> TestApp {
    let mut ctx = EventideContext::create_inmemory();
    ctx.config.port = 0; // Random port
    // Background ticks only run at startup, tests tick the shared dispatcher themselves
    ctx.config.reminder_tick_interval_secs = 60 * 60 * 24;
    let sys = Arc::new(StaticTimeSys::new(NOW));
    ctx.sys = sys.clone();

    let application = Application::new(ctx)
        .await
        .expect("Failed to build application.");
    let dispatcher = application.dispatcher();

    let address = format!("http://localhost:{}", application.port());
    let _ = actix_web::rt::spawn(async move {
        application
            .start()
            .await
            .expect("Expected application to start");
    });

    TestApp {
        address,
        sys,
        dispatcher,
    }
}
