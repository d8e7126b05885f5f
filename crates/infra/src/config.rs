use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the application to run on
    pub port: usize,
    /// How often the reminder dispatcher looks for due reminders, in seconds
    pub reminder_tick_interval_secs: u64,
    /// Postgres connection string. In-memory repositories are used when absent
    pub database_url: Option<String>,
}

const DEFAULT_PORT: usize = 5000;
const DEFAULT_TICK_INTERVAL_SECS: u64 = 60;

impl Config {
    pub fn new() -> Self {
        let port = match std::env::var("PORT") {
            Ok(port) => match port.parse::<usize>() {
                Ok(port) => port,
                Err(_) => {
                    warn!(
                        "The given PORT: {} is not valid, falling back to the default port: {}.",
                        port, DEFAULT_PORT
                    );
                    DEFAULT_PORT
                }
            },
            Err(_) => DEFAULT_PORT,
        };

        let reminder_tick_interval_secs = match std::env::var("REMINDER_TICK_INTERVAL_SECS") {
            Ok(secs) => match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    warn!(
                        "The given REMINDER_TICK_INTERVAL_SECS: {} is not valid, falling back to {} seconds.",
                        secs, DEFAULT_TICK_INTERVAL_SECS
                    );
                    DEFAULT_TICK_INTERVAL_SECS
                }
            },
            Err(_) => DEFAULT_TICK_INTERVAL_SECS,
        };

        let database_url = std::env::var("DATABASE_URL").ok();
        if database_url.is_none() {
            info!("Did not find DATABASE_URL environment variable. Going to use inmemory infra.");
        }

        Self {
            port,
            reminder_tick_interval_secs,
            database_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
