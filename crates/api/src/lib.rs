mod error;
mod event;
mod job_schedulers;
mod reminder;
mod shared;
mod status;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware, web, App, HttpServer};
use eventide_infra::EventideContext;
use job_schedulers::start_reminder_dispatcher_job;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub use job_schedulers::{ReminderDispatcher, TickOutcome, TickReport};
pub use reminder::DispatchSummary;
pub use shared::auth::USER_HEADER;

pub fn configure_server_api(cfg: &mut web::ServiceConfig) {
    event::configure_routes(cfg);
    status::configure_routes(cfg);
}

pub struct Application {
    server: Server,
    port: u16,
    /// The dispatcher driven by the background job
    dispatcher: ReminderDispatcher,
}

impl Application {
    pub async fn new(context: EventideContext) -> Result<Self, std::io::Error> {
        let (server, port) = Application::configure_server(context.clone()).await?;
        let dispatcher = ReminderDispatcher::new(context);
        Application::start_job_schedulers(dispatcher.clone());

        Ok(Self {
            server,
            port,
            dispatcher,
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// A handle sharing the single flight gate of the background job
    pub fn dispatcher(&self) -> ReminderDispatcher {
        self.dispatcher.clone()
    }

    fn start_job_schedulers(dispatcher: ReminderDispatcher) {
        start_reminder_dispatcher_job(dispatcher);
    }

    async fn configure_server(context: EventideContext) -> Result<(Server, u16), std::io::Error> {
        let port = context.config.port;
        let address = format!("0.0.0.0:{}", port);
        let listener = TcpListener::bind(&address)?;
        let port = listener.local_addr()?.port();

        let server = HttpServer::new(move || {
            let ctx = context.clone();

            App::new()
                .wrap(Cors::permissive())
                .wrap(middleware::Compress::default())
                .wrap(TracingLogger::default())
                .app_data(web::Data::new(ctx))
                .service(web::scope("/api/v1").configure(configure_server_api))
        })
        .listen(listener)?
        .workers(4)
        .run();

        Ok((server, port))
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
