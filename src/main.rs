mod telemetry;

use eventide_api::Application;
use eventide_infra::{run_migration, setup_context};
use telemetry::{get_subscriber, init_subscriber};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    openssl_probe::init_ssl_cert_env_vars();

    let subscriber = get_subscriber("eventide".into(), "info".into());
    init_subscriber(subscriber);

    let context = setup_context().await.map_err(|e| {
        error!("Unable to set up the infrastructure: {:?}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;

    if let Some(connection_string) = &context.config.database_url {
        info!("Running database migrations");
        run_migration(connection_string).await.map_err(|e| {
            error!("Unable to run database migrations: {:?}", e);
            std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
        })?;
    }

    let app = Application::new(context).await?;
    app.start().await
}
