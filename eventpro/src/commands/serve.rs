use eventpro_api_rest::{RestServer, RestServerConfig};
use eventpro_config::Config;
use eventpro_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use eventpro_core_submission_impl::SubmissionFeatureServiceImpl;
use eventpro_persistence_postgres::submission::PostgresSubmissionRepository;
use tracing::info;

use crate::database;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database.ping().await?;

    info!("Applying pending migrations");
    let mut applied = false;
    for name in database.run_migrations(None).await? {
        info!("Applied {name}");
        applied = true;
    }
    if !applied {
        info!("No migrations pending");
    }

    let repo = PostgresSubmissionRepository::new(database);
    let health = HealthFeatureServiceImpl::new(
        repo.clone(),
        HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );
    let submission = SubmissionFeatureServiceImpl::new(repo);

    let server = RestServer::new(
        health,
        submission,
        RestServerConfig {
            allowed_origins: config.http.allowed_origins,
            toast_duration: config.notification.toast_duration.into(),
        },
    );

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve(config.http.host, config.http.port).await
}
