use std::{net::IpAddr, sync::Arc, time::Duration};

use anyhow::Context;
use axum::{http::HeaderValue, Router};
use eventpro_core_health_contracts::HealthFeatureService;
use eventpro_core_submission_contracts::SubmissionFeatureService;
use eventpro_notification_impl::ToastQueueConfig;
use tokio::net::TcpListener;

mod middlewares;
mod models;
mod routes;


#[derive(Debug, Clone)]
pub struct RestServer<Health, Submission> {
    health: Health,
    submission: Submission,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    /// Origins allowed to post forms from a browser.
    pub allowed_origins: Vec<String>,
    /// How long a success or failure toast stays visible.
    pub toast_duration: Duration,
}

impl<Health, Submission> RestServer<Health, Submission>
where
    Health: HealthFeatureService,
    Submission: SubmissionFeatureService,
{
    pub fn new(health: Health, submission: Submission, config: RestServerConfig) -> Self {
        Self {
            health,
            submission,
            config,
        }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let listener = TcpListener::bind((host, port))
            .await
            .with_context(|| format!("Failed to bind to {host}:{port}"))?;
        self.serve_on(listener).await
    }

    pub async fn serve_on(self, listener: TcpListener) -> anyhow::Result<()> {
        let router = self.router()?;
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> anyhow::Result<Router<()>> {
        let allowed_origins = self
            .config
            .allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid allowed origin: {origin:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let toasts = ToastQueueConfig {
            duration: self.config.toast_duration,
        };

        let router = Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::forms::router(Arc::new(routes::forms::FormsState {
                service: self.submission,
                toasts,
            })));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::request_id::add(router);
        Ok(middlewares::cors::add(router, allowed_origins))
    }
}
