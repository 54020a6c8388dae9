use std::{sync::Arc, time::Duration};

use eventpro_core_health_contracts::{HealthFeatureService, HealthStatus};
use eventpro_persistence_contracts::SubmissionRepository;
use tokio::{sync::RwLock, time::Instant};
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Repo> {
    repo: Repo,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: Instant,
}

impl<Repo> HealthFeatureServiceImpl<Repo> {
    pub fn new(repo: Repo, config: HealthFeatureConfig) -> Self {
        Self {
            repo,
            config,
            state: Default::default(),
        }
    }
}

impl<Repo> HealthFeatureService for HealthFeatureServiceImpl<Repo>
where
    Repo: SubmissionRepository,
{
    async fn get_status(&self) -> HealthStatus {
        let now = Instant::now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let database = self
            .repo
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping database: {err:#}"))
            .is_ok();

        let status = HealthStatus { database };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
