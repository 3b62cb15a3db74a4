use std::sync::Arc;

use drt_core::probe::RangeProber;
use drt_core::sync::SyncService;
use drt_remote::{DiuClientConfig, DiuResultClient, ResultLookupClient};
use drt_storage_sqlite::db;
use drt_storage_sqlite::{SemesterResultRepository, StudentRepository};

use crate::config::Config;

/// Services wired against one database and one remote client.
pub struct AppContext {
    pub student_repository: Arc<StudentRepository>,
    pub result_repository: Arc<SemesterResultRepository>,
    pub sync_service: SyncService,
    pub range_prober: RangeProber,
}

impl AppContext {
    /// Opens the database (applying migrations) and builds the services.
    /// Must run inside a Tokio runtime: it spawns the writer task.
    pub fn build(config: &Config) -> anyhow::Result<Self> {
        let db_path = db::init(&config.db_path)?;
        tracing::info!("Database path in use: {}", db_path);

        let pool = db::create_pool(&db_path)?;
        db::run_migrations(&pool)?;
        let writer = db::spawn_writer((*pool).clone());

        let student_repository = Arc::new(StudentRepository::new(pool.clone(), writer.clone()));
        let result_repository = Arc::new(SemesterResultRepository::new(pool, writer));

        let client: Arc<dyn ResultLookupClient> = Arc::new(DiuResultClient::new(DiuClientConfig {
            base_url: config.remote_url.clone(),
            timeout: config.request_timeout,
        }));
        tracing::info!("Remote service: {} ({})", config.remote_url, client.id());

        let sync_service = SyncService::new(
            client.clone(),
            student_repository.clone(),
            result_repository.clone(),
        )
        .with_concurrency(config.sync_concurrency);
        let range_prober = RangeProber::new(client);

        Ok(Self {
            student_repository,
            result_repository,
            sync_service,
            range_prober,
        })
    }
}
