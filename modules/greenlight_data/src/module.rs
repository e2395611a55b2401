use std::sync::Arc;

use greenlight_db::DbHandle;
use tracing::{debug, info};

use crate::config::GreenlightDataConfig;
use crate::domain::service::{Service, ServiceConfig};
use crate::infra::storage::{PgMoviesRepository, PgUsersRepository};

/// Module entry point: wires the Postgres repositories into the domain service.
#[derive(Clone)]
pub struct GreenlightData {
    service: Arc<Service>,
}

impl GreenlightData {
    pub fn init(db: &DbHandle, cfg: &GreenlightDataConfig) -> Self {
        info!("Initializing greenlight_data module");
        debug!(
            "Loaded greenlight_data config: query_timeout={:?}, default_page_size={}, max_edit_retries={}",
            cfg.query_timeout, cfg.default_page_size, cfg.max_edit_retries
        );

        let pool = db.pool().clone();
        let movies = PgMoviesRepository::new(pool.clone(), cfg.query_timeout);
        let users = PgUsersRepository::new(pool, cfg.query_timeout);
        let service = Service::new(Arc::new(movies), Arc::new(users), ServiceConfig::from(cfg));

        info!("greenlight_data module initialized");
        Self {
            service: Arc::new(service),
        }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }
}
