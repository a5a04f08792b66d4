use std::sync::Arc;

use roomkit_core::version_chain::VersionChain;
use roomkit_db::PgVersionStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: roomkit_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Version-chain manager for main contents, backed by the same pool.
    pub versions: Arc<VersionChain<PgVersionStore>>,
}

impl AppState {
    /// Wire the state from a pool and configuration.
    pub fn new(pool: roomkit_db::DbPool, config: ServerConfig) -> Self {
        let versions = Arc::new(VersionChain::new(PgVersionStore::new(pool.clone())));
        Self {
            pool,
            config: Arc::new(config),
            versions,
        }
    }
}
