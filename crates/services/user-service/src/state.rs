//! Application state for dependency injection.

use std::sync::Arc;

use crate::config::UserServiceConfig;
use crate::infra::Database;
use crate::service::UserService;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub database: Database,
    pub config: UserServiceConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        database: Database,
        config: UserServiceConfig,
    ) -> Self {
        Self {
            user_service,
            database,
            config,
        }
    }
}
