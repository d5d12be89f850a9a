//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use toolcrib_core::config::AppConfig;
use toolcrib_database::store::InventoryStore;
use toolcrib_service::{
    CheckoutQueryService, ToolLifecycleManager, ToolService, ToolTypeService, UserService,
};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Inventory store
    pub store: Arc<dyn InventoryStore>,
    /// User management service
    pub user_service: Arc<UserService>,
    /// Tool type management service
    pub tool_type_service: Arc<ToolTypeService>,
    /// Tool registry service
    pub tool_service: Arc<ToolService>,
    /// Checkout / return / calibrate transitions
    pub lifecycle: Arc<ToolLifecycleManager>,
    /// Checkout queries
    pub checkout_queries: Arc<CheckoutQueryService>,
}

impl AppState {
    /// Wire every service over `store`.
    pub fn new(config: AppConfig, store: Arc<dyn InventoryStore>) -> Self {
        Self {
            user_service: Arc::new(UserService::new(
                Arc::clone(&store),
                config.inventory.default_role.clone(),
            )),
            tool_type_service: Arc::new(ToolTypeService::new(Arc::clone(&store))),
            tool_service: Arc::new(ToolService::new(Arc::clone(&store))),
            lifecycle: Arc::new(ToolLifecycleManager::new(Arc::clone(&store))),
            checkout_queries: Arc::new(CheckoutQueryService::new(Arc::clone(&store))),
            config: Arc::new(config),
            store,
        }
    }
}
