// Shared test utilities for integration tests
use screenroom_db::AppState;
use std::sync::Arc;

/// Wrap a (mock) database connection in the shared application state
pub fn test_app_state(db: sea_orm::DatabaseConnection) -> Arc<AppState> {
    Arc::new(AppState { db })
}
