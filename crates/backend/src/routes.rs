use axum::{routing::get, Router};

use crate::handlers;

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // MENU CONTENT
        // ========================================
        .route(
            "/api/menu/categories",
            get(handlers::a001_menu_category::list_categories),
        )
}
