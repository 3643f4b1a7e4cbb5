//! HTTP Routes
//!
//! Endpoints:
//! - {webhook_path}   POST  Telegram webhook（默认 /webhook）
//! - /ping            GET   健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes(webhook_path: &str) -> Router<Arc<AppState>> {
    Router::new()
        .route(webhook_path, post(handlers::webhook))
        .route("/ping", get(handlers::ping))
}
