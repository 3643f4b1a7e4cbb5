//! HTTP Middleware
//!
//! 按状态码记录异常响应

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 状态码为 4xx 时记 warn，5xx 时记 error，并附带耗时
///
/// 请求体内容不会被记录（可能包含用户消息）。
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "Webhook request failed"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            elapsed_ms = elapsed_ms,
            "Webhook request rejected"
        );
    }

    response
}
