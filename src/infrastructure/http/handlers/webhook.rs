//! Webhook Handler - 接收 Telegram update
//!
//! 只处理 message 类型的 update；每条消息在独立的 tokio 任务中处理，
//! 接口立即返回 200，不等待语音合成。任务登记在 `AppState::tasks` 中，
//! 关闭时由 main 等待结束。

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::domain::InboundMessage;
use crate::infrastructure::adapters::Update;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// Telegram 回传 secret token 的请求头
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

pub async fn webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let provided = headers
        .get(SECRET_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());
    if !state.secret_matches(provided) {
        return Err(ApiError::Forbidden("Invalid secret token".to_string()));
    }

    let update: Update = serde_json::from_slice(&body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid update payload: {}", e)))?;

    let Some(message) = update.message else {
        tracing::debug!(update_id = update.update_id, "Ignoring non-message update");
        return Ok(StatusCode::OK);
    };

    let inbound = InboundMessage::from(message);
    let span = tracing::info_span!(
        "relay",
        relay_id = %Uuid::new_v4(),
        update_id = update.update_id,
        chat_id = inbound.chat_id
    );

    let dispatcher = state.dispatcher.clone();
    state.tasks.spawn(
        async move {
            let outcome = dispatcher.dispatch(inbound).await;
            tracing::debug!(outcome = ?outcome, "Update processed");
        }
        .instrument(span),
    );

    Ok(StatusCode::OK)
}
