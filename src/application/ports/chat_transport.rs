//! Chat Transport Port - 聊天平台抽象
//!
//! 具体实现（Telegram Bot API）在 infrastructure/adapters 层

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::{AudioFormat, ChatId, MessageId};

/// 聊天平台错误
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("API error {code}: {description}")]
    ApiError { code: i32, description: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

/// 已发送消息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Chat Transport Port
///
/// 所有操作都以 chat id 寻址
#[async_trait]
pub trait ChatTransportPort: Send + Sync {
    /// 发送文本消息
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<SentMessage, TransportError>;

    /// 以音频消息发送本地文件
    async fn send_audio(
        &self,
        chat_id: ChatId,
        audio_path: &Path,
        format: AudioFormat,
    ) -> Result<SentMessage, TransportError>;

    /// 删除消息
    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId)
        -> Result<(), TransportError>;
}
