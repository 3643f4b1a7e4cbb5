//! Telegram Bot API 数据类型
//!
//! 只保留本服务用到的字段，其余字段在反序列化时忽略。

use serde::Deserialize;

use crate::domain::InboundMessage;

/// Webhook 推送的 Update
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    /// 只有 message 类型的 update 会被处理
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub chat: Chat,
    #[serde(default)]
    pub from: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
}

impl From<Message> for InboundMessage {
    fn from(message: Message) -> Self {
        InboundMessage {
            message_id: message.message_id,
            chat_id: message.chat.id,
            sender_id: message.from.map(|user| user.id),
            text: message.text,
            caption: message.caption,
        }
    }
}

/// Bot API 统一响应格式
#[derive(Debug, Deserialize)]
pub struct BotApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `sendMessage` / `sendAudio` 返回的消息（只关心 ID）
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SentMessageResult {
    pub message_id: i64,
    pub chat: Chat,
}
