//! Error Reporter - 全局错误出口
//!
//! 所有单次事件的失败最终都在这里结束，不会再向上抛出。

use std::sync::Arc;

use crate::application::error::RelayError;
use crate::application::ports::ChatTransportPort;
use crate::domain::{InboundMessage, UserId};

pub struct ErrorReporter {
    transport: Arc<dyn ChatTransportPort>,
    operator_id: UserId,
    notice_text: String,
}

impl ErrorReporter {
    pub fn new(
        transport: Arc<dyn ChatTransportPort>,
        operator_id: UserId,
        notice_text: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            operator_id,
            notice_text: notice_text.into(),
        }
    }

    /// 记录错误；发送者是 operator 时额外回一条简短的失败提示
    ///
    /// 返回是否成功发出了提示。
    pub async fn report(&self, message: &InboundMessage, error: &RelayError) -> bool {
        tracing::error!(
            chat_id = message.chat_id,
            message_id = message.message_id,
            sender_id = ?message.sender_id,
            error = %error,
            "Failed to relay message"
        );

        if !message.is_from(self.operator_id) {
            return false;
        }

        match self
            .transport
            .send_text(message.chat_id, &self.notice_text)
            .await
        {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    chat_id = message.chat_id,
                    error = %e,
                    "Failed to notify operator about relay failure"
                );
                false
            }
        }
    }
}
