//! Update Dispatcher - 单次事件的处理边界
//!
//! 运行 MessageRelay，失败时恰好调用一次 ErrorReporter。

use crate::application::ports::SentMessage;
use crate::application::relay::{IgnoreReason, MessageRelay, RelayOutcome};
use crate::application::reporter::ErrorReporter;
use crate::domain::InboundMessage;

/// 分发结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Ignored(IgnoreReason),
    Delivered(SentMessage),
    Failed { operator_notified: bool },
}

pub struct UpdateDispatcher {
    relay: MessageRelay,
    reporter: ErrorReporter,
}

impl UpdateDispatcher {
    pub fn new(relay: MessageRelay, reporter: ErrorReporter) -> Self {
        Self { relay, reporter }
    }

    pub async fn dispatch(&self, message: InboundMessage) -> DispatchOutcome {
        match self.relay.handle(&message).await {
            Ok(RelayOutcome::Ignored(reason)) => {
                tracing::debug!(chat_id = message.chat_id, reason = ?reason, "Message ignored");
                DispatchOutcome::Ignored(reason)
            }
            Ok(RelayOutcome::Delivered { audio, .. }) => DispatchOutcome::Delivered(audio),
            Err(e) => {
                let operator_notified = self.reporter.report(&message, &e).await;
                DispatchOutcome::Failed { operator_notified }
            }
        }
    }
}
