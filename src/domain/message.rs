//! Inbound Message - 入站消息

/// 聊天 ID（Telegram chat id 可能为负数，例如群组）
pub type ChatId = i64;

/// 用户 ID
pub type UserId = i64;

/// 消息 ID（在 chat 内唯一）
pub type MessageId = i64;

/// 入站消息
///
/// 每个事件由聊天平台创建一次，读取一次后丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub message_id: MessageId,
    pub chat_id: ChatId,
    /// 频道消息等场景下没有发送者
    pub sender_id: Option<UserId>,
    pub text: Option<String>,
    pub caption: Option<String>,
}

/// 文本提取结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Content<'a> {
    /// 需要朗读的文本
    Speakable(&'a str),
    /// 以 `/` 开头的机器人命令，不朗读
    Command,
    /// 既没有正文也没有说明文字
    Empty,
}

impl InboundMessage {
    pub fn new(message_id: MessageId, chat_id: ChatId, sender_id: Option<UserId>) -> Self {
        Self {
            message_id,
            chat_id,
            sender_id,
            text: None,
            caption: None,
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// 提取要朗读的文本
    ///
    /// 正文优先于说明文字；正文若是命令则整条消息不朗读。
    pub fn content(&self) -> Content<'_> {
        if let Some(text) = non_empty(self.text.as_deref()) {
            if text.starts_with('/') {
                return Content::Command;
            }
            return Content::Speakable(text);
        }

        match non_empty(self.caption.as_deref()) {
            Some(caption) => Content::Speakable(caption),
            None => Content::Empty,
        }
    }

    /// 发送者是否为给定用户
    pub fn is_from(&self, user_id: UserId) -> bool {
        self.sender_id == Some(user_id)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_speakable() {
        let msg = InboundMessage::new(1, 10, Some(7)).with_text("Hello world");
        assert_eq!(msg.content(), Content::Speakable("Hello world"));
    }

    #[test]
    fn test_caption_used_when_text_missing() {
        let msg = InboundMessage::new(1, 10, Some(7)).with_caption("photo caption");
        assert_eq!(msg.content(), Content::Speakable("photo caption"));
    }

    #[test]
    fn test_text_wins_over_caption() {
        let msg = InboundMessage::new(1, 10, Some(7))
            .with_text("body")
            .with_caption("caption");
        assert_eq!(msg.content(), Content::Speakable("body"));
    }

    #[test]
    fn test_empty_text_falls_back_to_caption() {
        let msg = InboundMessage::new(1, 10, Some(7))
            .with_text("")
            .with_caption("caption");
        assert_eq!(msg.content(), Content::Speakable("caption"));
    }

    #[test]
    fn test_empty_message() {
        let msg = InboundMessage::new(1, 10, Some(7))
            .with_text("")
            .with_caption("");
        assert_eq!(msg.content(), Content::Empty);
        assert_eq!(InboundMessage::new(1, 10, None).content(), Content::Empty);
    }

    #[test]
    fn test_command_is_not_spoken() {
        let msg = InboundMessage::new(1, 10, Some(7)).with_text("/start");
        assert_eq!(msg.content(), Content::Command);
    }

    #[test]
    fn test_command_with_caption_is_not_spoken() {
        let msg = InboundMessage::new(1, 10, Some(7))
            .with_text("/start")
            .with_caption("a photo caption");
        assert_eq!(msg.content(), Content::Command);
    }

    #[test]
    fn test_is_from() {
        let msg = InboundMessage::new(1, 10, Some(7));
        assert!(msg.is_from(7));
        assert!(!msg.is_from(8));
        assert!(!InboundMessage::new(1, 10, None).is_from(7));
    }
}
