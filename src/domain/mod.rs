//! Domain Layer - 领域层
//!
//! 只包含请求级别的瞬态实体，没有任何持久化状态:
//! - message: 入站消息与文本提取规则
//! - speech: 语音合成请求与固定合成参数

mod message;
mod speech;

pub use message::{ChatId, Content, InboundMessage, MessageId, UserId};
pub use speech::{AudioFormat, SpeechRequest, SPEECH_MODEL, SPEECH_VOICE};
