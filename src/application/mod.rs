//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（ChatTransport、SpeechSynthesizer）
//! - relay: 文本转语音转发用例
//! - reporter: 错误上报
//! - dispatcher: 单次事件处理边界
//! - artifact: 临时音频文件
//! - error: 应用层错误定义

pub mod artifact;
pub mod dispatcher;
pub mod error;
pub mod ports;
pub mod relay;
pub mod reporter;

#[cfg(test)]
pub(crate) mod testing;

pub use artifact::AudioArtifact;
pub use dispatcher::{DispatchOutcome, UpdateDispatcher};
pub use error::RelayError;
pub use ports::{
    AudioSink, ChatTransportPort, SentMessage, SpeechSynthesizerPort, SynthesisError,
    TransportError,
};
pub use relay::{AccessPolicy, IgnoreReason, MessageRelay, RelayConfig, RelayOutcome};
pub use reporter::ErrorReporter;
