//! 应用层错误定义

use thiserror::Error;

use crate::application::ports::{SynthesisError, TransportError};

/// 单次转发调用的错误
///
/// 消息没有可朗读内容不是错误，见 `RelayOutcome::Ignored`。
#[derive(Debug, Error)]
pub enum RelayError {
    /// 状态提示消息发送失败
    #[error("Failed to send status message: {0}")]
    StatusMessage(#[source] TransportError),

    /// 临时音频文件创建失败
    #[error("Failed to prepare audio artifact: {0}")]
    Artifact(#[from] std::io::Error),

    /// 语音合成失败
    #[error("Speech synthesis failed: {0}")]
    Synthesis(#[from] SynthesisError),

    /// 音频发送失败
    #[error("Failed to deliver audio: {0}")]
    Delivery(#[source] TransportError),

    /// 音频已送达，但状态提示消息删除失败
    #[error("Failed to delete status message: {0}")]
    Cleanup(#[source] TransportError),
}
