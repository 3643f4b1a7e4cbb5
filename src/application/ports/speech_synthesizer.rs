//! Speech Synthesizer Port - 语音合成抽象
//!
//! 外部 TTS 服务的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncWrite;

use crate::domain::SpeechRequest;

/// 合成结果写入的目标（临时文件、内存缓冲区等）
pub type AudioSink = dyn AsyncWrite + Send + Unpin;

/// 语音合成错误
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to write audio: {0}")]
    SinkError(String),

    #[error("Synthesis worker aborted: {0}")]
    WorkerAborted(String),
}

/// Speech Synthesizer Port
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 合成语音并以流的方式写入 sink
    ///
    /// 返回写入的字节数
    async fn synthesize(
        &self,
        request: &SpeechRequest,
        sink: &mut AudioSink,
    ) -> Result<u64, SynthesisError>;
}
