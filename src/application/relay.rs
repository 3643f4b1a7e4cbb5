//! Message Relay - 文本转语音转发
//!
//! 单次调用流程:
//! 1. 提取文本（正文优先，其次说明文字）
//! 2. 发送状态提示消息
//! 3. 在独立 tokio 任务中合成语音，写入本次调用独占的临时文件
//! 4. 把音频发回同一个 chat
//! 5. 删除临时文件与状态提示消息（无论成功与否）

use std::path::PathBuf;
use std::sync::Arc;

use tokio::io::AsyncWriteExt;

use crate::application::artifact::AudioArtifact;
use crate::application::error::RelayError;
use crate::application::ports::{
    ChatTransportPort, SentMessage, SpeechSynthesizerPort, SynthesisError,
};
use crate::domain::{ChatId, Content, InboundMessage, SpeechRequest, UserId};

/// 访问策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// 任何人都可以使用
    Anyone,
    /// 只响应指定用户
    OperatorOnly(UserId),
}

impl AccessPolicy {
    pub fn allows(&self, message: &InboundMessage) -> bool {
        match self {
            Self::Anyone => true,
            Self::OperatorOnly(operator_id) => message.is_from(*operator_id),
        }
    }
}

/// Relay 配置
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// 状态提示消息文本
    pub status_text: String,
    /// 临时音频文件目录
    pub artifact_dir: PathBuf,
    pub access: AccessPolicy,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            status_text: "✅ Received! Voicing it…".to_string(),
            artifact_dir: std::env::temp_dir(),
            access: AccessPolicy::Anyone,
        }
    }
}

/// 忽略原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    NoContent,
    Command,
    Unauthorized,
}

/// 单次调用结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Ignored(IgnoreReason),
    Delivered { audio: SentMessage, audio_bytes: u64 },
}

/// Message Relay
pub struct MessageRelay {
    transport: Arc<dyn ChatTransportPort>,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    config: RelayConfig,
}

impl MessageRelay {
    pub fn new(
        transport: Arc<dyn ChatTransportPort>,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        config: RelayConfig,
    ) -> Self {
        Self {
            transport,
            synthesizer,
            config,
        }
    }

    pub async fn handle(&self, message: &InboundMessage) -> Result<RelayOutcome, RelayError> {
        if !self.config.access.allows(message) {
            tracing::debug!(
                chat_id = message.chat_id,
                sender_id = ?message.sender_id,
                "Ignoring message from unauthorized sender"
            );
            return Ok(RelayOutcome::Ignored(IgnoreReason::Unauthorized));
        }

        let text = match message.content() {
            Content::Speakable(text) => text,
            Content::Command => return Ok(RelayOutcome::Ignored(IgnoreReason::Command)),
            Content::Empty => return Ok(RelayOutcome::Ignored(IgnoreReason::NoContent)),
        };

        let note = self
            .transport
            .send_text(message.chat_id, &self.config.status_text)
            .await
            .map_err(RelayError::StatusMessage)?;

        let result = self.voice(message.chat_id, text).await;

        // 状态提示消息总是要删除
        let cleanup = self
            .transport
            .delete_message(note.chat_id, note.message_id)
            .await;

        match (result, cleanup) {
            (Ok(outcome), Ok(())) => Ok(outcome),
            (Ok(_), Err(e)) => Err(RelayError::Cleanup(e)),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(cleanup_err)) => {
                tracing::warn!(
                    chat_id = note.chat_id,
                    message_id = note.message_id,
                    error = %cleanup_err,
                    "Failed to delete status message after relay failure"
                );
                Err(e)
            }
        }
    }

    /// 合成并发送音频；临时文件在所有退出路径上都会被删除
    async fn voice(&self, chat_id: ChatId, text: &str) -> Result<RelayOutcome, RelayError> {
        let request = SpeechRequest::new(text);
        let artifact = AudioArtifact::create_in(&self.config.artifact_dir, request.format())?;
        let writer = artifact.writer()?;

        tracing::info!(
            chat_id = chat_id,
            text_len = text.len(),
            artifact = %artifact.path().display(),
            "Synthesizing speech"
        );

        let audio_bytes = self.synthesize_into(request, writer).await?;

        let audio = self
            .transport
            .send_audio(chat_id, artifact.path(), artifact.format())
            .await
            .map_err(RelayError::Delivery)?;

        if let Err(e) = artifact.release() {
            tracing::warn!(error = %e, "Failed to remove audio artifact");
        }

        tracing::info!(
            chat_id = chat_id,
            message_id = audio.message_id,
            audio_bytes = audio_bytes,
            "Audio delivered"
        );

        Ok(RelayOutcome::Delivered { audio, audio_bytes })
    }

    /// 在独立任务中执行合成，当前调用只等待其完成
    async fn synthesize_into(
        &self,
        request: SpeechRequest,
        mut writer: tokio::fs::File,
    ) -> Result<u64, SynthesisError> {
        let synthesizer = Arc::clone(&self.synthesizer);

        let worker = tokio::spawn(async move {
            let written = synthesizer.synthesize(&request, &mut writer).await?;
            writer
                .flush()
                .await
                .map_err(|e| SynthesisError::SinkError(e.to_string()))?;
            Ok::<u64, SynthesisError>(written)
        });

        worker
            .await
            .map_err(|e| SynthesisError::WorkerAborted(e.to_string()))?
    }
}
