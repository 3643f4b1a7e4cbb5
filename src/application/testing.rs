//! 测试替身 - 记录调用的 ChatTransport 与可编排的 SpeechSynthesizer

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{
    AudioSink, ChatTransportPort, SentMessage, SpeechSynthesizerPort, SynthesisError,
    TransportError,
};
use crate::domain::{AudioFormat, ChatId, MessageId, SpeechRequest};

/// 平台侧记录到的一次调用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportCall {
    Text {
        chat_id: ChatId,
        message_id: MessageId,
        text: String,
    },
    Audio {
        chat_id: ChatId,
        message_id: MessageId,
        path: PathBuf,
        data: Vec<u8>,
    },
    Delete {
        chat_id: ChatId,
        message_id: MessageId,
    },
}

#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<TransportCall>>,
    next_id: AtomicI64,
    fail_text: bool,
    fail_audio: bool,
    fail_delete: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// `sendMessage` 一律失败
    pub fn failing_text(mut self) -> Self {
        self.fail_text = true;
        self
    }

    /// `sendAudio` 一律失败
    pub fn failing_audio(mut self) -> Self {
        self.fail_audio = true;
        self
    }

    /// `deleteMessage` 记录调用后失败
    pub fn failing_delete(mut self) -> Self {
        self.fail_delete = true;
        self
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn texts(&self) -> Vec<(ChatId, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TransportCall::Text { chat_id, text, .. } => Some((chat_id, text)),
                _ => None,
            })
            .collect()
    }

    pub fn audios(&self) -> Vec<(ChatId, PathBuf, Vec<u8>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TransportCall::Audio {
                    chat_id, path, data, ..
                } => Some((chat_id, path, data)),
                _ => None,
            })
            .collect()
    }

    pub fn deletes(&self) -> Vec<(ChatId, MessageId)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                TransportCall::Delete {
                    chat_id,
                    message_id,
                } => Some((chat_id, message_id)),
                _ => None,
            })
            .collect()
    }

    fn next_message_id(&self) -> MessageId {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 100
    }

    fn record(&self, call: TransportCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn rejected(description: &str) -> TransportError {
        TransportError::ApiError {
            code: 400,
            description: description.to_string(),
        }
    }
}

#[async_trait]
impl ChatTransportPort for RecordingTransport {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<SentMessage, TransportError> {
        if self.fail_text {
            return Err(Self::rejected("Bad Request: chat not found"));
        }
        let message_id = self.next_message_id();
        self.record(TransportCall::Text {
            chat_id,
            message_id,
            text: text.to_string(),
        });
        Ok(SentMessage {
            chat_id,
            message_id,
        })
    }

    async fn send_audio(
        &self,
        chat_id: ChatId,
        audio_path: &Path,
        _format: AudioFormat,
    ) -> Result<SentMessage, TransportError> {
        if self.fail_audio {
            return Err(Self::rejected("Bad Request: audio upload failed"));
        }
        let data = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TransportError::IoError(e.to_string()))?;
        let message_id = self.next_message_id();
        self.record(TransportCall::Audio {
            chat_id,
            message_id,
            path: audio_path.to_path_buf(),
            data,
        });
        Ok(SentMessage {
            chat_id,
            message_id,
        })
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError> {
        self.record(TransportCall::Delete {
            chat_id,
            message_id,
        });
        if self.fail_delete {
            return Err(Self::rejected("Bad Request: message to delete not found"));
        }
        Ok(())
    }
}

/// 合成行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// 把 `AUDIO:<input>` 写入 sink
    Echo,
    /// 写入部分数据后返回服务错误
    Fail,
    /// 直接 panic，模拟工作任务异常退出
    Panic,
}

pub struct ScriptedSynthesizer {
    mode: SynthesisMode,
    delay: Duration,
    requests: Mutex<Vec<SpeechRequest>>,
}

impl ScriptedSynthesizer {
    pub fn new(mode: SynthesisMode) -> Self {
        Self {
            mode,
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSynthesizerPort for ScriptedSynthesizer {
    async fn synthesize(
        &self,
        request: &SpeechRequest,
        sink: &mut AudioSink,
    ) -> Result<u64, SynthesisError> {
        self.requests.lock().unwrap().push(request.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match self.mode {
            SynthesisMode::Echo => {
                let audio = format!("AUDIO:{}", request.input());
                sink.write_all(audio.as_bytes())
                    .await
                    .map_err(|e| SynthesisError::SinkError(e.to_string()))?;
                Ok(audio.len() as u64)
            }
            SynthesisMode::Fail => {
                sink.write_all(b"partial")
                    .await
                    .map_err(|e| SynthesisError::SinkError(e.to_string()))?;
                Err(SynthesisError::ServiceError(
                    "HTTP 429 Too Many Requests: quota exceeded".to_string(),
                ))
            }
            SynthesisMode::Panic => panic!("synthesizer crashed"),
        }
    }
}
