//! Telegram Bot Client - 调用 Telegram Bot API
//!
//! 实现 ChatTransportPort trait，另外提供启动时注册 webhook 的 `set_webhook`
//!
//! Bot API:
//! POST {api_url}/bot{token}/{method}
//! Response: {"ok": true, "result": ...} 或 {"ok": false, "error_code": 400, "description": "..."}

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

use super::types::{BotApiResponse, SentMessageResult};
use crate::application::ports::{ChatTransportPort, SentMessage, TransportError};
use crate::domain::{AudioFormat, ChatId, MessageId};

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: ChatId,
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct DeleteMessageRequest {
    chat_id: ChatId,
    message_id: MessageId,
}

#[derive(Debug, Serialize)]
struct SetWebhookRequest<'a> {
    url: &'a str,
    allowed_updates: &'a [&'a str],
    #[serde(skip_serializing_if = "Option::is_none")]
    secret_token: Option<&'a str>,
}

/// Telegram Bot 客户端配置
#[derive(Debug, Clone)]
pub struct TelegramBotClientConfig {
    /// Bot API 基础 URL
    pub api_url: String,
    /// Bot token（只出现在请求 URL 中，不写入日志）
    pub bot_token: String,
    /// 请求超时时间（秒）
    pub timeout_secs: Option<u64>,
}

impl TelegramBotClientConfig {
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
            bot_token: bot_token.into(),
            timeout_secs: None,
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// Telegram Bot 客户端
pub struct TelegramBotClient {
    client: Client,
    config: TelegramBotClientConfig,
}

impl TelegramBotClient {
    pub fn new(config: TelegramBotClientConfig) -> Result<Self, TransportError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.config.api_url.trim_end_matches('/'),
            self.config.bot_token,
            method
        )
    }

    /// 注册 webhook
    pub async fn set_webhook(
        &self,
        url: &str,
        allowed_updates: &[&str],
        secret_token: Option<&str>,
    ) -> Result<(), TransportError> {
        let request = SetWebhookRequest {
            url,
            allowed_updates,
            secret_token,
        };
        let _: bool = self.call_json("setWebhook", &request).await?;

        tracing::info!(url = %url, allowed_updates = ?allowed_updates, "Webhook registered");
        Ok(())
    }

    async fn call_json<B, T>(&self, method: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        tracing::debug!(method = method, "Calling Bot API");

        let response = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await
            .map_err(map_request_error)?;

        parse_response(method, response).await
    }

    async fn call_multipart<T>(&self, method: &str, form: Form) -> Result<T, TransportError>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(method = method, "Calling Bot API (multipart)");

        let response = self
            .client
            .post(self.method_url(method))
            .multipart(form)
            .send()
            .await
            .map_err(map_request_error)?;

        parse_response(method, response).await
    }
}

/// reqwest 错误信息里带有请求 URL（含 token），先去掉
fn map_request_error(e: reqwest::Error) -> TransportError {
    let e = e.without_url();
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::NetworkError(format!("Cannot connect to Bot API: {}", e))
    } else {
        TransportError::NetworkError(e.to_string())
    }
}

async fn parse_response<T: DeserializeOwned>(
    method: &str,
    response: Response,
) -> Result<T, TransportError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_request_error)?;

    let parsed: BotApiResponse<T> = serde_json::from_slice(&body).map_err(|e| {
        TransportError::InvalidResponse(format!("{} returned HTTP {}: {}", method, status, e))
    })?;

    if !parsed.ok {
        return Err(TransportError::ApiError {
            code: parsed
                .error_code
                .unwrap_or_else(|| i32::from(status.as_u16())),
            description: parsed.description.unwrap_or_default(),
        });
    }

    parsed
        .result
        .ok_or_else(|| TransportError::InvalidResponse(format!("{} returned no result", method)))
}

#[async_trait]
impl ChatTransportPort for TelegramBotClient {
    async fn send_text(&self, chat_id: ChatId, text: &str) -> Result<SentMessage, TransportError> {
        let result: SentMessageResult = self
            .call_json("sendMessage", &SendMessageRequest { chat_id, text })
            .await?;

        Ok(SentMessage {
            chat_id: result.chat.id,
            message_id: result.message_id,
        })
    }

    async fn send_audio(
        &self,
        chat_id: ChatId,
        audio_path: &Path,
        format: AudioFormat,
    ) -> Result<SentMessage, TransportError> {
        let data = tokio::fs::read(audio_path)
            .await
            .map_err(|e| TransportError::IoError(e.to_string()))?;
        let audio_size = data.len();

        let part = Part::bytes(data)
            .file_name(format!("speech.{}", format.extension()))
            .mime_str(format.mime_type())
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
        let form = Form::new()
            .text("chat_id", chat_id.to_string())
            .part("audio", part);

        let result: SentMessageResult = self.call_multipart("sendAudio", form).await?;

        tracing::debug!(
            chat_id = chat_id,
            message_id = result.message_id,
            audio_size = audio_size,
            "Audio uploaded"
        );

        Ok(SentMessage {
            chat_id: result.chat.id,
            message_id: result.message_id,
        })
    }

    async fn delete_message(
        &self,
        chat_id: ChatId,
        message_id: MessageId,
    ) -> Result<(), TransportError> {
        let _: bool = self
            .call_json(
                "deleteMessage",
                &DeleteMessageRequest {
                    chat_id,
                    message_id,
                },
            )
            .await?;
        Ok(())
    }
}
