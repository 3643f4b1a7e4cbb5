//! OpenAI Speech Client - 调用 OpenAI 语音合成接口
//!
//! 实现 SpeechSynthesizerPort trait
//!
//! 外部 API:
//! POST https://api.openai.com/v1/audio/speech
//! Request: {"model": "tts-1", "voice": "alloy", "input": "...", "response_format": "mp3"}
//! Response: audio/mpeg binary（分块流式读取）

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tokio::io::AsyncWriteExt;

use crate::application::ports::{AudioSink, SpeechSynthesizerPort, SynthesisError};
use crate::domain::{AudioFormat, SpeechRequest};

/// 语音合成请求体 (JSON)
#[derive(Debug, Serialize)]
struct SpeechHttpRequest<'a> {
    model: &'a str,
    voice: &'a str,
    input: &'a str,
    response_format: AudioFormat,
}

impl<'a> From<&'a SpeechRequest> for SpeechHttpRequest<'a> {
    fn from(request: &'a SpeechRequest) -> Self {
        Self {
            model: request.model(),
            voice: request.voice(),
            input: request.input(),
            response_format: request.format(),
        }
    }
}

/// OpenAI 语音合成客户端配置
#[derive(Debug, Clone)]
pub struct OpenAiSpeechClientConfig {
    /// API 基础 URL
    pub base_url: String,
    /// API key
    pub api_key: String,
    /// 请求超时时间（秒），None 表示使用 HTTP 客户端默认值（不超时）
    pub timeout_secs: Option<u64>,
}

impl Default for OpenAiSpeechClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: String::new(),
            timeout_secs: None,
        }
    }
}

impl OpenAiSpeechClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }
}

/// OpenAI 语音合成客户端
pub struct OpenAiSpeechClient {
    client: Client,
    config: OpenAiSpeechClientConfig,
}

impl OpenAiSpeechClient {
    pub fn new(config: OpenAiSpeechClientConfig) -> Result<Self, SynthesisError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| SynthesisError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// 获取合成 URL
    fn speech_url(&self) -> String {
        format!("{}/audio/speech", self.config.base_url.trim_end_matches('/'))
    }
}

fn map_request_error(e: reqwest::Error) -> SynthesisError {
    if e.is_timeout() {
        SynthesisError::Timeout
    } else if e.is_connect() {
        SynthesisError::NetworkError(format!("Cannot connect to speech service: {}", e))
    } else {
        SynthesisError::NetworkError(e.to_string())
    }
}

#[async_trait]
impl SpeechSynthesizerPort for OpenAiSpeechClient {
    async fn synthesize(
        &self,
        request: &SpeechRequest,
        sink: &mut AudioSink,
    ) -> Result<u64, SynthesisError> {
        let body = SpeechHttpRequest::from(request);

        tracing::debug!(
            url = %self.speech_url(),
            model = body.model,
            voice = body.voice,
            text_len = body.input.len(),
            "Sending speech request"
        );

        let mut response = self
            .client
            .post(self.speech_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SynthesisError::ServiceError(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        // 分块写入，不在内存中缓存整段音频
        let mut written: u64 = 0;
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            if e.is_timeout() {
                SynthesisError::Timeout
            } else {
                SynthesisError::InvalidResponse(format!("Failed to read audio: {}", e))
            }
        })? {
            sink.write_all(&chunk)
                .await
                .map_err(|e| SynthesisError::SinkError(e.to_string()))?;
            written += chunk.len() as u64;
        }

        if written == 0 {
            return Err(SynthesisError::InvalidResponse(
                "Empty audio response".to_string(),
            ));
        }

        tracing::info!(audio_size = written, "Speech synthesis completed");

        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::Value;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    #[test]
    fn test_config_builder() {
        let config = OpenAiSpeechClientConfig::new("sk-test")
            .with_base_url("http://localhost:9000/v1/")
            .with_timeout(60);
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.timeout_secs, Some(60));

        let client = OpenAiSpeechClient::new(config).unwrap();
        assert_eq!(client.speech_url(), "http://localhost:9000/v1/audio/speech");
    }

    #[test]
    fn test_request_body() {
        let request = SpeechRequest::new("Hello world");
        let body = serde_json::to_value(SpeechHttpRequest::from(&request)).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "tts-1",
                "voice": "alloy",
                "input": "Hello world",
                "response_format": "mp3"
            })
        );
    }

    #[tokio::test]
    async fn test_synthesize_streams_audio_into_sink() {
        let seen: Arc<Mutex<Option<(String, Value)>>> = Arc::new(Mutex::new(None));
        let captured = seen.clone();
        let router = Router::new().route(
            "/v1/audio/speech",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let captured = captured.clone();
                async move {
                    let auth = headers
                        .get("authorization")
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or_default()
                        .to_string();
                    *captured.lock().unwrap() = Some((auth, body));
                    vec![7u8; 4096]
                }
            }),
        );
        let base_url = spawn_server(router).await;

        let client =
            OpenAiSpeechClient::new(OpenAiSpeechClientConfig::new("sk-test").with_base_url(base_url))
                .unwrap();
        let mut sink: Vec<u8> = Vec::new();
        let written = client
            .synthesize(&SpeechRequest::new("Hello world"), &mut sink)
            .await
            .unwrap();

        assert_eq!(written, 4096);
        assert_eq!(sink, vec![7u8; 4096]);

        let (auth, body) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(auth, "Bearer sk-test");
        assert_eq!(body["input"], "Hello world");
        assert_eq!(body["voice"], "alloy");
    }

    #[tokio::test]
    async fn test_service_error_is_reported() {
        let router = Router::new().route(
            "/v1/audio/speech",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exceeded") }),
        );
        let base_url = spawn_server(router).await;

        let client =
            OpenAiSpeechClient::new(OpenAiSpeechClientConfig::new("sk-test").with_base_url(base_url))
                .unwrap();
        let mut sink: Vec<u8> = Vec::new();
        let err = client
            .synthesize(&SpeechRequest::new("Hello world"), &mut sink)
            .await
            .unwrap_err();

        match err {
            SynthesisError::ServiceError(msg) => {
                assert!(msg.contains("429"));
                assert!(msg.contains("quota exceeded"));
            }
            other => panic!("unexpected error {:?}", other),
        }
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_service() {
        // 先绑定再释放，拿到一个当前无人监听的端口
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = OpenAiSpeechClient::new(
            OpenAiSpeechClientConfig::new("sk-test").with_base_url(format!("http://{}/v1", addr)),
        )
        .unwrap();
        let mut sink: Vec<u8> = Vec::new();
        let err = client
            .synthesize(&SpeechRequest::new("Hello world"), &mut sink)
            .await
            .unwrap_err();

        assert!(matches!(err, SynthesisError::NetworkError(_)));
    }
}
