//! Speech Request - 语音合成请求

use serde::Serialize;

/// 合成模型（固定）
pub const SPEECH_MODEL: &str = "tts-1";

/// 合成音色（固定）
pub const SPEECH_VOICE: &str = "alloy";

/// 输出音频格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    #[default]
    Mp3,
}

impl AudioFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
        }
    }
}

/// 语音合成请求
///
/// 文本来自入站消息，其余参数固定，不随请求变化。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    input: String,
    format: AudioFormat,
}

impl SpeechRequest {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            format: AudioFormat::default(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn model(&self) -> &'static str {
        SPEECH_MODEL
    }

    pub fn voice(&self) -> &'static str {
        SPEECH_VOICE
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_parameters() {
        let request = SpeechRequest::new("Hello world");
        assert_eq!(request.input(), "Hello world");
        assert_eq!(request.model(), "tts-1");
        assert_eq!(request.voice(), "alloy");
        assert_eq!(request.format(), AudioFormat::Mp3);
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(AudioFormat::Mp3.extension(), "mp3");
        assert_eq!(AudioFormat::Mp3.mime_type(), "audio/mpeg");
        assert_eq!(serde_json::to_string(&AudioFormat::Mp3).unwrap(), "\"mp3\"");
    }
}
