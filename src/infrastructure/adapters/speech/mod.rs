//! Speech Adapter - OpenAI 语音合成客户端实现

mod openai_speech_client;

pub use openai_speech_client::*;
