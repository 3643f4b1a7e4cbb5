//! tts-relay - Telegram 文本转语音转发机器人
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - InboundMessage: 入站消息与文本提取规则
//! - SpeechRequest: 固定参数的语音合成请求
//!
//! 应用层 (application/):
//! - Ports: ChatTransport, SpeechSynthesizer
//! - MessageRelay / ErrorReporter / UpdateDispatcher
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: Telegram Bot API 客户端, OpenAI 语音合成客户端
//! - HTTP: webhook 服务器

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
