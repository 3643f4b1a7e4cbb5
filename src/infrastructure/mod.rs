//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现以及 webhook 服务器

pub mod adapters;
pub mod http;

pub use adapters::{OpenAiSpeechClient, TelegramBotClient};
pub use http::{AppState, HttpServer};
