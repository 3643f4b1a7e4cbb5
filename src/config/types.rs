//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::{AccessPolicy, RelayConfig};

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Webhook 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// Telegram 配置
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// 语音合成服务配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 临时文件配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// 由配置构造 MessageRelay 的配置
    pub fn relay_config(&self) -> RelayConfig {
        let access = match (self.telegram.restrict_to_operator, self.telegram.owner_id) {
            (true, Some(owner_id)) => AccessPolicy::OperatorOnly(owner_id),
            _ => AccessPolicy::Anyone,
        };

        RelayConfig {
            status_text: self.telegram.status_text.clone(),
            artifact_dir: self.storage.artifact_dir(),
            access,
        }
    }
}

/// Webhook 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,

    /// 公开访问的 Base URL（手动指定时优先）
    #[serde(default)]
    pub public_url: Option<String>,

    /// 托管平台提供的外部主机名（例如 Render 的 `RENDER_EXTERNAL_HOSTNAME`）
    #[serde(default)]
    pub platform_hostname: Option<String>,

    /// Webhook 路径
    #[serde(default = "default_webhook_path")]
    pub webhook_path: String,

    /// Webhook secret token，设置后校验 `X-Telegram-Bot-Api-Secret-Token`
    #[serde(default)]
    pub webhook_secret: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10000
}

fn default_webhook_path() -> String {
    "/webhook".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            public_url: None,
            platform_hostname: None,
            webhook_path: default_webhook_path(),
            webhook_secret: None,
        }
    }
}

impl ServerConfig {
    /// 获取监听地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// 获取公开的 Base URL
    ///
    /// 手动指定的 `public_url` 优先，否则由平台主机名推导为 `https://{hostname}`。
    pub fn public_base_url(&self) -> Option<String> {
        if let Some(url) = non_blank(self.public_url.as_deref()) {
            return Some(url.trim_end_matches('/').to_string());
        }
        non_blank(self.platform_hostname.as_deref()).map(|host| format!("https://{}", host))
    }

    /// 注册到 Telegram 的完整 webhook URL
    pub fn webhook_url(&self) -> Option<String> {
        self.public_base_url()
            .map(|base| format!("{}{}", base, self.webhook_path))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

/// Telegram 配置
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token
    #[serde(default)]
    pub bot_token: String,

    /// Bot API 地址
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,

    /// Bot API 请求超时时间（秒），不设置则不限制
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Operator（机器人所有者）的用户 ID
    #[serde(default)]
    pub owner_id: Option<i64>,

    /// 是否只响应 operator
    #[serde(default)]
    pub restrict_to_operator: bool,

    /// 收到消息后的状态提示
    #[serde(default = "default_status_text")]
    pub status_text: String,

    /// 发给 operator 的失败提示
    #[serde(default = "default_error_text")]
    pub error_text: String,
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_status_text() -> String {
    "✅ Received! Voicing it…".to_string()
}

fn default_error_text() -> String {
    "⚠️ Something went wrong, please try again.".to_string()
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            api_url: default_telegram_api_url(),
            timeout_secs: None,
            owner_id: None,
            restrict_to_operator: false,
            status_text: default_status_text(),
            error_text: default_error_text(),
        }
    }
}

/// 语音合成服务配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// API key
    #[serde(default)]
    pub api_key: String,

    /// 服务基础 URL
    #[serde(default = "default_tts_base_url")]
    pub base_url: String,

    /// 请求超时时间（秒），不设置则不限制
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_tts_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_tts_base_url(),
            timeout_secs: None,
        }
    }
}

/// 临时文件配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// 临时音频文件目录，默认使用系统临时目录
    #[serde(default)]
    pub artifact_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn artifact_dir(&self) -> PathBuf {
        self.artifact_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
