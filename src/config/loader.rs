//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 部署平台约定的环境变量（`TELEGRAM_BOT_TOKEN`、`PORT` 等）
//! 2. `TTS_RELAY_` 前缀的环境变量
//! 3. 配置文件（config.toml）
//! 4. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File, Map};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required setting `{key}` (set {env})")]
    Missing {
        key: &'static str,
        env: &'static str,
    },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 前缀环境变量，例如 `TTS_RELAY_TELEGRAM__BOT_TOKEN`
const ENV_PREFIX: &str = "TTS_RELAY";

/// 部署平台约定的环境变量 → 配置键
const ENV_ALIASES: &[(&str, &str)] = &[
    ("TELEGRAM_BOT_TOKEN", "telegram.bot_token"),
    ("OPENAI_API_KEY", "tts.api_key"),
    ("OWNER_ID", "telegram.owner_id"),
    ("PUBLIC_URL", "server.public_url"),
    ("RENDER_EXTERNAL_HOSTNAME", "server.platform_hostname"),
    ("PORT", "server.port"),
];

/// 从进程环境加载应用配置
///
/// # 环境变量示例
/// - `TELEGRAM_BOT_TOKEN=123456:ABC`
/// - `OPENAI_API_KEY=sk-...`
/// - `OWNER_ID=123456789`
/// - `PUBLIC_URL=https://bot.example.com`
/// - `TTS_RELAY_TELEGRAM__RESTRICT_TO_OPERATOR=true`
/// - `TTS_RELAY_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(None, std::env::vars().collect())
}

/// 从指定配置文件与环境变量集合加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
/// - `env` - 环境变量集合
pub fn load_config_from(
    config_path: Option<&Path>,
    env: Map<String, String>,
) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 10000)?
        .set_default("server.webhook_path", "/webhook")?
        .set_default("telegram.api_url", "https://api.telegram.org")?
        .set_default("telegram.restrict_to_operator", false)?
        .set_default("tts.base_url", "https://api.openai.com/v1")?
        .set_default("log.level", "info")?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 前缀环境变量，层级分隔符 `__`
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(Some(env.clone())),
    );

    // 4. 平台约定的环境变量（最高优先级）
    for (var, key) in ENV_ALIASES {
        let value = env.get(*var).filter(|v| !v.trim().is_empty()).cloned();
        builder = builder.set_override_option(*key, value)?;
    }

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.telegram.bot_token.trim().is_empty() {
        return Err(ConfigError::Missing {
            key: "telegram.bot_token",
            env: "TELEGRAM_BOT_TOKEN",
        });
    }

    if config.tts.api_key.trim().is_empty() {
        return Err(ConfigError::Missing {
            key: "tts.api_key",
            env: "OPENAI_API_KEY",
        });
    }

    if config.telegram.owner_id.is_none() {
        return Err(ConfigError::Missing {
            key: "telegram.owner_id",
            env: "OWNER_ID",
        });
    }

    if config.server.public_base_url().is_none() {
        return Err(ConfigError::Missing {
            key: "server.public_url",
            env: "PUBLIC_URL or RENDER_EXTERNAL_HOSTNAME",
        });
    }

    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if !config.server.webhook_path.starts_with('/') {
        return Err(ConfigError::ValidationError(format!(
            "Webhook path must start with '/': {}",
            config.server.webhook_path
        )));
    }

    if config.telegram.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "Telegram timeout cannot be 0".to_string(),
        ));
    }

    if config.tts.timeout_secs == Some(0) {
        return Err(ConfigError::ValidationError(
            "TTS timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 遮盖密钥，只保留末尾 4 个字符
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}", config.server.addr());
    tracing::info!(
        "Webhook URL: {}",
        config.server.webhook_url().unwrap_or_default()
    );
    tracing::info!(
        "Webhook Secret: {}",
        if config.server.webhook_secret.is_some() { "set" } else { "not set" }
    );
    tracing::info!("Telegram API: {}", config.telegram.api_url);
    tracing::info!("Bot Token: {}", mask_secret(&config.telegram.bot_token));
    match config.telegram.timeout_secs {
        Some(secs) => tracing::info!("Telegram Timeout: {}s", secs),
        None => tracing::info!("Telegram Timeout: none"),
    }
    tracing::info!("Owner ID: {:?}", config.telegram.owner_id);
    tracing::info!(
        "Restrict To Operator: {}",
        config.telegram.restrict_to_operator
    );
    tracing::info!("TTS URL: {}", config.tts.base_url);
    tracing::info!("TTS API Key: {}", mask_secret(&config.tts.api_key));
    match config.tts.timeout_secs {
        Some(secs) => tracing::info!("TTS Timeout: {}s", secs),
        None => tracing::info!("TTS Timeout: none"),
    }
    tracing::info!(
        "Artifact Directory: {:?}",
        config.storage.artifact_dir()
    );
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
