//! tts-relay - Telegram 文本转语音机器人
//!
//! 启动流程：加载配置 → 初始化日志 → 构造适配器 → 注册 webhook → 启动服务器

use std::sync::Arc;

use anyhow::Context;
use tokio_util::task::TaskTracker;
use tts_relay::application::{ErrorReporter, MessageRelay, UpdateDispatcher};
use tts_relay::config::{load_config, print_config};
use tts_relay::infrastructure::adapters::{
    OpenAiSpeechClient, OpenAiSpeechClientConfig, TelegramBotClient, TelegramBotClientConfig,
};
use tts_relay::infrastructure::http::{AppState, HttpServer, ServerConfig};

/// 只订阅 message 类型的 update
const ALLOWED_UPDATES: &[&str] = &["message"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：平台环境变量 > 前缀环境变量 > 配置文件 > 默认值）
    let config = load_config().context("Failed to load config")?;

    // 初始化日志
    let log_filter = format!(
        "{},tts_relay={},tower_http=debug",
        config.log.level, config.log.level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .init();

    tracing::info!("tts-relay - Telegram text-to-speech bot");
    print_config(&config);

    let artifact_dir = config.storage.artifact_dir();
    tokio::fs::create_dir_all(&artifact_dir)
        .await
        .with_context(|| format!("Failed to create artifact dir {:?}", artifact_dir))?;

    // 创建适配器
    let mut telegram_config = TelegramBotClientConfig::new(&config.telegram.bot_token)
        .with_api_url(&config.telegram.api_url);
    if let Some(secs) = config.telegram.timeout_secs {
        telegram_config = telegram_config.with_timeout(secs);
    }
    let telegram = Arc::new(TelegramBotClient::new(telegram_config)?);

    let mut speech_config = OpenAiSpeechClientConfig::new(&config.tts.api_key)
        .with_base_url(&config.tts.base_url);
    if let Some(secs) = config.tts.timeout_secs {
        speech_config = speech_config.with_timeout(secs);
    }
    let speech = Arc::new(OpenAiSpeechClient::new(speech_config)?);

    // 创建用例
    let owner_id = config
        .telegram
        .owner_id
        .context("telegram.owner_id is not set")?;
    let relay = MessageRelay::new(telegram.clone(), speech, config.relay_config());
    let reporter = ErrorReporter::new(telegram.clone(), owner_id, &config.telegram.error_text);
    let dispatcher = Arc::new(UpdateDispatcher::new(relay, reporter));

    // 注册 webhook
    let webhook_url = config
        .server
        .webhook_url()
        .context("Public URL is not configured")?;
    telegram
        .set_webhook(
            &webhook_url,
            ALLOWED_UPDATES,
            config.server.webhook_secret.as_deref(),
        )
        .await
        .context("Failed to register webhook")?;

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(
        &config.server.host,
        config.server.port,
        &config.server.webhook_path,
    );
    let tasks = TaskTracker::new();
    let state = AppState::new(
        dispatcher,
        config.server.webhook_secret.clone(),
        tasks.clone(),
    );
    let server = HttpServer::new(server_config, state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    // 等待进行中的转发完成
    tasks.close();
    tracing::info!(in_flight = tasks.len(), "Draining relay tasks");
    tasks.wait().await;

    tracing::info!("Server shutdown complete");

    Ok(())
}
