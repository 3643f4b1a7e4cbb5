//! Telegram Adapter - Bot API 客户端与 webhook 数据类型

mod bot_client;
mod types;

pub use bot_client::{TelegramBotClient, TelegramBotClientConfig};
pub use types::{BotApiResponse, Chat, Message, Update, User};
