//! Application State

use std::sync::Arc;

use tokio_util::task::TaskTracker;

use crate::application::UpdateDispatcher;

/// 应用状态
///
/// 所有字段在启动后不再变化，各请求共享只读引用。
pub struct AppState {
    pub dispatcher: Arc<UpdateDispatcher>,
    /// 设置后，webhook 请求必须携带相同的 secret token
    pub webhook_secret: Option<String>,
    /// 进行中的转发任务，关闭时等待其结束
    pub tasks: TaskTracker,
}

impl AppState {
    pub fn new(
        dispatcher: Arc<UpdateDispatcher>,
        webhook_secret: Option<String>,
        tasks: TaskTracker,
    ) -> Self {
        Self {
            dispatcher,
            webhook_secret,
            tasks,
        }
    }

    /// 校验请求携带的 secret token
    pub fn secret_matches(&self, provided: Option<&str>) -> bool {
        match self.webhook_secret.as_deref() {
            None => true,
            Some(expected) => provided == Some(expected),
        }
    }
}
