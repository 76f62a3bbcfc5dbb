//! 聊天会话管理
//!
//! 每个管理器一个会话。管理器在启动引导中创建并共享；
//! 会话在首次使用时创建，系统指令取自当时的内容快照，
//! 之后不会销毁。

use std::sync::{Arc, OnceLock};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::core::content::ContentStore;
use crate::core::prompts;
use crate::errors::{AssistantError, Result};
use crate::infrastructure::llm::{GenerateRequest, TextService, Turn};

/// 会话生命周期
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active,
}

/// 与服务的多轮对话
pub struct ChatSession {
    id: String,
    service: Arc<dyn TextService>,
    system_instruction: String,
    /// 整轮对话期间持有，轮次不会交错
    history: Mutex<Vec<Turn>>,
}

impl ChatSession {
    pub fn new(service: Arc<dyn TextService>, system_instruction: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            service,
            system_instruction: system_instruction.into(),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    /// 发送用户消息并返回回复
    ///
    /// 只有回复含可用文本时才记录两个轮次；失败或空回复不修改历史。
    /// 并发调用方在历史锁上排队，按到达顺序处理。
    pub async fn send_message(&self, message: &str) -> Result<String> {
        let mut history = self.history.lock().await;

        let mut contents = history.clone();
        contents.push(Turn::user(message));
        debug!(session_id = %self.id, turns = contents.len(), "sending chat turn");

        let request = GenerateRequest::conversation(self.system_instruction.clone(), contents);
        let reply = match self.service.generate(request).await {
            Ok(completion) => completion
                .into_usable_text()
                .ok_or_else(|| AssistantError::empty("chat reply"))?,
            Err(e) => {
                warn!(session_id = %self.id, error = %e, "chat turn failed");
                return Err(e);
            }
        };

        history.push(Turn::user(message));
        history.push(Turn::model(reply.clone()));
        Ok(reply)
    }

    /// 已记录轮次的快照
    pub async fn history(&self) -> Vec<Turn> {
        self.history.lock().await.clone()
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("id", &self.id)
            .field("model", &self.service.model())
            .finish()
    }
}

/// 懒创建聊天会话，之后返回同一个句柄
pub struct ChatSessionManager {
    service: Arc<dyn TextService>,
    content: Arc<ContentStore>,
    session: OnceLock<Arc<ChatSession>>,
}

impl ChatSessionManager {
    pub fn new(service: Arc<dyn TextService>, content: Arc<ContentStore>) -> Self {
        Self {
            service,
            content,
            session: OnceLock::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        if self.session.get().is_some() {
            SessionState::Active
        } else {
            SessionState::Uninitialized
        }
    }

    /// 获取会话，首次调用时创建
    pub fn session(&self) -> Arc<ChatSession> {
        self.session
            .get_or_init(|| {
                let instruction = prompts::system_instruction(&self.content);
                let session = ChatSession::new(self.service.clone(), instruction);
                info!(
                    session_id = %session.id(),
                    model = %self.service.model(),
                    "chat session created"
                );
                Arc::new(session)
            })
            .clone()
    }
}
