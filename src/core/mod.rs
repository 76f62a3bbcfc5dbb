//! 核心层：作品集内容和 AI 请求编排
//!
//! 内容存储、提示词模板、聊天会话管理器，
//! 以及提供生成操作的助手

pub mod assistant;
pub mod chat;
pub mod config;
pub mod content;
pub mod prompts;

pub use assistant::{Generated, PortfolioAssistant, Task};
pub use chat::{ChatSession, ChatSessionManager, SessionState};
pub use config::{AppConfig, Command};
pub use content::ContentStore;
