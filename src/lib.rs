//! 作品集助手
//!
//! 个人作品集网站的 AI 请求编排：
//! - 项目摘要和深度分析
//! - 根据主题生成博客草稿
//! - 以作品集内容为背景的聊天助手
//!
//! # 分层
//!
//! - `domain`: 个人资料、项目、博客和聊天实体
//! - `core`: 内容存储、提示词、聊天会话和助手
//! - `infrastructure`: 生成式文本服务端口、Gemini、日志
//! - `application`: 终端前端
//! - `bootstrap`: 启动引导

pub mod domain;

pub mod core;

pub mod infrastructure;

pub mod application;

pub mod bootstrap;

pub mod errors;

pub use crate::core::assistant::{Generated, PortfolioAssistant, Task};
pub use crate::core::chat::{ChatSession, ChatSessionManager, SessionState};
pub use crate::core::config::{AppConfig, Command};
pub use crate::core::content::ContentStore;

pub use domain::{BlogFeed, BlogPost, ChatMessage, ChatRole, Profile, Project};

pub use infrastructure::gemini::GeminiClient;
pub use infrastructure::llm::{Completion, GenerateRequest, TextService, Turn};
pub use infrastructure::logger;

pub use application::console::{Console, ConsoleCommand, Flow};
pub use bootstrap::{assemble, Launcher};
pub use errors::{AssistantError, Result};

/// 版本号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
