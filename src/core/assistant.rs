//! 作品集助手
//!
//! 四个生成操作。每个操作都有返回 [`Generated`] 的核心形式，
//! 保留失败信息，由调用方决定传播错误还是显示降级文本。
//! `generate_*` 和 `send_message_to_chat` 按站点的用法应用这两种策略：
//! 摘要传播错误，其余操作降级。

use std::sync::Arc;

use tracing::{error, info_span, Instrument};

use crate::core::chat::ChatSessionManager;
use crate::core::content::ContentStore;
use crate::core::prompts;
use crate::errors::{AssistantError, Result};
use crate::infrastructure::llm::{GenerateRequest, TextService};

pub const SUMMARY_UNAVAILABLE: &str = "Unable to generate insights. Click to retry.";
pub const DEEP_DIVE_EMPTY: &str = "Deep dive generation unavailable.";
pub const DEEP_DIVE_FAILED: &str = "Unable to retrieve technical analysis at this moment.";
pub const BLOG_EMPTY: &str = "Blog post generation failed.";
pub const BLOG_FAILED: &str = "Could not generate blog post at this time.";
pub const CHAT_EMPTY: &str = "I didn't catch that.";
pub const CHAT_FAILED: &str = "Sorry, I'm having trouble connecting to the neural network right now.";

/// 产生结果的操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    ProjectSummary,
    ProjectDeepDive,
    BlogPost,
    ChatTurn,
}

impl Task {
    /// 失败时显示的降级文本
    pub fn fallback(&self, err: &AssistantError) -> &'static str {
        let empty = err.is_empty_response();
        match self {
            Task::ProjectSummary => SUMMARY_UNAVAILABLE,
            Task::ProjectDeepDive if empty => DEEP_DIVE_EMPTY,
            Task::ProjectDeepDive => DEEP_DIVE_FAILED,
            Task::BlogPost if empty => BLOG_EMPTY,
            Task::BlogPost => BLOG_FAILED,
            Task::ChatTurn if empty => CHAT_EMPTY,
            Task::ChatTurn => CHAT_FAILED,
        }
    }

    /// 该操作可能产生的全部降级文本
    pub fn fallbacks(&self) -> &'static [&'static str] {
        match self {
            Task::ProjectSummary => &[SUMMARY_UNAVAILABLE],
            Task::ProjectDeepDive => &[DEEP_DIVE_EMPTY, DEEP_DIVE_FAILED],
            Task::BlogPost => &[BLOG_EMPTY, BLOG_FAILED],
            Task::ChatTurn => &[CHAT_EMPTY, CHAT_FAILED],
        }
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Task::ProjectSummary => write!(f, "summary"),
            Task::ProjectDeepDive => write!(f, "deep dive"),
            Task::BlogPost => write!(f, "blog post"),
            Task::ChatTurn => write!(f, "chat reply"),
        }
    }
}

/// 一次生成调用的结果
#[derive(Debug)]
pub struct Generated {
    task: Task,
    outcome: Result<String>,
}

impl Generated {
    pub fn new(task: Task, outcome: Result<String>) -> Self {
        Self { task, outcome }
    }

    pub fn task(&self) -> Task {
        self.task
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn error(&self) -> Option<&AssistantError> {
        self.outcome.as_ref().err()
    }

    /// 传播失败
    pub fn into_result(self) -> Result<String> {
        self.outcome
    }

    /// 用降级文本替换失败
    pub fn or_fallback(self) -> String {
        match self.outcome {
            Ok(text) => text,
            Err(err) => self.task.fallback(&err).to_string(),
        }
    }
}

/// 作品集生成功能的客户端
pub struct PortfolioAssistant {
    service: Arc<dyn TextService>,
    content: Arc<ContentStore>,
    chat: Arc<ChatSessionManager>,
}

impl PortfolioAssistant {
    pub fn new(
        service: Arc<dyn TextService>,
        content: Arc<ContentStore>,
        chat: Arc<ChatSessionManager>,
    ) -> Self {
        Self {
            service,
            content,
            chat,
        }
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn chat_sessions(&self) -> &ChatSessionManager {
        &self.chat
    }

    async fn request_text(&self, task: Task, prompt: String) -> Result<String> {
        self.service
            .generate(GenerateRequest::prompt(prompt))
            .await?
            .into_usable_text()
            .ok_or_else(|| AssistantError::empty(task.to_string()))
    }

    async fn one_shot(&self, task: Task, prompt: String) -> Generated {
        let span = info_span!("generate", task = %task, model = %self.service.model());
        let outcome = self.request_text(task, prompt).instrument(span).await;

        if let Err(e) = &outcome {
            error!(task = %task, error = %e, "generation failed");
        }
        Generated::new(task, outcome)
    }

    /// 项目的技术摘要段落
    pub async fn summarize_project<S: AsRef<str>>(&self, title: &str, tech_stack: &[S]) -> Generated {
        self.one_shot(Task::ProjectSummary, prompts::project_summary(title, tech_stack))
            .await
    }

    /// 项目的 Markdown 深度分析
    pub async fn deep_dive_project<S: AsRef<str>>(&self, title: &str, tech_stack: &[S]) -> Generated {
        self.one_shot(Task::ProjectDeepDive, prompts::project_deep_dive(title, tech_stack))
            .await
    }

    /// 关于某个主题的 Markdown 博客文章
    pub async fn draft_blog_post(&self, topic: &str) -> Generated {
        let prompt = prompts::blog_post(topic, self.content.profile());
        self.one_shot(Task::BlogPost, prompt).await
    }

    /// 在共享聊天会话上进行一轮对话，必要时创建会话
    pub async fn chat_turn(&self, message: &str) -> Generated {
        let session = self.chat.session();
        let outcome = session
            .send_message(message)
            .instrument(info_span!("chat", session_id = %session.id()))
            .await;

        if let Err(e) = &outcome {
            error!(error = %e, "chat turn failed");
        }
        Generated::new(Task::ChatTurn, outcome)
    }

    /// 摘要，空文本或服务错误时返回错误
    pub async fn generate_project_summary<S: AsRef<str>>(
        &self,
        title: &str,
        tech_stack: &[S],
    ) -> Result<String> {
        self.summarize_project(title, tech_stack).await.into_result()
    }

    /// 深度分析，不会失败
    pub async fn generate_project_deep_dive<S: AsRef<str>>(
        &self,
        title: &str,
        tech_stack: &[S],
    ) -> String {
        self.deep_dive_project(title, tech_stack).await.or_fallback()
    }

    /// 博客文章，不会失败
    pub async fn generate_blog_post(&self, topic: &str) -> String {
        self.draft_blog_post(topic).await.or_fallback()
    }

    /// 聊天回复，不会失败
    pub async fn send_message_to_chat(&self, message: &str) -> String {
        self.chat_turn(message).await.or_fallback()
    }
}
