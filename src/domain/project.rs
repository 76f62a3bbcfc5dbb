//! 项目领域实体

use serde::{Deserialize, Serialize};

/// 项目唯一标识
pub type ProjectId = String;

/// 作品集项目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub tech_stack: Vec<String>,
    pub image_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
}

impl Project {
    /// 逗号连接的技术栈
    pub fn stack_line(&self) -> String {
        self.tech_stack.join(", ")
    }

    /// 作为聊天助手上下文的单行描述
    pub fn context_line(&self) -> String {
        format!(
            "- {}: {} (Stack: {})",
            self.title,
            self.description,
            self.stack_line()
        )
    }
}
