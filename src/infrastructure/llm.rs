//! 生成式文本服务
//!
//! 所有后端实现的端口。单次提示是只含一个用户轮次的请求；
//! 聊天轮次携带系统指令和历史记录。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::ChatRole;
use crate::errors::Result;

/// 发送给服务的一个对话轮次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: ChatRole,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// 生成请求
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub system_instruction: Option<String>,
    pub contents: Vec<Turn>,
}

impl GenerateRequest {
    /// 无状态的单提示请求
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            system_instruction: None,
            contents: vec![Turn::user(text)],
        }
    }

    /// 带系统指令的多轮请求
    pub fn conversation(system_instruction: impl Into<String>, contents: Vec<Turn>) -> Self {
        Self {
            system_instruction: Some(system_instruction.into()),
            contents,
        }
    }

    /// 最后一个用户轮次的文本
    pub fn last_user_text(&self) -> Option<&str> {
        self.contents
            .iter()
            .rev()
            .find(|t| t.role == ChatRole::User)
            .map(|t| t.text.as_str())
    }
}

/// 服务返回的结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub text: Option<String>,
    pub finish_reason: Option<String>,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: Some("STOP".to_string()),
        }
    }

    /// 不含任何文本的响应
    pub fn empty() -> Self {
        Self::default()
    }

    /// 文本中有非空白字符时返回文本
    pub fn into_usable_text(self) -> Option<String> {
        self.text.filter(|t| !t.trim().is_empty())
    }
}

/// 生成式文本服务
#[async_trait]
pub trait TextService: Send + Sync {
    /// 请求使用的模型标识
    fn model(&self) -> &str;

    /// 发起一次生成调用
    async fn generate(&self, request: GenerateRequest) -> Result<Completion>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_request() {
        let req = GenerateRequest::prompt("hello");
        assert!(req.system_instruction.is_none());
        assert_eq!(req.contents, vec![Turn::user("hello")]);
        assert_eq!(req.last_user_text(), Some("hello"));
    }

    #[test]
    fn test_last_user_text_skips_model_turns() {
        let req = GenerateRequest::conversation(
            "sys",
            vec![Turn::user("a"), Turn::model("b"), Turn::user("c"), Turn::model("d")],
        );
        assert_eq!(req.last_user_text(), Some("c"));
    }

    #[test]
    fn test_usable_text() {
        assert_eq!(Completion::text("hi").into_usable_text(), Some("hi".to_string()));
        assert_eq!(Completion::text("  \n").into_usable_text(), None);
        assert_eq!(Completion::empty().into_usable_text(), None);
    }
}
