//! 错误处理模块
//!
//! 全局错误类型和 Result 别名

use thiserror::Error;

/// 主错误类型
#[derive(Error, Debug)]
pub enum AssistantError {
    /// 服务有响应但没有可用文本
    #[error("No {0} generated")]
    EmptyResponse(String),

    /// 请求没有得到响应（连接、DNS、TLS、超时）
    #[error("Network error: {0}")]
    Network(String),

    /// 服务拒绝了请求（配额、认证、请求错误、故障）
    #[error("Service error ({status}): {message}")]
    Service { status: u16, message: String },

    /// 响应体无法解析
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// 配置错误
    #[error("Configuration error: {0}")]
    Config(String),

    /// 作品集内容加载失败或校验不通过
    #[error("Content error: {0}")]
    Content(String),

    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 未知错误
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl AssistantError {
    /// 为指定操作创建空响应错误
    pub fn empty(operation: impl Into<String>) -> Self {
        AssistantError::EmptyResponse(operation.into())
    }

    /// 服务是否返回了无可用文本的响应
    pub fn is_empty_response(&self) -> bool {
        matches!(self, AssistantError::EmptyResponse(_))
    }
}

impl From<anyhow::Error> for AssistantError {
    fn from(err: anyhow::Error) -> Self {
        AssistantError::Unknown(err.to_string())
    }
}

impl From<reqwest::Error> for AssistantError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AssistantError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            AssistantError::Service {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            AssistantError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AssistantError {
    fn from(err: serde_json::Error) -> Self {
        AssistantError::MalformedResponse(err.to_string())
    }
}

impl From<serde_yaml::Error> for AssistantError {
    fn from(err: serde_yaml::Error) -> Self {
        AssistantError::Content(err.to_string())
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, AssistantError>;
