//! 配置模块
//!
//! 命令行参数，可由环境变量提供。`.env` 文件由二进制在解析前加载。

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::errors::{AssistantError, Result};
use crate::infrastructure::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::infrastructure::logger::LogFormat;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "folio",
    author,
    version,
    about = "Portfolio assistant: project summaries, deep dives, blog drafts and chat"
)]
pub struct AppConfig {
    /// Gemini API 密钥
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    /// 模型标识
    #[arg(long, env = "GEMINI_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// 生成式语言 API 的基础 URL
    #[arg(long, env = "GEMINI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// 替换内置作品集内容的 YAML 文件
    #[arg(long, env = "PORTFOLIO_CONTENT")]
    pub content: Option<PathBuf>,

    /// 日志格式：pretty、compact、json
    #[arg(long, env = "LOG_FORMAT", default_value = "compact")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// 交互式控制台（默认）
    Console,
    /// 项目的单段技术摘要
    Summary {
        /// 项目 ID
        project: String,
    },
    /// 项目的 Markdown 深度分析
    DeepDive {
        /// 项目 ID
        project: String,
    },
    /// 根据主题起草博客文章
    Blog {
        /// 主题
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,
    },
    /// 向聊天助手发送一条消息
    Chat {
        /// 消息内容
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
}

impl AppConfig {
    /// 在访问网络之前校验配置
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(AssistantError::Config("GEMINI_API_KEY is required".to_string()));
        }

        if self.model.trim().is_empty() {
            return Err(AssistantError::Config("model must not be empty".to_string()));
        }

        let url = url::Url::parse(&self.base_url).map_err(|e| {
            AssistantError::Config(format!("invalid base url '{}': {}", self.base_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AssistantError::Config(format!(
                "base url must be http or https, got '{}'",
                url.scheme()
            )));
        }

        if let Some(path) = &self.content {
            if !path.is_file() {
                return Err(AssistantError::Config(format!(
                    "content file not found: {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }

    /// 要执行的命令，未指定时为控制台
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Console)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = AppConfig::parse_from(["folio", "--api-key", "test_key"]);

        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com/v1beta");
        assert_eq!(config.log_format, LogFormat::Compact);
        assert!(config.content.is_none());
        assert_eq!(config.command(), Command::Console);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_custom_values() {
        let config = AppConfig::parse_from([
            "folio",
            "--api-key",
            "k",
            "--model",
            "gemini-2.5-flash",
            "--log-format",
            "json",
            "blog",
            "Zero",
            "Knowledge",
            "Proofs",
        ]);

        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(
            config.command(),
            Command::Blog {
                topic: vec!["Zero".into(), "Knowledge".into(), "Proofs".into()]
            }
        );
    }

    #[test]
    fn test_subcommand_parsing() {
        let config = AppConfig::parse_from(["folio", "--api-key", "k", "deep-dive", "chain-clash"]);
        assert_eq!(
            config.command(),
            Command::DeepDive {
                project: "chain-clash".to_string()
            }
        );
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let config = AppConfig::parse_from(["folio", "--api-key", " "]);
        assert!(matches!(config.validate(), Err(AssistantError::Config(_))));
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        let config = AppConfig::parse_from(["folio", "--api-key", "k", "--base-url", "not a url"]);
        assert!(config.validate().is_err());

        let config = AppConfig::parse_from(["folio", "--api-key", "k", "--base-url", "ftp://x.y"]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_content_file_is_rejected() {
        let config = AppConfig::parse_from([
            "folio",
            "--api-key",
            "k",
            "--content",
            "/definitely/not/here.yaml",
        ]);
        assert!(config.validate().is_err());
    }
}
