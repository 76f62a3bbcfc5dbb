//! 日志模块 - 结构化输出、请求追踪和调用计时
//!
//! - 可读、紧凑和 JSON 三种输出
//! - 每次服务调用一个请求 ID
//! - 每次调用的耗时记录在 `metrics` target 下
//! - API 密钥在写入日志前脱敏

use std::collections::BTreeMap;
use std::time::Instant;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// 多行，带颜色
    Pretty,
    /// 单行
    Compact,
    /// JSON，供日志采集使用
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("unknown log format: {}", s)),
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Pretty => write!(f, "pretty"),
            LogFormat::Compact => write!(f, "compact"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub format: LogFormat,
    /// 仅对 pretty 和 compact 输出生效
    pub enable_color: bool,
    pub show_target: bool,
    pub show_file: bool,
    /// 未设置 `RUST_LOG` 时使用的过滤器
    pub default_filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            enable_color: true,
            show_target: true,
            show_file: false,
            default_filter: "info".to_string(),
        }
    }
}

/// 安装全局 subscriber
///
/// `RUST_LOG` 覆盖 `config.default_filter`。输出到 stderr，控制台自身的
/// stdout 输出不受干扰。重复调用不生效。
pub fn init(config: LogConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    let result = match config.format {
        LogFormat::Pretty => subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .with_file(config.show_file)
                    .with_line_number(config.show_file)
                    .with_ansi(config.enable_color),
            )
            .try_init(),
        LogFormat::Compact => subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .with_file(config.show_file)
                    .with_line_number(config.show_file)
                    .with_ansi(config.enable_color),
            )
            .try_init(),
        LogFormat::Json => subscriber
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(config.show_target)
                    .with_file(config.show_file)
                    .with_line_number(config.show_file)
                    .with_current_span(true),
            )
            .try_init(),
    };

    if let Err(err) = result {
        tracing::debug!("logger already initialised: {}", err);
    }
}

/// 单次调用的追踪上下文
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub metadata: BTreeMap<String, String>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4().to_string())
    }

    pub fn with_id(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 计时器，drop 时记录操作耗时
pub struct Timer {
    name: String,
    start: Instant,
    request_id: Option<String>,
    metadata: BTreeMap<String, String>,
}

impl Timer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start: Instant::now(),
            request_id: None,
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_context(mut self, ctx: &RequestContext) -> Self {
        self.request_id = Some(ctx.request_id.clone());
        self.metadata = ctx.metadata.clone();
        self
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;

        match &self.request_id {
            Some(req_id) => tracing::info!(
                target: "metrics",
                request_id = %req_id,
                operation = %self.name,
                metadata = ?self.metadata,
                elapsed_ms = %format!("{:.2}", elapsed_ms),
                "operation completed"
            ),
            None => tracing::info!(
                target: "metrics",
                operation = %self.name,
                elapsed_ms = %format!("{:.2}", elapsed_ms),
                "operation completed"
            ),
        }
    }
}

/// 日志脱敏工具
pub struct Sanitizer;

impl Sanitizer {
    /// 保留密钥前 6 位和后 4 位
    pub fn api_key(key: &str) -> String {
        if key.chars().count() <= 16 {
            return "***".to_string();
        }
        let head: String = key.chars().take(6).collect();
        let tail: String = key
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        format!("{}...{}", head, tail)
    }
}
