//! 基础设施层：与外部世界交互
//!
//! 生成式文本服务端口、Gemini 适配器和日志

pub mod gemini;
pub mod llm;
pub mod logger;

pub use gemini::GeminiClient;
pub use llm::{Completion, GenerateRequest, TextService, Turn};
