//! 测试工具
//!
//! 按脚本应答的内存文本服务，以及组装助手的辅助函数

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use folio_assistant::{
    assemble, AssistantError, Completion, ContentStore, GenerateRequest, PortfolioAssistant,
    Result, TextService,
};

/// 一条脚本应答
#[derive(Debug, Clone)]
pub enum Scripted {
    Reply(String),
    Empty,
    NetworkFailure,
    ServiceFailure(u16),
}

/// 按脚本应答，脚本用完后回显最后一个用户轮次
pub struct ScriptedService {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<GenerateRequest>>,
    delay: Option<Duration>,
}

impl ScriptedService {
    pub fn new(script: impl IntoIterator<Item = Scripted>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub fn echo() -> Self {
        Self::new([])
    }

    pub fn replying(text: &str) -> Self {
        Self::new([Scripted::Reply(text.to_string())])
    }

    /// 应答前等待，使调用保持进行中
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl TextService for ScriptedService {
    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, request: GenerateRequest) -> Result<Completion> {
        let last_user = request.last_user_text().unwrap_or_default().to_string();
        self.requests.lock().unwrap().push(request);
        let next = self.script.lock().unwrap().pop_front();

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match next {
            Some(Scripted::Reply(text)) => Ok(Completion::text(text)),
            Some(Scripted::Empty) => Ok(Completion::empty()),
            Some(Scripted::NetworkFailure) => {
                Err(AssistantError::Network("connection reset by peer".to_string()))
            }
            Some(Scripted::ServiceFailure(status)) => Err(AssistantError::Service {
                status,
                message: "RESOURCE_EXHAUSTED: quota exceeded".to_string(),
            }),
            None => Ok(Completion::text(format!("echo: {}", last_user))),
        }
    }
}

/// 基于内置内容和给定服务的助手
pub fn assistant(service: Arc<ScriptedService>) -> Arc<PortfolioAssistant> {
    assemble(service, ContentStore::seeded())
}

pub fn chain_clash_stack() -> Vec<String> {
    ["Rust", "Linera SDK", "Wasm", "React"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
