//! 启动引导
//!
//! 只构建一次内容存储、服务适配器、聊天会话管理器和助手，
//! 然后执行请求的命令。

use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::info;

use crate::application::console::Console;
use crate::core::assistant::PortfolioAssistant;
use crate::core::chat::ChatSessionManager;
use crate::core::config::{AppConfig, Command};
use crate::core::content::ContentStore;
use crate::errors::{AssistantError, Result};
use crate::infrastructure::gemini::GeminiClient;
use crate::infrastructure::llm::TextService;
use crate::infrastructure::logger::Sanitizer;

/// 用服务和内容组装助手
pub fn assemble(service: Arc<dyn TextService>, content: ContentStore) -> Arc<PortfolioAssistant> {
    let content = Arc::new(content);
    let chat = Arc::new(ChatSessionManager::new(service.clone(), content.clone()));
    Arc::new(PortfolioAssistant::new(service, content, chat))
}

/// 应用启动器
pub struct Launcher {
    config: AppConfig,
    service: Option<Arc<dyn TextService>>,
}

impl Launcher {
    pub fn with_config(config: AppConfig) -> Self {
        Self {
            config,
            service: None,
        }
    }

    /// 使用此服务，不再构建 Gemini 客户端
    pub fn with_service(mut self, service: Arc<dyn TextService>) -> Self {
        self.service = Some(service);
        self
    }

    fn load_content(&self) -> Result<ContentStore> {
        match &self.config.content {
            Some(path) => ContentStore::from_yaml_file(path),
            None => Ok(ContentStore::seeded()),
        }
    }

    fn service(&self) -> Result<Arc<dyn TextService>> {
        if let Some(service) = &self.service {
            return Ok(service.clone());
        }

        self.config.validate()?;
        info!(
            model = %self.config.model,
            base_url = %self.config.base_url,
            api_key = %Sanitizer::api_key(&self.config.api_key),
            "using gemini"
        );
        let client = GeminiClient::new(self.config.api_key.clone())
            .with_model(self.config.model.clone())
            .with_base_url(self.config.base_url.clone());
        Ok(Arc::new(client))
    }

    /// 构建助手
    pub fn build(&self) -> Result<Arc<PortfolioAssistant>> {
        let content = self.load_content()?;
        Ok(assemble(self.service()?, content))
    }

    /// 构建并在 stdin/stdout 上执行配置的命令
    pub async fn launch(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.run(stdin, tokio::io::stdout()).await
    }

    /// 构建并在给定的输入输出流上执行配置的命令
    pub async fn run<R, W>(&self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let assistant = self.build()?;

        let text = match self.config.command() {
            Command::Console => {
                let mut console = Console::new(assistant);
                return console.run(input, output).await;
            }
            Command::Summary { project } => {
                let project = find_project(&assistant, &project)?;
                assistant
                    .generate_project_summary(&project.title, &project.tech_stack)
                    .await?
            }
            Command::DeepDive { project } => {
                let project = find_project(&assistant, &project)?;
                assistant
                    .generate_project_deep_dive(&project.title, &project.tech_stack)
                    .await
            }
            Command::Blog { topic } => assistant.generate_blog_post(&topic.join(" ")).await,
            Command::Chat { message } => assistant.send_message_to_chat(&message.join(" ")).await,
        };

        output.write_all(text.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
        Ok(())
    }
}

fn find_project(
    assistant: &PortfolioAssistant,
    id: &str,
) -> Result<crate::domain::Project> {
    assistant.content().project(id).cloned().ok_or_else(|| {
        AssistantError::Content(format!("no project with id '{}'", id))
    })
}
