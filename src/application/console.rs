//! 终端前端
//!
//! 扮演站点组件的角色：调用助手、渲染文本，
//! 并持有各组件自己的临时状态。

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::core::assistant::{PortfolioAssistant, SUMMARY_UNAVAILABLE};
use crate::domain::{BlogFeed, BlogPost, ChatMessage, ChatRole, Project};
use crate::errors::Result;

pub const PROMPT: &str = "folio> ";

const HELP: &str = "\
Commands:
  /projects              list projects
  /summary <project-id>  one-paragraph technical summary
  /deep-dive <project-id> markdown deep dive
  /blog <topic>          draft a blog post and add it to the feed
  /posts                 list blog posts
  /post <post-id>        show a blog post
  /hackathons            hackathon profiles
  /profile               about the author
  /history               chat transcript
  /help                  this text
  /quit                  exit
Anything else is sent to the chat assistant.";

/// 解析后的控制台输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Help,
    Profile,
    Projects,
    Hackathons,
    Summary(String),
    DeepDive(String),
    Blog(String),
    Posts,
    Post(String),
    History,
    Quit,
    Chat(String),
    Empty,
    Unknown(String),
}

impl ConsoleCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return ConsoleCommand::Empty;
        }
        if !line.starts_with('/') {
            return ConsoleCommand::Chat(line.to_string());
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim().to_string()),
            None => (line, String::new()),
        };

        match name {
            "/help" | "/?" => ConsoleCommand::Help,
            "/profile" | "/about" => ConsoleCommand::Profile,
            "/projects" => ConsoleCommand::Projects,
            "/hackathons" => ConsoleCommand::Hackathons,
            "/summary" => ConsoleCommand::Summary(arg),
            "/deep-dive" | "/deepdive" => ConsoleCommand::DeepDive(arg),
            "/blog" => ConsoleCommand::Blog(arg),
            "/posts" => ConsoleCommand::Posts,
            "/post" => ConsoleCommand::Post(arg),
            "/history" => ConsoleCommand::History,
            "/quit" | "/exit" => ConsoleCommand::Quit,
            other => ConsoleCommand::Unknown(other.to_string()),
        }
    }
}

/// 命令执行后循环的下一步
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(String),
    Exit,
}

/// 交互式控制台状态
pub struct Console {
    assistant: Arc<PortfolioAssistant>,
    summaries: HashMap<String, String>,
    summary_errors: HashMap<String, String>,
    deep_dives: HashMap<String, String>,
    feed: BlogFeed,
    transcript: Vec<ChatMessage>,
}

impl Console {
    pub fn new(assistant: Arc<PortfolioAssistant>) -> Self {
        let feed = BlogFeed::new(assistant.content().seed_posts().to_vec());
        Self {
            assistant,
            summaries: HashMap::new(),
            summary_errors: HashMap::new(),
            deep_dives: HashMap::new(),
            feed,
            transcript: Vec::new(),
        }
    }

    pub fn feed(&self) -> &BlogFeed {
        &self.feed
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn cached_summary(&self, project_id: &str) -> Option<&str> {
        self.summaries.get(project_id).map(String::as_str)
    }

    pub fn summary_error(&self, project_id: &str) -> Option<&str> {
        self.summary_errors.get(project_id).map(String::as_str)
    }

    /// 读取命令直到 `/quit` 或输入结束
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        output.write_all(PROMPT.as_bytes()).await?;
        output.flush().await?;

        while let Some(line) = lines.next_line().await? {
            match self.handle(ConsoleCommand::parse(&line)).await {
                Flow::Exit => break,
                Flow::Continue(text) => {
                    if !text.is_empty() {
                        output.write_all(text.as_bytes()).await?;
                        output.write_all(b"\n").await?;
                    }
                }
            }
            output.write_all(PROMPT.as_bytes()).await?;
            output.flush().await?;
        }

        info!("console closed");
        Ok(())
    }

    pub async fn handle(&mut self, command: ConsoleCommand) -> Flow {
        debug!(?command, "console command");
        let text = match command {
            ConsoleCommand::Quit => return Flow::Exit,
            ConsoleCommand::Empty => String::new(),
            ConsoleCommand::Help => HELP.to_string(),
            ConsoleCommand::Unknown(name) => format!("Unknown command {}. Try /help.", name),
            ConsoleCommand::Profile => self.render_profile(),
            ConsoleCommand::Projects => self.render_projects(),
            ConsoleCommand::Hackathons => self.render_hackathons(),
            ConsoleCommand::Summary(id) => self.summary(&id).await,
            ConsoleCommand::DeepDive(id) => self.deep_dive(&id).await,
            ConsoleCommand::Blog(topic) => self.blog(&topic).await,
            ConsoleCommand::Posts => self.render_posts(),
            ConsoleCommand::Post(id) => match self.feed.get(&id) {
                Some(post) => render_post(post),
                None => format!("No post with id '{}'.", id),
            },
            ConsoleCommand::History => self.render_history(),
            ConsoleCommand::Chat(message) => self.chat(&message).await,
        };
        Flow::Continue(text)
    }

    fn find_project(&self, id: &str) -> Option<Project> {
        self.assistant.content().project(id).cloned()
    }

    async fn summary(&mut self, id: &str) -> String {
        let Some(project) = self.find_project(id) else {
            return format!("No project with id '{}'. Try /projects.", id);
        };
        if let Some(summary) = self.summaries.get(id) {
            return summary.clone();
        }

        match self
            .assistant
            .generate_project_summary(&project.title, &project.tech_stack)
            .await
        {
            Ok(summary) => {
                self.summary_errors.remove(id);
                self.summaries.insert(id.to_string(), summary.clone());
                summary
            }
            Err(_) => {
                self.summary_errors
                    .insert(id.to_string(), SUMMARY_UNAVAILABLE.to_string());
                SUMMARY_UNAVAILABLE.to_string()
            }
        }
    }

    async fn deep_dive(&mut self, id: &str) -> String {
        let Some(project) = self.find_project(id) else {
            return format!("No project with id '{}'. Try /projects.", id);
        };
        if let Some(doc) = self.deep_dives.get(id) {
            return doc.clone();
        }

        let generated = self
            .assistant
            .deep_dive_project(&project.title, &project.tech_stack)
            .await;
        let cacheable = generated.is_ok();
        let doc = generated.or_fallback();
        if cacheable {
            self.deep_dives.insert(id.to_string(), doc.clone());
        }
        format!("# {}\n\n{}", project.title, doc)
    }

    async fn blog(&mut self, topic: &str) -> String {
        let topic = topic.trim();
        if topic.is_empty() {
            return "Enter a topic, e.g. /blog Zero Knowledge Proofs".to_string();
        }

        let generated = self.assistant.draft_blog_post(topic).await;
        if !generated.is_ok() {
            return generated.or_fallback();
        }

        let draft = generated.or_fallback();
        let post = self.feed.publish(BlogPost::from_draft(topic, &draft, Utc::now()));
        info!(post_id = %post.id, "published generated post");
        render_post(post)
    }

    async fn chat(&mut self, message: &str) -> String {
        self.transcript.push(ChatMessage::user(message));

        let generated = self.assistant.chat_turn(message).await;
        let reply = if generated.is_ok() {
            ChatMessage::model(generated.or_fallback())
        } else {
            ChatMessage::model_error(generated.or_fallback())
        };
        let text = reply.text.clone();
        self.transcript.push(reply);
        text
    }

    fn render_profile(&self) -> String {
        let profile = self.assistant.content().profile();
        let mut out = format!("{}\n{}\n{}\n", profile.name, profile.role, profile.sub_role);
        for edu in &profile.education {
            out.push_str(&format!("\n{} - {} ({})", edu.degree, edu.institution, edu.period));
        }
        out.push_str("\n\n");
        for category in &profile.skills {
            out.push_str(&format!("{}: {}\n", category.category, category.skills.join(", ")));
        }
        out.push_str(&format!("\n\"{}\"\n", profile.philosophy));
        out.push_str(&format!(
            "\nGitHub: {}\nEmail: {}",
            profile.socials.github, profile.socials.email
        ));
        out
    }

    fn render_projects(&self) -> String {
        self.assistant
            .content()
            .projects()
            .iter()
            .map(|p| {
                let mut line = format!("{:<24} {}\n    {}\n    [{}]", p.id, p.title, p.description, p.stack_line());
                if let Some(url) = &p.github_url {
                    line.push_str(&format!("\n    source: {}", url));
                }
                if let Some(url) = &p.demo_url {
                    line.push_str(&format!("\n    demo: {}", url));
                }
                line
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_hackathons(&self) -> String {
        self.assistant
            .content()
            .hackathons()
            .iter()
            .map(|h| format!("{} - {}\n    {}\n    {}", h.platform, h.title, h.description, h.url))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_posts(&self) -> String {
        self.feed
            .posts()
            .iter()
            .map(|p| format!("{}  {:<28} {}", p.date, p.id, p.title))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn render_history(&self) -> String {
        if self.transcript.is_empty() {
            return "No messages yet.".to_string();
        }
        self.transcript
            .iter()
            .map(|m| {
                let who = match m.role {
                    ChatRole::User => "you",
                    ChatRole::Model => "assistant",
                };
                let marker = if m.is_error { " (error)" } else { "" };
                format!("{}{}: {}", who, marker, m.text)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render_post(post: &BlogPost) -> String {
    format!(
        "{} | {} | {}\n\n{}",
        post.date,
        post.id,
        post.tags.join(", "),
        post.content
    )
}
